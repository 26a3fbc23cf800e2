use std::fs::File;
use std::io::{BufWriter, Write};
use std::marker::PhantomData;
use std::path::Path;

use anyhow::Context as _;

use crate::encode::packet::Packet;
use crate::foundation::core::Rational;
use crate::foundation::error::{ReelError, ReelResult};
use crate::mux::container::{Container, MediaKind};

/// Bare encoded bitstream: packet payloads concatenated in arrival order, no framing.
///
/// Holds exactly one video stream; there is nothing to interleave, so packets are written
/// straight through. Works with any codec's parameter type because the parameters are not
/// stored.
pub struct ElementaryStream<W: Write, P = ()> {
    writer: W,
    time_base: Option<Rational>,
    header_written: bool,
    bytes_written: u64,
    _params: PhantomData<fn(&P)>,
}

impl<P> ElementaryStream<BufWriter<File>, P> {
    pub fn create(path: &Path) -> ReelResult<Self> {
        ensure_parent_dir(path)?;
        let file = File::create(path).map_err(|e| {
            ReelError::setup(format!(
                "failed to create elementary stream '{}': {e}",
                path.display()
            ))
        })?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write, P> ElementaryStream<W, P> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            time_base: None,
            header_written: false,
            bytes_written: 0,
            _params: PhantomData,
        }
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write, P> Container for ElementaryStream<W, P> {
    type Params = P;

    fn add_stream(&mut self, kind: MediaKind, time_base: Rational, _: &P) -> ReelResult<usize> {
        if kind != MediaKind::Video {
            return Err(ReelError::container(format!(
                "elementary streams carry video only, cannot add {kind}"
            )));
        }
        if self.time_base.is_some() {
            return Err(ReelError::container(
                "elementary streams carry a single stream",
            ));
        }
        self.time_base = Some(time_base);
        Ok(0)
    }

    fn write_header(&mut self) -> ReelResult<()> {
        self.header_written = true;
        Ok(())
    }

    fn stream_time_base(&self, index: usize) -> ReelResult<Rational> {
        match (index, self.time_base) {
            (0, Some(tb)) => Ok(tb),
            _ => Err(ReelError::container(format!("no stream {index}"))),
        }
    }

    fn write_interleaved(&mut self, packet: Packet) -> ReelResult<()> {
        if !self.header_written {
            return Err(ReelError::container("packet written before header"));
        }
        self.writer
            .write_all(&packet.data)
            .map_err(|e| ReelError::container(format!("failed to write packet: {e}")))?;
        self.bytes_written += packet.data.len() as u64;
        Ok(())
    }

    fn write_trailer(&mut self) -> ReelResult<()> {
        self.writer
            .flush()
            .map_err(|e| ReelError::container(format!("failed to flush stream: {e}")))
    }
}

pub fn ensure_parent_dir(path: &Path) -> ReelResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}
