use std::path::Path;

use ffmpeg_next::{codec, encoder, format};

use crate::encode::packet::Packet;
use crate::ffmpeg::{from_av, init, to_av};
use crate::foundation::core::Rational;
use crate::foundation::error::{ReelError, ReelResult};
use crate::mux::container::{Container, MediaKind};
use crate::mux::elementary::ensure_parent_dir;

/// A libav output context; the format is guessed from the file extension.
///
/// Stream parameters are copied as given, codec tag included. An audio stream copied from
/// another format family may carry a tag this format rejects at [`Container::write_header`].
pub struct FfmpegContainer {
    output: format::context::Output,
}

impl FfmpegContainer {
    pub fn create(path: &Path) -> ReelResult<Self> {
        init()?;
        ensure_parent_dir(path)?;
        let output = format::output(&path).map_err(|e| {
            ReelError::setup(format!(
                "failed to open output '{}': {e}",
                path.display()
            ))
        })?;
        tracing::debug!(path = %path.display(), format = output.format().name(), "container open");
        Ok(Self { output })
    }

    /// Whether encoders feeding this format must emit codec headers out of band.
    pub fn needs_global_header(&self) -> bool {
        self.output
            .format()
            .flags()
            .contains(format::Flags::GLOBAL_HEADER)
    }
}

impl Container for FfmpegContainer {
    type Params = codec::Parameters;

    fn add_stream(
        &mut self,
        kind: MediaKind,
        time_base: Rational,
        params: &codec::Parameters,
    ) -> ReelResult<usize> {
        let mut stream = self
            .output
            .add_stream(encoder::find(codec::Id::None))
            .map_err(|e| ReelError::container(format!("failed to add {kind} stream: {e}")))?;
        stream.set_parameters(params.clone());
        stream.set_time_base(to_av(time_base));
        Ok(stream.index())
    }

    fn write_header(&mut self) -> ReelResult<()> {
        self.output
            .write_header()
            .map_err(|e| ReelError::container(format!("failed to write header: {e}")))
    }

    fn stream_time_base(&self, index: usize) -> ReelResult<Rational> {
        self.output
            .stream(index)
            .map(|s| from_av(s.time_base()))
            .ok_or_else(|| ReelError::container(format!("no stream at index {index}")))
    }

    fn write_interleaved(&mut self, packet: Packet) -> ReelResult<()> {
        let mut av = ffmpeg_next::Packet::copy(&packet.data);
        av.set_stream(packet.stream_index);
        av.set_pts(packet.pts);
        av.set_dts(packet.dts);
        av.set_duration(packet.duration);
        if packet.is_key {
            av.set_flags(ffmpeg_next::packet::Flags::KEY);
        }
        av.write_interleaved(&mut self.output)
            .map_err(|e| ReelError::container(format!("failed to write packet: {e}")))
    }

    fn write_trailer(&mut self) -> ReelResult<()> {
        self.output
            .write_trailer()
            .map_err(|e| ReelError::container(format!("failed to write trailer: {e}")))
    }
}
