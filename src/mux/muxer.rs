use crate::encode::packet::Packet;
use crate::foundation::core::Rational;
use crate::foundation::error::{ReelError, ReelResult};
use crate::mux::container::{Container, MediaKind, PacketSink, StreamDescriptor};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MuxerState {
    /// Streams may still be declared.
    Declaring,
    /// Header written; packets accepted.
    Writing,
    /// Trailer written; nothing else accepted.
    Finished,
}

/// Owns the output container and enforces header → packets → trailer ordering.
///
/// Packets must arrive already stamped with a declared stream index and already rescaled into
/// that stream's time base.
pub struct Muxer<K: Container> {
    container: K,
    state: MuxerState,
    streams: Vec<StreamDescriptor>,
    written: Vec<u64>,
}

impl<K: Container> Muxer<K> {
    pub fn new(container: K) -> Self {
        Self {
            container,
            state: MuxerState::Declaring,
            streams: Vec::new(),
            written: Vec::new(),
        }
    }

    pub fn state(&self) -> MuxerState {
        self.state
    }

    /// Register the single stream for `kind` and return its container index. Only valid before
    /// the header.
    ///
    /// The descriptor is not final until the header is written: the container may settle on a
    /// different time base. Fetch it with [`stream`](Self::stream) afterwards.
    pub fn declare_stream(
        &mut self,
        kind: MediaKind,
        time_base: Rational,
        params: &K::Params,
    ) -> ReelResult<usize> {
        if self.state != MuxerState::Declaring {
            return Err(ReelError::state(format!(
                "cannot declare a {kind} stream after the header was written"
            )));
        }
        if !time_base.is_valid() {
            return Err(ReelError::validation(format!(
                "{kind} stream time base {time_base} must be positive"
            )));
        }
        if self.streams.iter().any(|s| s.kind == kind) {
            return Err(ReelError::state(format!("{kind} stream declared twice")));
        }

        let index = self.container.add_stream(kind, time_base, params)?;
        let desc = StreamDescriptor {
            index,
            kind,
            time_base,
        };
        tracing::debug!(index, %kind, %time_base, "declared output stream");
        self.streams.push(desc);
        if self.written.len() <= index {
            self.written.resize(index + 1, 0);
        }
        Ok(index)
    }

    #[tracing::instrument(skip(self))]
    pub fn write_header(&mut self) -> ReelResult<()> {
        if self.state != MuxerState::Declaring {
            return Err(ReelError::state("container header written twice"));
        }
        if self.streams.is_empty() {
            return Err(ReelError::state(
                "container header requires at least one stream",
            ));
        }

        self.container.write_header()?;
        for s in &mut self.streams {
            s.time_base = self.container.stream_time_base(s.index)?;
        }
        self.state = MuxerState::Writing;
        tracing::debug!(streams = self.streams.len(), "container header written");
        Ok(())
    }

    /// Final descriptor of the `kind` stream. `None` until the header is written.
    pub fn stream(&self, kind: MediaKind) -> Option<StreamDescriptor> {
        if self.state == MuxerState::Declaring {
            return None;
        }
        self.streams.iter().copied().find(|s| s.kind == kind)
    }

    /// Packets written so far to stream `index`.
    pub fn packets_written(&self, index: usize) -> u64 {
        self.written.get(index).copied().unwrap_or(0)
    }

    pub fn write_packet(&mut self, packet: Packet) -> ReelResult<()> {
        match self.state {
            MuxerState::Declaring => {
                return Err(ReelError::state("packet written before the container header"));
            }
            MuxerState::Finished => {
                return Err(ReelError::state("packet written after the container trailer"));
            }
            MuxerState::Writing => {}
        }

        let stream = self
            .streams
            .iter()
            .find(|s| s.index == packet.stream_index)
            .ok_or_else(|| {
                ReelError::state(format!(
                    "packet addressed to undeclared stream {}",
                    packet.stream_index
                ))
            })?;
        if packet.time_base != stream.time_base {
            return Err(ReelError::state(format!(
                "packet for stream {} is in time base {}, expected {}",
                stream.index, packet.time_base, stream.time_base
            )));
        }

        let index = stream.index;
        self.container.write_interleaved(packet)?;
        self.written[index] += 1;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub fn write_trailer(&mut self) -> ReelResult<()> {
        match self.state {
            MuxerState::Declaring => {
                return Err(ReelError::state("container trailer written before the header"));
            }
            MuxerState::Finished => {
                return Err(ReelError::state("container trailer written twice"));
            }
            MuxerState::Writing => {}
        }
        self.container.write_trailer()?;
        self.state = MuxerState::Finished;
        tracing::debug!(packets = ?self.written, "container trailer written");
        Ok(())
    }

    pub fn into_inner(self) -> K {
        self.container
    }
}

impl<K: Container> PacketSink for Muxer<K> {
    fn write_packet(&mut self, packet: Packet) -> ReelResult<()> {
        Muxer::write_packet(self, packet)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mux/muxer.rs"]
mod tests;
