use crate::encode::packet::Packet;
use crate::foundation::core::Rational;
use crate::foundation::error::{ReelError, ReelResult};
use crate::mux::container::{MediaKind, PacketSink, StreamDescriptor};

/// A reader of already-encoded packets, in source order.
pub trait PacketSource {
    /// Codec parameters the destination stream is declared with (copied, not negotiated).
    type Params: Clone;

    /// Time base of the packets this source yields.
    fn time_base(&self) -> Rational;

    fn stream_params(&self) -> Self::Params;

    /// `None` once the source is exhausted.
    fn next_packet(&mut self) -> ReelResult<Option<Packet>>;
}

impl<S: PacketSource + ?Sized> PacketSource for Box<S> {
    type Params = S::Params;

    fn time_base(&self) -> Rational {
        (**self).time_base()
    }

    fn stream_params(&self) -> Self::Params {
        (**self).stream_params()
    }

    fn next_packet(&mut self) -> ReelResult<Option<Packet>> {
        (**self).next_packet()
    }
}

/// Forwards a [`PacketSource`] into an output audio stream without decoding.
///
/// Payloads and timestamps pass through untouched. Only the stream index is rewritten, plus a
/// rescale when the container settled on a different time base at header write.
pub struct AudioPassthrough<S: PacketSource> {
    source: S,
    forwarded: u64,
}

impl<S: PacketSource> AudioPassthrough<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            forwarded: 0,
        }
    }

    pub fn forwarded(&self) -> u64 {
        self.forwarded
    }

    /// Drain the source to completion into `dest`. Returns the packets forwarded by this call.
    #[tracing::instrument(skip(self, sink), fields(stream = dest.index))]
    pub fn forward_all(
        &mut self,
        dest: StreamDescriptor,
        sink: &mut impl PacketSink,
    ) -> ReelResult<u64> {
        if dest.kind != MediaKind::Audio {
            return Err(ReelError::state(format!(
                "audio passthrough targeted at a {} stream",
                dest.kind
            )));
        }

        let mut n = 0u64;
        while let Some(mut packet) = self.source.next_packet()? {
            if packet.time_base != dest.time_base {
                packet.rescale_ts(dest.time_base);
            }
            packet.stream_index = dest.index;
            sink.write_packet(packet)?;
            n += 1;
        }
        self.forwarded += n;
        tracing::debug!(packets = n, "audio forwarded");
        Ok(n)
    }
}

#[cfg(test)]
#[path = "../tests/unit/audio/passthrough.rs"]
mod tests;
