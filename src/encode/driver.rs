use crate::encode::codec::{EncoderSettings, Receive, SendStatus, VideoCodec};
use crate::encode::frame::EncoderFrame;
use crate::foundation::core::Rational;
use crate::foundation::error::{ReelError, ReelResult};
use crate::mux::container::{MediaKind, PacketSink, StreamDescriptor};

/// Lifecycle of the encoder driver.
///
/// `Open` → (`submit`: `Sending` → `Draining` → `Open`)* → `flush` → `Flushed` → `close` →
/// `Closed`. `Sending` and `Draining` are only observable if a codec call fails mid-submit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncoderState {
    Open,
    Sending,
    Draining,
    Flushed,
    Closed,
}

#[derive(Clone, Copy, Debug)]
struct OutputBinding {
    stream_index: usize,
    time_base: Rational,
}

/// Drives a [`VideoCodec`] through the send-frame / drain-packets protocol.
///
/// Owns the reusable [`EncoderFrame`]. Every packet the codec produces is rescaled from the
/// encoder time base into the bound output stream's time base and restamped with that stream's
/// index before it reaches the sink.
pub struct EncoderDriver<C: VideoCodec> {
    codec: C,
    frame: EncoderFrame,
    state: EncoderState,
    output: Option<OutputBinding>,
    next_pts: i64,
    frames_submitted: u64,
    packets_emitted: u64,
}

impl<C: VideoCodec> EncoderDriver<C> {
    /// Wrap an opened codec and allocate the frame buffer it will be fed from.
    pub fn new(codec: C, settings: &EncoderSettings) -> ReelResult<Self> {
        settings.validate()?;
        let frame = EncoderFrame::new(settings.width, settings.height)?;
        tracing::debug!(
            codec = codec.name(),
            width = settings.width,
            height = settings.height,
            time_base = %codec.time_base(),
            "encoder driver open"
        );
        Ok(Self {
            codec,
            frame,
            state: EncoderState::Open,
            output: None,
            next_pts: 0,
            frames_submitted: 0,
            packets_emitted: 0,
        })
    }

    /// Route packets to `stream`. Call after the container header so the time base is final.
    pub fn bind_output(&mut self, stream: StreamDescriptor) -> ReelResult<()> {
        if stream.kind != MediaKind::Video {
            return Err(ReelError::state(format!(
                "encoder output bound to a {} stream",
                stream.kind
            )));
        }
        self.output = Some(OutputBinding {
            stream_index: stream.index,
            time_base: stream.time_base,
        });
        Ok(())
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    pub fn state(&self) -> EncoderState {
        self.state
    }

    pub fn frame(&self) -> &EncoderFrame {
        &self.frame
    }

    pub fn frame_mut(&mut self) -> &mut EncoderFrame {
        &mut self.frame
    }

    /// Presentation timestamp the next submitted frame must carry.
    pub fn next_pts(&self) -> i64 {
        self.next_pts
    }

    pub fn frames_submitted(&self) -> u64 {
        self.frames_submitted
    }

    pub fn packets_emitted(&self) -> u64 {
        self.packets_emitted
    }

    /// Send the current frame, then forward every packet the codec has ready.
    ///
    /// The frame must have been made writable and stamped with [`next_pts`](Self::next_pts).
    /// Returns the number of packets forwarded.
    pub fn submit(&mut self, sink: &mut impl PacketSink) -> ReelResult<usize> {
        match self.state {
            EncoderState::Open => {}
            EncoderState::Flushed => {
                return Err(ReelError::state("frame submitted after encoder flush"));
            }
            EncoderState::Closed => {
                return Err(ReelError::state("frame submitted to a closed encoder"));
            }
            EncoderState::Sending | EncoderState::Draining => {
                return Err(ReelError::state(
                    "frame submitted while a previous submission was incomplete",
                ));
            }
        }
        let output = self.binding()?;
        if !self.frame.is_writable() {
            return Err(ReelError::state(
                "encoder frame was not made writable before submission",
            ));
        }
        match self.frame.pts() {
            Some(pts) if pts == self.next_pts => {}
            other => {
                return Err(ReelError::state(format!(
                    "frame pts {other:?} breaks the sequence, expected {}",
                    self.next_pts
                )));
            }
        }

        self.state = EncoderState::Sending;
        let mut forwarded = 0;
        if self.codec.send_frame(Some(&self.frame))? == SendStatus::Full {
            forwarded += self.drain_full(output, sink)?;
            if self.codec.send_frame(Some(&self.frame))? == SendStatus::Full {
                return Err(ReelError::encoder(
                    "encoder refused a frame after its pending packets were drained",
                ));
            }
        }
        self.frame.mark_in_flight();
        self.next_pts += 1;
        self.frames_submitted += 1;

        self.state = EncoderState::Draining;
        forwarded += self.drain(output, false, sink)?;
        self.state = EncoderState::Open;

        tracing::trace!(pts = self.next_pts - 1, forwarded, "frame submitted");
        Ok(forwarded)
    }

    /// Signal end-of-stream and forward everything the codec still buffers.
    ///
    /// Valid exactly once, after the last real frame.
    #[tracing::instrument(skip_all, fields(frames = self.frames_submitted))]
    pub fn flush(&mut self, sink: &mut impl PacketSink) -> ReelResult<usize> {
        match self.state {
            EncoderState::Open => {}
            EncoderState::Flushed => return Err(ReelError::state("encoder flushed twice")),
            EncoderState::Closed => return Err(ReelError::state("flush on a closed encoder")),
            EncoderState::Sending | EncoderState::Draining => {
                return Err(ReelError::state(
                    "flush while a previous submission was incomplete",
                ));
            }
        }
        let output = self.binding()?;

        self.state = EncoderState::Sending;
        let mut forwarded = 0;
        if self.codec.send_frame(None)? == SendStatus::Full {
            forwarded += self.drain_full(output, sink)?;
            if self.codec.send_frame(None)? == SendStatus::Full {
                return Err(ReelError::encoder(
                    "encoder refused end-of-stream after its pending packets were drained",
                ));
            }
        }
        self.state = EncoderState::Flushed;
        forwarded += self.drain(output, true, sink)?;

        tracing::debug!(forwarded, total = self.packets_emitted, "encoder flushed");
        Ok(forwarded)
    }

    /// Release the encoder. Only valid after [`flush`](Self::flush).
    pub fn close(&mut self) -> ReelResult<()> {
        match self.state {
            EncoderState::Flushed => {
                self.state = EncoderState::Closed;
                Ok(())
            }
            EncoderState::Closed => Err(ReelError::state("encoder closed twice")),
            _ => Err(ReelError::state("encoder closed before it was flushed")),
        }
    }

    fn binding(&self) -> ReelResult<OutputBinding> {
        self.output
            .ok_or_else(|| ReelError::state("encoder is not bound to an output stream"))
    }

    /// Drain after a `Full` answer; a full encoder with nothing to hand back is broken.
    fn drain_full(&mut self, output: OutputBinding, sink: &mut impl PacketSink) -> ReelResult<usize> {
        let n = self.drain(output, false, sink)?;
        if n == 0 {
            return Err(ReelError::encoder(
                "encoder reported backpressure but produced no packet",
            ));
        }
        Ok(n)
    }

    fn drain(
        &mut self,
        output: OutputBinding,
        flushing: bool,
        sink: &mut impl PacketSink,
    ) -> ReelResult<usize> {
        let encoder_tb = self.codec.time_base();
        let mut forwarded = 0;
        loop {
            match self.codec.receive_packet()? {
                Receive::Packet(mut packet) => {
                    packet.time_base = encoder_tb;
                    packet.rescale_ts(output.time_base);
                    packet.stream_index = output.stream_index;
                    sink.write_packet(packet)?;
                    forwarded += 1;
                    self.packets_emitted += 1;
                }
                Receive::Again if flushing => {
                    return Err(ReelError::encoder(
                        "encoder asked for more input after end-of-stream",
                    ));
                }
                Receive::Again | Receive::Eof => return Ok(forwarded),
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/driver.rs"]
mod tests;
