use std::collections::VecDeque;

use crate::encode::frame::EncoderFrame;
use crate::encode::packet::Packet;
use crate::foundation::core::{Fps, Rational};
use crate::foundation::error::{ReelError, ReelResult};
use crate::mux::container::MediaKind;

/// Name that selects [`RawVideoCodec`].
pub const RAW_CODEC_NAME: &str = "raw";

/// Everything needed to open a video encoder. Fixed for the whole run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncoderSettings {
    pub codec: String,
    pub width: u32,
    pub height: u32,
    pub bit_rate: u64,
    pub gop_size: u32,
    pub fps: Fps,
}

impl EncoderSettings {
    pub fn validate(&self) -> ReelResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ReelError::validation(
                "encoder width/height must be non-zero",
            ));
        }
        if self.gop_size == 0 {
            return Err(ReelError::validation("encoder gop size must be non-zero"));
        }
        if self.codec.trim().is_empty() {
            return Err(ReelError::validation("encoder codec name must be non-empty"));
        }
        Ok(())
    }

    /// Encoder time base: one tick per frame.
    pub fn time_base(&self) -> Rational {
        self.fps.time_base()
    }
}

/// Outcome of handing a frame (or the end-of-stream marker) to an encoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendStatus {
    Accepted,
    /// The encoder wants its pending packets read before it takes more input.
    Full,
}

/// Outcome of asking an encoder for a finished packet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Receive {
    Packet(Packet),
    /// Nothing available until more input arrives.
    Again,
    /// Fully drained after end-of-stream.
    Eof,
}

/// Backend-neutral stream parameters, used by codecs and containers without libav.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StreamParams {
    pub kind: MediaKind,
    pub codec: String,
    pub width: u32,
    pub height: u32,
    pub bit_rate: u64,
}

/// A streaming video encoder with libav's send/receive protocol.
///
/// Packets come back in the encoder's own [`time_base`](VideoCodec::time_base); rescaling to the
/// output stream is the driver's job.
pub trait VideoCodec {
    /// Codec parameters the container stream is declared with.
    type Params: Clone;

    fn name(&self) -> &str;

    fn time_base(&self) -> Rational;

    /// Final parameters, valid once the codec is open.
    fn stream_params(&self) -> Self::Params;

    /// `None` signals end-of-stream.
    fn send_frame(&mut self, frame: Option<&EncoderFrame>) -> ReelResult<SendStatus>;

    fn receive_packet(&mut self) -> ReelResult<Receive>;
}

/// Dependency-free codec storing every frame as one uncompressed packed-RGB24 packet.
///
/// The output is what `ffplay -f rawvideo -pixel_format rgb24` expects.
#[derive(Debug)]
pub struct RawVideoCodec {
    settings: EncoderSettings,
    queue: VecDeque<Packet>,
    eof: bool,
}

impl RawVideoCodec {
    pub fn open(settings: EncoderSettings) -> ReelResult<Self> {
        settings.validate()?;
        if settings.codec != RAW_CODEC_NAME {
            return Err(ReelError::setup(format!(
                "raw codec cannot open '{}'",
                settings.codec
            )));
        }
        Ok(Self {
            settings,
            queue: VecDeque::new(),
            eof: false,
        })
    }
}

impl VideoCodec for RawVideoCodec {
    type Params = StreamParams;

    fn name(&self) -> &str {
        RAW_CODEC_NAME
    }

    fn time_base(&self) -> Rational {
        self.settings.time_base()
    }

    fn stream_params(&self) -> StreamParams {
        StreamParams {
            kind: MediaKind::Video,
            codec: RAW_CODEC_NAME.to_string(),
            width: self.settings.width,
            height: self.settings.height,
            bit_rate: self.settings.bit_rate,
        }
    }

    fn send_frame(&mut self, frame: Option<&EncoderFrame>) -> ReelResult<SendStatus> {
        if self.eof {
            return Err(ReelError::encoder("raw codec received input after end-of-stream"));
        }
        let Some(frame) = frame else {
            self.eof = true;
            return Ok(SendStatus::Accepted);
        };

        if frame.width() != self.settings.width || frame.height() != self.settings.height {
            return Err(ReelError::encoder(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width(),
                frame.height(),
                self.settings.width,
                self.settings.height
            )));
        }
        let pts = frame
            .pts()
            .ok_or_else(|| ReelError::encoder("raw codec received a frame without pts"))?;

        let mut packet = Packet::new(frame.to_packed_rgb(), self.time_base());
        packet.pts = Some(pts);
        packet.dts = Some(pts);
        packet.duration = 1;
        packet.is_key = true;
        self.queue.push_back(packet);
        Ok(SendStatus::Accepted)
    }

    fn receive_packet(&mut self) -> ReelResult<Receive> {
        if let Some(p) = self.queue.pop_front() {
            return Ok(Receive::Packet(p));
        }
        Ok(if self.eof {
            Receive::Eof
        } else {
            Receive::Again
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/codec.rs"]
mod tests;
