use ffmpeg_next::util::error::EAGAIN;
use ffmpeg_next::{Dictionary, codec, format::Pixel, frame};

use crate::encode::codec::{EncoderSettings, Receive, SendStatus, VideoCodec};
use crate::encode::frame::{EncoderFrame, RGB24_BYTES_PER_PIXEL};
use crate::encode::packet::Packet;
use crate::ffmpeg::{init, to_av};
use crate::foundation::core::Rational;
use crate::foundation::error::{ReelError, ReelResult};

/// A libav video encoder looked up by name and fed packed RGB24.
pub struct FfmpegVideoCodec {
    encoder: ffmpeg_next::encoder::video::Encoder,
    name: String,
    time_base: Rational,
    width: u32,
    height: u32,
}

impl FfmpegVideoCodec {
    /// Open encoder `settings.codec`. `global_header` must match what the target container
    /// asks for (see [`FfmpegContainer::needs_global_header`]).
    ///
    /// [`FfmpegContainer::needs_global_header`]: crate::ffmpeg::container::FfmpegContainer::needs_global_header
    #[tracing::instrument(skip(settings), fields(codec = %settings.codec))]
    pub fn open(settings: &EncoderSettings, global_header: bool) -> ReelResult<Self> {
        settings.validate()?;
        init()?;

        let av_codec = ffmpeg_next::encoder::find_by_name(&settings.codec)
            .ok_or_else(|| ReelError::setup(format!("encoder '{}' not found", settings.codec)))?;

        let mut context = codec::context::Context::new_with_codec(av_codec);
        if global_header {
            context.set_flags(codec::Flags::GLOBAL_HEADER);
        }
        let mut encoder = context
            .encoder()
            .video()
            .map_err(|e| ReelError::setup(format!("'{}' is not a video encoder: {e}", settings.codec)))?;

        let time_base = settings.time_base();
        encoder.set_width(settings.width);
        encoder.set_height(settings.height);
        encoder.set_format(Pixel::RGB24);
        encoder.set_bit_rate(settings.bit_rate as usize);
        encoder.set_gop(settings.gop_size);
        encoder.set_frame_rate(Some(to_av(settings.fps.as_rational())));
        encoder.set_time_base(to_av(time_base));

        let encoder = encoder.open_with(Dictionary::new()).map_err(|e| {
            ReelError::setup(format!("failed to open encoder '{}': {e}", settings.codec))
        })?;
        tracing::debug!(%time_base, "libav encoder open");

        Ok(Self {
            encoder,
            name: settings.codec.clone(),
            time_base,
            width: settings.width,
            height: settings.height,
        })
    }

    fn av_frame(&self, src: &EncoderFrame) -> ReelResult<frame::Video> {
        if src.width() != self.width || src.height() != self.height {
            return Err(ReelError::encoder(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                src.width(),
                src.height(),
                self.width,
                self.height
            )));
        }
        let mut dst = frame::Video::new(Pixel::RGB24, self.width, self.height);
        let stride = dst.stride(0);
        let row_len = self.width as usize * RGB24_BYTES_PER_PIXEL;
        let data = dst.data_mut(0);
        for y in 0..self.height {
            let start = stride * y as usize;
            data[start..start + row_len].copy_from_slice(src.row(y));
        }
        dst.set_pts(src.pts());
        Ok(dst)
    }
}

impl VideoCodec for FfmpegVideoCodec {
    type Params = codec::Parameters;

    fn name(&self) -> &str {
        &self.name
    }

    fn time_base(&self) -> Rational {
        self.time_base
    }

    fn stream_params(&self) -> codec::Parameters {
        codec::Parameters::from(&self.encoder)
    }

    fn send_frame(&mut self, frame: Option<&EncoderFrame>) -> ReelResult<SendStatus> {
        let res = match frame {
            Some(f) => {
                let av = self.av_frame(f)?;
                self.encoder.send_frame(&av)
            }
            None => self.encoder.send_eof(),
        };
        match res {
            Ok(()) => Ok(SendStatus::Accepted),
            Err(ffmpeg_next::Error::Other { errno }) if errno == EAGAIN => Ok(SendStatus::Full),
            Err(e) => Err(ReelError::encoder(format!("error sending frame to encoder: {e}"))),
        }
    }

    fn receive_packet(&mut self) -> ReelResult<Receive> {
        let mut av = ffmpeg_next::Packet::empty();
        match self.encoder.receive_packet(&mut av) {
            Ok(()) => {
                let mut p = Packet::new(av.data().map(<[u8]>::to_vec).unwrap_or_default(), self.time_base);
                p.pts = av.pts();
                p.dts = av.dts();
                p.duration = av.duration();
                p.is_key = av.is_key();
                Ok(Receive::Packet(p))
            }
            Err(ffmpeg_next::Error::Other { errno }) if errno == EAGAIN => Ok(Receive::Again),
            Err(ffmpeg_next::Error::Eof) => Ok(Receive::Eof),
            Err(e) => Err(ReelError::encoder(format!("error encoding frame: {e}"))),
        }
    }
}
