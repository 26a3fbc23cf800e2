use std::path::Path;

use ffmpeg_next::{codec, format, media};

use crate::audio::PacketSource;
use crate::encode::packet::Packet;
use crate::ffmpeg::{from_av, init};
use crate::foundation::core::Rational;
use crate::foundation::error::{ReelError, ReelResult};

/// Reads the best audio stream of a media file as encoded packets.
pub struct FfmpegAudioSource {
    input: format::context::Input,
    stream_index: usize,
    time_base: Rational,
    params: codec::Parameters,
}

impl FfmpegAudioSource {
    pub fn open(path: &Path) -> ReelResult<Self> {
        init()?;
        let input = format::input(&path).map_err(|e| {
            ReelError::setup(format!("failed to open audio '{}': {e}", path.display()))
        })?;
        let stream = input.streams().best(media::Type::Audio).ok_or_else(|| {
            ReelError::setup(format!("'{}' has no audio stream", path.display()))
        })?;
        let stream_index = stream.index();
        let time_base = from_av(stream.time_base());
        let params = stream.parameters();
        tracing::debug!(path = %path.display(), stream_index, %time_base, "audio source open");

        Ok(Self {
            input,
            stream_index,
            time_base,
            params,
        })
    }
}

impl PacketSource for FfmpegAudioSource {
    type Params = codec::Parameters;

    fn time_base(&self) -> Rational {
        self.time_base
    }

    fn stream_params(&self) -> codec::Parameters {
        self.params.clone()
    }

    fn next_packet(&mut self) -> ReelResult<Option<Packet>> {
        loop {
            let mut av = ffmpeg_next::Packet::empty();
            if !read_outcome(av.read(&mut self.input))? {
                return Ok(None);
            }
            if av.stream() != self.stream_index {
                continue;
            }
            let mut p = Packet::new(av.data().map(<[u8]>::to_vec).unwrap_or_default(), self.time_base);
            p.pts = av.pts();
            p.dts = av.dts();
            p.duration = av.duration();
            p.is_key = av.is_key();
            p.stream_index = self.stream_index;
            return Ok(Some(p));
        }
    }
}

/// `true` when a packet was read, `false` at end of input. Any other read failure is fatal.
fn read_outcome(res: Result<(), ffmpeg_next::Error>) -> ReelResult<bool> {
    match res {
        Ok(()) => Ok(true),
        Err(ffmpeg_next::Error::Eof) => Ok(false),
        Err(e) => Err(ReelError::container(format!("failed to read audio packet: {e}"))),
    }
}
