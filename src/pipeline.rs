use std::time::{Duration, Instant};

use crate::audio::{AudioPassthrough, PacketSource};
use crate::config::RenderConfig;
use crate::encode::codec::VideoCodec;
use crate::encode::driver::EncoderDriver;
use crate::foundation::core::{Fps, FrameIndex, Rgb8};
use crate::foundation::error::{ReelError, ReelResult};
use crate::mux::container::{Container, MediaKind, StreamDescriptor};
use crate::mux::muxer::Muxer;
use crate::render::convert::surface_to_rgb24;
use crate::render::draw::DrawContext;
use crate::render::surface::Surface;
use crate::source::{FrameSource, FrameStatus};

/// Audio source carried by a pipeline, erased so that pipelines with and without audio share a
/// type.
pub type BoxedPacketSource<P> = Box<dyn PacketSource<Params = P>>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub frames_submitted: u64,
    pub video_packets: u64,
    pub audio_packets: u64,
    pub elapsed: Duration,
}

/// The render loop: frame source → surface → encoder frame → encoder → muxer, then audio.
///
/// Single-threaded and synchronous. The first error from any stage aborts the run; nothing is
/// retried and the container is left as-is.
pub struct VideoPipeline<C, K>
where
    C: VideoCodec,
    K: Container<Params = C::Params>,
{
    ctx: DrawContext,
    surface: Surface,
    background: Rgb8,
    fps: Fps,
    driver: EncoderDriver<C>,
    muxer: Muxer<K>,
    audio: Option<AudioPassthrough<BoxedPacketSource<K::Params>>>,
}

impl<C, K> VideoPipeline<C, K>
where
    C: VideoCodec,
    K: Container<Params = C::Params>,
{
    /// Wire an opened codec to a container and declare the video stream.
    pub fn new(cfg: &RenderConfig, ctx: DrawContext, codec: C, container: K) -> ReelResult<Self> {
        cfg.validate()?;
        if ctx.width() != cfg.width || ctx.height() != cfg.height {
            return Err(ReelError::validation(format!(
                "draw context is {}x{}, configured canvas is {}x{}",
                ctx.width(),
                ctx.height(),
                cfg.width,
                cfg.height
            )));
        }
        let surface = Surface::aligned(cfg.width, cfg.height, cfg.surface_align)?;

        let mut muxer = Muxer::new(container);
        muxer.declare_stream(MediaKind::Video, codec.time_base(), &codec.stream_params())?;
        let driver = EncoderDriver::new(codec, &cfg.encoder_settings())?;

        Ok(Self {
            ctx,
            surface,
            background: cfg.background,
            fps: cfg.fps,
            driver,
            muxer,
            audio: None,
        })
    }

    /// Add a passthrough audio stream, forwarded after the last video packet.
    pub fn with_audio<A>(mut self, source: A) -> ReelResult<Self>
    where
        A: PacketSource<Params = K::Params> + 'static,
    {
        self.muxer.declare_stream(
            MediaKind::Audio,
            source.time_base(),
            &source.stream_params(),
        )?;
        self.audio = Some(AudioPassthrough::new(Box::new(source)));
        Ok(self)
    }

    /// Run to completion and hand back the finished container.
    #[tracing::instrument(skip_all, fields(codec = self.driver.codec().name(), fps = self.fps.as_f64()))]
    pub fn run(mut self, source: &mut impl FrameSource) -> ReelResult<(RenderStats, K)> {
        let started = Instant::now();
        let mut stats = RenderStats::default();

        self.muxer.write_header()?;
        let video = self.stream(MediaKind::Video)?;
        self.driver.bind_output(video)?;

        let mut idx = FrameIndex(0);
        loop {
            let time = self.fps.frame_time_secs(idx);
            self.ctx.clear(self.background);
            if source.render_frame(&mut self.ctx, time)? == FrameStatus::Finished {
                break;
            }
            self.ctx.finish_into(&mut self.surface)?;

            let frame = self.driver.frame_mut();
            frame.make_writable();
            surface_to_rgb24(&self.surface, frame);
            frame.set_pts(idx.as_pts());
            stats.video_packets += self.driver.submit(&mut self.muxer)? as u64;
            stats.frames_submitted += 1;

            idx = idx.next();
        }
        tracing::debug!(frames = stats.frames_submitted, "frame source finished");

        stats.video_packets += self.driver.flush(&mut self.muxer)? as u64;

        if let Some(audio) = self.audio.as_mut() {
            let dest = self
                .muxer
                .stream(MediaKind::Audio)
                .ok_or_else(|| ReelError::state("audio source without an audio stream"))?;
            stats.audio_packets = audio.forward_all(dest, &mut self.muxer)?;
        }

        self.muxer.write_trailer()?;
        self.driver.close()?;

        stats.elapsed = started.elapsed();
        tracing::info!(
            frames = stats.frames_submitted,
            video_packets = stats.video_packets,
            audio_packets = stats.audio_packets,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "render finished"
        );
        Ok((stats, self.muxer.into_inner()))
    }

    fn stream(&self, kind: MediaKind) -> ReelResult<StreamDescriptor> {
        self.muxer
            .stream(kind)
            .ok_or_else(|| ReelError::state(format!("no {kind} stream declared")))
    }
}

#[cfg(test)]
#[path = "../tests/unit/pipeline/pipeline.rs"]
mod tests;
