use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use reelcast::output::prepare_output_path;
use reelcast::{
    Container, DrawContext, ElementaryStream, FontFace, Fps, RAW_CODEC_NAME, RawVideoCodec,
    ReelScript, RenderConfig, RenderStats, VideoCodec, VideoPipeline, render_single_frame,
    write_pdf, write_png,
};

#[derive(Parser, Debug)]
#[command(name = "reelcast", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a video container (format from the file extension), optionally with an audio track.
    Render(RenderArgs),
    /// Render a bare encoded stream (`--codec raw` needs no libav).
    Stream(StreamArgs),
    /// Render a single frame as a PNG.
    Still(StaticArgs),
    /// Render a single frame as a one-page PDF.
    Page(StaticArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Reel script JSON.
    #[arg(long)]
    script: PathBuf,

    /// Font file for glyph items.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Render config JSON; flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// Frame rate as `N` or `N/D`.
    #[arg(long, value_parser = parse_fps)]
    fps: Option<Fps>,

    /// Encoder name.
    #[arg(long)]
    codec: Option<String>,

    /// Bits per second.
    #[arg(long)]
    bit_rate: Option<u64>,

    /// Fail instead of replacing an existing output file.
    #[arg(long)]
    no_clobber: bool,

    /// Output path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Media file whose best audio stream is copied into the output.
    ///
    /// The stream keeps its source codec tag, so the output format must accept that tag. Copy
    /// within a format family (webm or mka into mkv, m4a into mp4); crossing families can fail
    /// when the header is written.
    #[arg(long)]
    audio: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct StreamArgs {
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args, Debug)]
struct StaticArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Script time to draw, in seconds.
    #[arg(long, default_value_t = 0.0)]
    time: f64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Stream(args) => cmd_stream(args),
        Command::Still(args) => cmd_static(args, write_png),
        Command::Page(args) => cmd_static(args, write_pdf),
    }
}

fn parse_fps(s: &str) -> Result<Fps, String> {
    let (num, den) = match s.split_once('/') {
        Some((n, d)) => (n.trim(), d.trim()),
        None => (s.trim(), "1"),
    };
    let num: u32 = num.parse().map_err(|e| format!("bad fps numerator: {e}"))?;
    let den: u32 = den.parse().map_err(|e| format!("bad fps denominator: {e}"))?;
    Fps::new(num, den).map_err(|e| e.to_string())
}

struct Prepared {
    cfg: RenderConfig,
    ctx: DrawContext,
    script: ReelScript,
}

fn prepare(args: &CommonArgs) -> anyhow::Result<Prepared> {
    let mut cfg = match &args.config {
        Some(path) => RenderConfig::from_path(path)?,
        None => RenderConfig::default(),
    };
    if let Some(w) = args.width {
        cfg.width = w;
    }
    if let Some(h) = args.height {
        cfg.height = h;
    }
    if let Some(fps) = args.fps {
        cfg.fps = fps;
    }
    if let Some(codec) = &args.codec {
        cfg.codec = codec.clone();
    }
    if let Some(bit_rate) = args.bit_rate {
        cfg.bit_rate = bit_rate;
    }
    if args.no_clobber {
        cfg.overwrite = false;
    }
    cfg.validate()?;

    let font = args.font.as_deref().map(FontFace::from_path).transpose()?;
    let script = ReelScript::from_path(&args.script)?;
    script.validate(font.is_some())?;

    let ctx = DrawContext::new(cfg.width, cfg.height, font, cfg.font_size)?;
    prepare_output_path(&args.out, cfg.overwrite)?;
    Ok(Prepared { cfg, ctx, script })
}

fn run<C, K>(p: Prepared, codec: C, container: K) -> anyhow::Result<RenderStats>
where
    C: VideoCodec,
    K: Container<Params = C::Params>,
{
    let Prepared {
        cfg,
        ctx,
        mut script,
    } = p;
    let (stats, _) = VideoPipeline::new(&cfg, ctx, codec, container)?.run(&mut script)?;
    Ok(stats)
}

fn report(out: &Path, stats: &RenderStats) {
    eprintln!(
        "wrote {} ({} frames, {} video packets, {} audio packets, {:.2}s)",
        out.display(),
        stats.frames_submitted,
        stats.video_packets,
        stats.audio_packets,
        stats.elapsed.as_secs_f64()
    );
}

#[cfg(feature = "ffmpeg")]
fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    use reelcast::ffmpeg::{
        codec::FfmpegVideoCodec, container::FfmpegContainer, source::FfmpegAudioSource,
    };

    let p = prepare(&args.common)?;
    let out = &args.common.out;
    let container = FfmpegContainer::create(out)?;
    let codec = FfmpegVideoCodec::open(&p.cfg.encoder_settings(), container.needs_global_header())?;

    let Prepared {
        cfg,
        ctx,
        mut script,
    } = p;
    let mut pipeline = VideoPipeline::new(&cfg, ctx, codec, container)?;
    if let Some(audio) = &args.audio {
        pipeline = pipeline.with_audio(FfmpegAudioSource::open(audio)?)?;
    }
    let (stats, _) = pipeline.run(&mut script)?;
    report(out, &stats);
    Ok(())
}

#[cfg(not(feature = "ffmpeg"))]
fn cmd_render(_args: RenderArgs) -> anyhow::Result<()> {
    anyhow::bail!("container output needs the `ffmpeg` feature; try `stream --codec raw`")
}

fn cmd_stream(args: StreamArgs) -> anyhow::Result<()> {
    let p = prepare(&args.common)?;
    let out = &args.common.out;

    let stats = if p.cfg.codec == RAW_CODEC_NAME {
        let codec = RawVideoCodec::open(p.cfg.encoder_settings())?;
        run(p, codec, ElementaryStream::create(out)?)?
    } else {
        stream_with_libav(p, out)?
    };
    report(out, &stats);
    Ok(())
}

#[cfg(feature = "ffmpeg")]
fn stream_with_libav(p: Prepared, out: &Path) -> anyhow::Result<RenderStats> {
    use reelcast::ffmpeg::codec::FfmpegVideoCodec;

    let codec = FfmpegVideoCodec::open(&p.cfg.encoder_settings(), false)?;
    run(p, codec, ElementaryStream::create(out)?)
}

#[cfg(not(feature = "ffmpeg"))]
fn stream_with_libav(p: Prepared, _out: &Path) -> anyhow::Result<RenderStats> {
    anyhow::bail!(
        "encoder '{}' needs the `ffmpeg` feature; only `{RAW_CODEC_NAME}` is built in",
        p.cfg.codec
    )
}

fn cmd_static(
    args: StaticArgs,
    write: fn(&reelcast::Surface, &Path) -> reelcast::ReelResult<()>,
) -> anyhow::Result<()> {
    let Prepared {
        cfg,
        mut ctx,
        mut script,
    } = prepare(&args.common)?;
    let surface = render_single_frame(&cfg, &mut ctx, &mut script, args.time)?;
    let out = &args.common.out;
    write(&surface, out).with_context(|| format!("write '{}'", out.display()))?;
    eprintln!("wrote {}", out.display());
    Ok(())
}
