//! Static outputs: one frame rendered outside the encoding pipeline.

pub mod document;
pub mod still;

use std::path::Path;

use crate::config::RenderConfig;
use crate::encode::frame::{EncoderFrame, RGB24_BYTES_PER_PIXEL};
use crate::foundation::error::{ReelError, ReelResult};
use crate::mux::elementary::ensure_parent_dir;
use crate::render::convert::surface_to_rgb24;
use crate::render::draw::DrawContext;
use crate::render::surface::Surface;
use crate::source::FrameSource;

/// Draw the frame a source produces at `time`. The returned status is ignored: a static output
/// always gets exactly one picture.
pub fn render_single_frame(
    cfg: &RenderConfig,
    ctx: &mut DrawContext,
    source: &mut impl FrameSource,
    time: f64,
) -> ReelResult<Surface> {
    let mut surface = Surface::aligned(ctx.width(), ctx.height(), cfg.surface_align)?;
    ctx.clear(cfg.background);
    let status = source.render_frame(ctx, time)?;
    tracing::debug!(time, ?status, "static frame drawn");
    ctx.finish_into(&mut surface)?;
    Ok(surface)
}

/// Tight packed RGB24 copy of a surface, row-major from the top.
pub fn packed_rgb(surface: &Surface) -> ReelResult<Vec<u8>> {
    let mut frame = EncoderFrame::with_linesize(
        surface.width(),
        surface.height(),
        surface.width() as usize * RGB24_BYTES_PER_PIXEL,
    )?;
    surface_to_rgb24(surface, &mut frame);
    Ok(frame.to_packed_rgb())
}

/// Create the parent directory and refuse to clobber an existing file unless allowed.
pub fn prepare_output_path(path: &Path, overwrite: bool) -> ReelResult<()> {
    ensure_parent_dir(path)?;
    if !overwrite && path.exists() {
        return Err(ReelError::setup(format!(
            "output file '{}' already exists",
            path.display()
        )));
    }
    Ok(())
}
