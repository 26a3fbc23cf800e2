use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::ReelResult;
use crate::output::packed_rgb;
use crate::render::surface::Surface;

/// Write `surface` as an 8-bit RGB PNG.
pub fn write_png(surface: &Surface, path: &Path) -> ReelResult<()> {
    let rgb = packed_rgb(surface)?;
    image::save_buffer_with_format(
        path,
        &rgb,
        surface.width(),
        surface.height(),
        image::ColorType::Rgb8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    tracing::info!(path = %path.display(), "wrote still");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/output/still.rs"]
mod tests;
