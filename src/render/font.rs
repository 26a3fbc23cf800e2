use std::path::Path;

use crate::foundation::error::{ReelError, ReelResult};

/// A loaded font: charmap and outline metrics for measuring, plus the raw font data the
/// rasterizer draws glyph runs from.
#[derive(Clone)]
pub struct FontFace {
    metrics: fontdue::Font,
    data: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("glyphs", &self.metrics.glyph_count())
            .finish_non_exhaustive()
    }
}

impl FontFace {
    pub fn from_path(path: &Path) -> ReelResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            ReelError::setup(format!("failed to read font '{}': {e}", path.display()))
        })?;
        Self::from_bytes(bytes).map_err(|e| match e {
            ReelError::Setup(msg) => ReelError::setup(format!("{msg} ('{}')", path.display())),
            other => other,
        })
    }

    pub fn from_bytes(bytes: Vec<u8>) -> ReelResult<Self> {
        let metrics = fontdue::Font::from_bytes(bytes.as_slice(), fontdue::FontSettings::default())
            .map_err(|e| ReelError::setup(format!("failed to parse font: {e}")))?;
        let data = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), 0);
        Ok(Self { metrics, data })
    }

    /// Glyph index for a character code. Unmapped codes resolve to 0, the font's
    /// missing-glyph box.
    pub fn glyph_index(&self, code: u32) -> u16 {
        char::from_u32(code)
            .map(|c| self.metrics.lookup_glyph_index(c))
            .unwrap_or(0)
    }

    /// Ink width and height of glyph `index` at `size` pixels per em.
    pub fn extents(&self, index: u16, size: f32) -> (f64, f64) {
        if size <= 0.0 {
            return (0.0, 0.0);
        }
        let bounds = self.metrics.metrics_indexed(index, size).bounds;
        (f64::from(bounds.width), f64::from(bounds.height))
    }

    pub(crate) fn data(&self) -> &vello_cpu::peniko::FontData {
        &self.data
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/font.rs"]
mod tests;
