use std::path::Path;

use anyhow::Context as _;

use crate::encode::codec::EncoderSettings;
use crate::foundation::core::{Fps, Rgb8};
use crate::foundation::error::{ReelError, ReelResult};

/// Run-wide rendering and encoding parameters. Fixed for the whole run.
///
/// Every field has a default, so a JSON config file only needs the fields it changes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub fps: Fps,
    /// Bits per second.
    pub bit_rate: u64,
    pub gop_size: u32,
    /// Encoder name; `raw` selects the built-in uncompressed codec.
    pub codec: String,
    /// Color every frame is cleared to before the frame source draws.
    pub background: Rgb8,
    /// Row alignment of the rendered surface in bytes.
    pub surface_align: usize,
    /// Glyph size used for measuring until a glyph is drawn.
    pub font_size: f32,
    /// Replace existing output files instead of refusing to start.
    pub overwrite: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 854,
            height: 480,
            fps: Fps::default(),
            bit_rate: 2_500_000,
            gop_size: 90,
            codec: "libx264rgb".to_string(),
            background: Rgb8::WHITE,
            surface_align: 64,
            font_size: 32.0,
            overwrite: true,
        }
    }
}

impl RenderConfig {
    pub fn from_path(path: &Path) -> ReelResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_str(&text).map_err(|e| {
            ReelError::validation(format!("invalid config '{}': {e}", path.display()))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> ReelResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ReelError::validation("width/height must be non-zero"));
        }
        if self.width > u32::from(u16::MAX) || self.height > u32::from(u16::MAX) {
            return Err(ReelError::validation(format!(
                "width/height must be at most {}",
                u16::MAX
            )));
        }
        Fps::new(self.fps.num, self.fps.den)?;
        if self.gop_size == 0 {
            return Err(ReelError::validation("gop_size must be non-zero"));
        }
        if self.codec.trim().is_empty() {
            return Err(ReelError::validation("codec must be non-empty"));
        }
        if self.surface_align == 0 || !self.surface_align.is_multiple_of(4) {
            return Err(ReelError::validation(
                "surface_align must be a non-zero multiple of 4",
            ));
        }
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(ReelError::validation("font_size must be positive"));
        }
        Ok(())
    }

    pub fn encoder_settings(&self) -> EncoderSettings {
        EncoderSettings {
            codec: self.codec.clone(),
            width: self.width,
            height: self.height,
            bit_rate: self.bit_rate,
            gop_size: self.gop_size,
            fps: self.fps,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
