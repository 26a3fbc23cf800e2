use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::{Point, Rgb8};
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::draw::DrawContext;
use crate::source::{FrameSource, FrameStatus};

/// Declarative frame source: timed shapes with optional linear motion, loaded from JSON.
///
/// ```json
/// {
///   "duration": 2.0,
///   "items": [
///     { "op": "circle", "radius": 20, "center": { "x": 40, "y": 240 },
///       "velocity": { "x": 200, "y": 0 } },
///     { "op": "glyph_centered", "size": 64, "code": 82, "center": { "x": 427, "y": 240 },
///       "color": [200, 30, 30], "start": 0.5 }
///   ]
/// }
/// ```
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ReelScript {
    /// Seconds. The first frame whose time reaches it ends the sequence.
    pub duration: f64,
    /// Replaces the configured background when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Rgb8>,
    #[serde(default)]
    pub items: Vec<ScriptItem>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ScriptItem {
    #[serde(default)]
    pub start: f64,
    /// Exclusive. Visible until the end of the script when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<f64>,
    #[serde(default = "default_item_color")]
    pub color: Rgb8,
    /// Pixels per second, applied from `start`.
    #[serde(default, skip_serializing_if = "is_still")]
    pub velocity: kurbo::Vec2,
    #[serde(flatten)]
    pub shape: Shape,
}

fn default_item_color() -> Rgb8 {
    Rgb8::BLACK
}

fn is_still(v: &kurbo::Vec2) -> bool {
    *v == kurbo::Vec2::ZERO
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Shape {
    Line {
        thickness: f64,
        from: Point,
        to: Point,
    },
    Quad {
        corners: [Point; 4],
    },
    Circle {
        radius: f64,
        center: Point,
    },
    /// Glyph with its origin (baseline start) at `position`.
    Glyph {
        size: f32,
        code: u32,
        position: Point,
    },
    /// Glyph whose ink box is centered on `center`.
    GlyphCentered {
        size: f32,
        code: u32,
        center: Point,
    },
}

impl Shape {
    fn needs_font(&self) -> bool {
        matches!(self, Self::Glyph { .. } | Self::GlyphCentered { .. })
    }
}

impl ReelScript {
    pub fn from_json_str(s: &str) -> ReelResult<Self> {
        serde_json::from_str(s).map_err(|e| ReelError::script(format!("invalid script: {e}")))
    }

    pub fn from_path(path: &Path) -> ReelResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read script '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn uses_glyphs(&self) -> bool {
        self.items.iter().any(|i| i.shape.needs_font())
    }

    /// Check value ranges, and that glyph items have a font to draw with.
    pub fn validate(&self, font_loaded: bool) -> ReelResult<()> {
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(ReelError::validation(
                "script duration must be a finite number of seconds >= 0",
            ));
        }
        for (i, item) in self.items.iter().enumerate() {
            if !item.start.is_finite() || item.start < 0.0 {
                return Err(ReelError::validation(format!(
                    "script item {i} has an invalid start time"
                )));
            }
            if let Some(end) = item.end
                && (end.is_nan() || end <= item.start)
            {
                return Err(ReelError::validation(format!(
                    "script item {i} ends before it starts"
                )));
            }
            let sized_ok = match &item.shape {
                Shape::Line { thickness, .. } => *thickness > 0.0,
                Shape::Circle { radius, .. } => *radius > 0.0,
                Shape::Glyph { size, .. } | Shape::GlyphCentered { size, .. } => *size > 0.0,
                Shape::Quad { .. } => true,
            };
            if !sized_ok {
                return Err(ReelError::validation(format!(
                    "script item {i} has a non-positive size"
                )));
            }
        }
        if self.uses_glyphs() && !font_loaded {
            return Err(ReelError::setup("script draws glyphs but no font was loaded"));
        }
        Ok(())
    }

    fn draw_item(item: &ScriptItem, ctx: &mut DrawContext, time: f64) -> ReelResult<()> {
        let offset = item.velocity * (time - item.start);
        ctx.set_color(item.color);
        ctx.set_transform(kurbo::Affine::translate(offset));
        match &item.shape {
            Shape::Line {
                thickness,
                from,
                to,
            } => ctx.line(*thickness, *from, *to),
            Shape::Quad { corners } => ctx.quad(*corners),
            Shape::Circle { radius, center } => ctx.circle(*radius, *center),
            Shape::Glyph {
                size,
                code,
                position,
            } => ctx.glyph(*size, *code, *position)?,
            Shape::GlyphCentered { size, code, center } => {
                ctx.set_font_size(*size);
                let (w, h) = ctx.glyph_extents(*code)?;
                let origin = Point::new(center.x - w / 2.0, center.y + h / 2.0);
                ctx.glyph(*size, *code, origin)?;
            }
        }
        Ok(())
    }
}

impl FrameSource for ReelScript {
    fn render_frame(&mut self, ctx: &mut DrawContext, time: f64) -> ReelResult<FrameStatus> {
        if time >= self.duration {
            return Ok(FrameStatus::Finished);
        }
        if let Some(bg) = self.background {
            ctx.clear(bg);
        }
        for item in &self.items {
            let visible = time >= item.start && item.end.is_none_or(|end| time < end);
            if visible {
                Self::draw_item(item, ctx, time)?;
            }
        }
        ctx.set_transform(kurbo::Affine::IDENTITY);
        Ok(FrameStatus::Drawn)
    }
}

#[cfg(test)]
#[path = "../tests/unit/script/script.rs"]
mod tests;
