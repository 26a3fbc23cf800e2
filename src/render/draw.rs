use vello_cpu::kurbo::Shape as _;

use crate::foundation::core::{Point, Rgb8};
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::font::FontFace;
use crate::render::surface::{SURFACE_BYTES_PER_PIXEL, Surface};

/// Tolerance used when flattening circles into path segments.
const CIRCLE_TOLERANCE: f64 = 0.1;

/// Rendering context handed to a frame source for the duration of one frame.
///
/// Primitives are recorded into a `vello_cpu` scene and rasterized by
/// [`finish_into`](Self::finish_into). Every primitive is filled with the current color under the
/// current transform; the paint starts out black, matching what scripts have always assumed.
pub struct DrawContext {
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
    width: u16,
    height: u16,
    color: Rgb8,
    transform: kurbo::Affine,
    font: Option<FontFace>,
    font_size: f32,
}

impl DrawContext {
    pub fn new(width: u32, height: u32, font: Option<FontFace>, font_size: f32) -> ReelResult<Self> {
        if width == 0 || height == 0 {
            return Err(ReelError::validation("draw context width/height must be non-zero"));
        }
        let width_u16: u16 = width
            .try_into()
            .map_err(|_| ReelError::validation("draw context width exceeds u16"))?;
        let height_u16: u16 = height
            .try_into()
            .map_err(|_| ReelError::validation("draw context height exceeds u16"))?;

        Ok(Self {
            ctx: vello_cpu::RenderContext::new(width_u16, height_u16),
            pixmap: vello_cpu::Pixmap::new(width_u16, height_u16),
            width: width_u16,
            height: height_u16,
            color: Rgb8::BLACK,
            transform: kurbo::Affine::IDENTITY,
            font,
            font_size,
        })
    }

    pub fn width(&self) -> u32 {
        u32::from(self.width)
    }

    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    pub fn font(&self) -> Option<&FontFace> {
        self.font.as_ref()
    }

    /// Drop everything drawn so far and cover the canvas with `color`.
    ///
    /// Color and transform state are reset to black and identity.
    pub fn clear(&mut self, color: Rgb8) {
        self.ctx.reset();
        self.color = Rgb8::BLACK;
        self.transform = kurbo::Affine::IDENTITY;
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(to_cpu_color(color));
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.width),
            f64::from(self.height),
        ));
    }

    pub fn color(&self) -> Rgb8 {
        self.color
    }

    pub fn set_color(&mut self, color: Rgb8) {
        self.color = color;
    }

    pub fn transform(&self) -> kurbo::Affine {
        self.transform
    }

    pub fn set_transform(&mut self, transform: kurbo::Affine) {
        self.transform = transform;
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
    }

    /// Straight segment of width `thickness` with flat ends.
    pub fn line(&mut self, thickness: f64, from: Point, to: Point) {
        let d = to - from;
        let len = d.hypot();
        if len == 0.0 || thickness <= 0.0 {
            return;
        }
        let n = kurbo::Vec2::new(-d.y, d.x) * (thickness / (2.0 * len));
        self.fill_polygon(&[from + n, to + n, to - n, from - n]);
    }

    /// Filled quadrilateral through the four corners in order.
    pub fn quad(&mut self, corners: [Point; 4]) {
        self.fill_polygon(&corners);
    }

    pub fn circle(&mut self, radius: f64, center: Point) {
        if radius <= 0.0 {
            return;
        }
        self.apply_paint();
        let circle = vello_cpu::kurbo::Circle::new(point_to_cpu(center), radius);
        self.ctx.fill_path(&circle.to_path(CIRCLE_TOLERANCE));
    }

    /// Draw the glyph for character `code` with its origin at `position`.
    ///
    /// `size` becomes the current glyph size used by [`glyph_extents`](Self::glyph_extents).
    pub fn glyph(&mut self, size: f32, code: u32, position: Point) -> ReelResult<()> {
        let font = self
            .font
            .as_ref()
            .ok_or_else(|| ReelError::script("glyph drawn without a loaded font"))?;
        let glyph = vello_cpu::Glyph {
            id: u32::from(font.glyph_index(code)),
            x: position.x as f32,
            y: position.y as f32,
        };
        let data = font.data().clone();

        self.font_size = size;
        self.apply_paint();
        self.ctx
            .glyph_run(&data)
            .font_size(size)
            .fill_glyphs(std::iter::once(glyph));
        Ok(())
    }

    /// Ink extents (width, height) of character `code` at the current glyph size.
    pub fn glyph_extents(&self, code: u32) -> ReelResult<(f64, f64)> {
        let font = self
            .font
            .as_ref()
            .ok_or_else(|| ReelError::script("glyph measured without a loaded font"))?;
        Ok(font.extents(font.glyph_index(code), self.font_size))
    }

    /// Rasterize the recorded frame into `surface` and start a new, empty scene.
    pub fn finish_into(&mut self, surface: &mut Surface) -> ReelResult<()> {
        if surface.width() != self.width() || surface.height() != self.height() {
            return Err(ReelError::validation(format!(
                "surface is {}x{}, draw context is {}x{}",
                surface.width(),
                surface.height(),
                self.width,
                self.height
            )));
        }

        clear_pixmap(&mut self.pixmap);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);
        self.ctx.reset();

        let src = self.pixmap.data_as_u8_slice();
        let row_bytes = usize::from(self.width) * 4;
        for y in 0..surface.height() {
            let start = y as usize * row_bytes;
            let src_row = &src[start..start + row_bytes];
            for (s, d) in src_row
                .chunks_exact(4)
                .zip(surface.row_mut(y).chunks_exact_mut(SURFACE_BYTES_PER_PIXEL))
            {
                // premultiplied RGBA over black is the RGB triplet itself
                d.copy_from_slice(&[s[2], s[1], s[0], 0]);
            }
        }
        Ok(())
    }

    fn apply_paint(&mut self) {
        self.ctx.set_transform(affine_to_cpu(self.transform));
        self.ctx.set_paint(to_cpu_color(self.color));
    }

    fn fill_polygon(&mut self, points: &[Point]) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let mut path = vello_cpu::kurbo::BezPath::new();
        path.move_to(point_to_cpu(*first));
        for p in rest {
            path.line_to(point_to_cpu(*p));
        }
        path.close_path();

        self.apply_paint();
        self.ctx.fill_path(&path);
    }
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap) {
    pixmap.data_as_u8_slice_mut().fill(0);
}

fn to_cpu_color(c: Rgb8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, 255)
}

fn affine_to_cpu(a: kurbo::Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

#[cfg(test)]
#[path = "../../tests/unit/render/draw.rs"]
mod tests;
