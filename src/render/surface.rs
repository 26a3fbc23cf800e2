use crate::foundation::core::Rgb8;
use crate::foundation::error::{ReelError, ReelResult};

/// Bytes per Surface pixel: blue, green, red, padding.
pub const SURFACE_BYTES_PER_PIXEL: usize = 4;

/// Rendered frame as produced by the drawing backend.
///
/// Pixels are 32-bit little-endian words laid out as blue, green, red, padding in memory. Rows
/// start every `stride` bytes; `stride` may exceed `width * 4`, and the padding bytes at the end
/// of a row are never pixel data.
#[derive(Clone, Debug)]
pub struct Surface {
    width: u32,
    height: u32,
    stride: usize,
    data: Vec<u8>,
}

impl Surface {
    /// Surface with tight rows (`stride == width * 4`).
    pub fn new(width: u32, height: u32) -> ReelResult<Self> {
        Self::with_stride(width, height, width as usize * SURFACE_BYTES_PER_PIXEL)
    }

    /// Surface whose stride is rounded up to a multiple of `align` bytes.
    pub fn aligned(width: u32, height: u32, align: usize) -> ReelResult<Self> {
        if align == 0 || !align.is_multiple_of(SURFACE_BYTES_PER_PIXEL) {
            return Err(ReelError::validation(
                "surface alignment must be a non-zero multiple of 4",
            ));
        }
        let tight = width as usize * SURFACE_BYTES_PER_PIXEL;
        Self::with_stride(width, height, tight.div_ceil(align) * align)
    }

    pub fn with_stride(width: u32, height: u32, stride: usize) -> ReelResult<Self> {
        if width == 0 || height == 0 {
            return Err(ReelError::validation("surface width/height must be non-zero"));
        }
        if stride < width as usize * SURFACE_BYTES_PER_PIXEL {
            return Err(ReelError::validation(format!(
                "surface stride {stride} is smaller than {} bytes per row",
                width as usize * SURFACE_BYTES_PER_PIXEL
            )));
        }
        Ok(Self {
            width,
            height,
            stride,
            data: vec![0u8; stride * height as usize],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Distance in bytes between the starts of two consecutive rows.
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "surface pixel ({x}, {y}) out of bounds for {}x{}",
            self.width,
            self.height
        );
        self.stride * y as usize + SURFACE_BYTES_PER_PIXEL * x as usize
    }

    /// The raw 32-bit word at `(x, y)`: `0xXXRRGGBB`.
    pub fn pixel(&self, x: u32, y: u32) -> u32 {
        let o = self.offset(x, y);
        u32::from_le_bytes([
            self.data[o],
            self.data[o + 1],
            self.data[o + 2],
            self.data[o + 3],
        ])
    }

    pub fn rgb(&self, x: u32, y: u32) -> Rgb8 {
        let v = self.pixel(x, y);
        Rgb8::new((v >> 16) as u8, (v >> 8) as u8, v as u8)
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, value: u32) {
        let o = self.offset(x, y);
        self.data[o..o + SURFACE_BYTES_PER_PIXEL].copy_from_slice(&value.to_le_bytes());
    }

    pub fn set_rgb(&mut self, x: u32, y: u32, c: Rgb8) {
        self.set_pixel(x, y, pack_xrgb(c));
    }

    /// Pixel bytes of row `y`, without the row padding.
    pub fn row(&self, y: u32) -> &[u8] {
        assert!(y < self.height, "surface row {y} out of bounds");
        let start = self.stride * y as usize;
        &self.data[start..start + self.width as usize * SURFACE_BYTES_PER_PIXEL]
    }

    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        assert!(y < self.height, "surface row {y} out of bounds");
        let start = self.stride * y as usize;
        let len = self.width as usize * SURFACE_BYTES_PER_PIXEL;
        &mut self.data[start..start + len]
    }

    pub fn fill(&mut self, c: Rgb8) {
        let px = pack_xrgb(c).to_le_bytes();
        for y in 0..self.height {
            for chunk in self.row_mut(y).chunks_exact_mut(SURFACE_BYTES_PER_PIXEL) {
                chunk.copy_from_slice(&px);
            }
        }
    }
}

/// Pack an opaque color into the Surface word layout (padding byte left at zero).
pub fn pack_xrgb(c: Rgb8) -> u32 {
    (u32::from(c.r) << 16) | (u32::from(c.g) << 8) | u32::from(c.b)
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
