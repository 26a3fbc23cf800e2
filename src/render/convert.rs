use crate::encode::frame::{EncoderFrame, RGB24_BYTES_PER_PIXEL};
use crate::render::surface::{SURFACE_BYTES_PER_PIXEL, Surface};

/// Copy a rendered [`Surface`] into the packed RGB24 layout of an [`EncoderFrame`].
///
/// Each source word is read as `0xXXRRGGBB` at `stride * y + 4 * x`; each destination triplet
/// lands at `linesize * y + 3 * x`. The two row pitches are independent.
///
/// Panics if the dimensions differ or the frame has not been made writable: both are caller
/// bugs, not runtime conditions.
pub fn surface_to_rgb24(src: &Surface, dst: &mut EncoderFrame) {
    assert_eq!(
        (src.width(), src.height()),
        (dst.width(), dst.height()),
        "surface and encoder frame dimensions differ"
    );
    assert!(
        dst.is_writable(),
        "encoder frame must be made writable before conversion"
    );

    for y in 0..src.height() {
        let src_row = src.row(y);
        let dst_row = dst.row_mut(y);
        for (s, d) in src_row
            .chunks_exact(SURFACE_BYTES_PER_PIXEL)
            .zip(dst_row.chunks_exact_mut(RGB24_BYTES_PER_PIXEL))
        {
            let v = u32::from_le_bytes([s[0], s[1], s[2], s[3]]);
            d[0] = (v >> 16) as u8;
            d[1] = (v >> 8) as u8;
            d[2] = v as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/convert.rs"]
mod tests;
