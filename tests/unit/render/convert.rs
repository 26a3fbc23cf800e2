use super::*;
use crate::foundation::core::Rgb8;

fn patterned(width: u32, height: u32, stride: usize) -> Surface {
    let mut s = Surface::with_stride(width, height, stride).unwrap();
    for y in 0..height {
        for x in 0..width {
            let c = Rgb8::new((x * 7) as u8, (y * 13) as u8, (x ^ y) as u8);
            s.set_rgb(x, y, c);
        }
    }
    s
}

#[test]
fn every_pixel_decodes_to_its_rgb_triplet() {
    let (w, h) = (7, 5);
    for stride in [w as usize * 4, w as usize * 4 + 4, w as usize * 4 + 100] {
        let src = patterned(w, h, stride);
        let mut dst = EncoderFrame::new(w, h).unwrap();
        surface_to_rgb24(&src, &mut dst);
        for y in 0..h {
            for x in 0..w {
                let c = src.rgb(x, y);
                assert_eq!(dst.rgb(x, y), [c.r, c.g, c.b], "stride {stride} at ({x},{y})");
            }
        }
    }
}

#[test]
fn output_is_stride_independent() {
    let (w, h) = (9, 4);
    let tight = patterned(w, h, w as usize * 4);
    let padded = patterned(w, h, w as usize * 4 + 16);

    let mut a = EncoderFrame::new(w, h).unwrap();
    let mut b = EncoderFrame::new(w, h).unwrap();
    surface_to_rgb24(&tight, &mut a);
    surface_to_rgb24(&padded, &mut b);

    assert_eq!(a.to_packed_rgb(), b.to_packed_rgb());
}

#[test]
fn padding_byte_is_ignored() {
    let mut s = Surface::new(1, 1).unwrap();
    s.set_pixel(0, 0, 0xAB10_2030);
    let mut f = EncoderFrame::new(1, 1).unwrap();
    surface_to_rgb24(&s, &mut f);
    assert_eq!(f.rgb(0, 0), [0x10, 0x20, 0x30]);
}

#[test]
fn frame_line_padding_is_not_written() {
    let s = patterned(2, 2, 8);
    let mut f = EncoderFrame::with_linesize(2, 2, 10).unwrap();
    surface_to_rgb24(&s, &mut f);
    assert_eq!(f.to_packed_rgb().len(), 12);
}

#[test]
#[should_panic(expected = "dimensions differ")]
fn dimension_mismatch_panics() {
    let s = Surface::new(4, 4).unwrap();
    let mut f = EncoderFrame::new(4, 5).unwrap();
    surface_to_rgb24(&s, &mut f);
}
