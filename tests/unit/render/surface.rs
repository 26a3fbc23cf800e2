use super::*;

#[test]
fn aligned_stride_rounds_up() {
    let s = Surface::aligned(10, 2, 64).unwrap();
    assert_eq!(s.stride(), 64);
    assert_eq!(s.data().len(), 128);

    let s = Surface::aligned(16, 2, 64).unwrap();
    assert_eq!(s.stride(), 64);
}

#[test]
fn stride_smaller_than_row_is_rejected() {
    assert!(Surface::with_stride(10, 2, 39).is_err());
    assert!(Surface::with_stride(0, 2, 64).is_err());
    assert!(Surface::aligned(10, 2, 6).is_err());
}

#[test]
fn pixel_word_is_little_endian_bgrx() {
    let mut s = Surface::with_stride(3, 2, 20).unwrap();
    s.set_rgb(2, 1, Rgb8::new(0x11, 0x22, 0x33));

    let o = 20 + 2 * 4;
    assert_eq!(&s.data()[o..o + 4], &[0x33, 0x22, 0x11, 0x00]);
    assert_eq!(s.pixel(2, 1), 0x0011_2233);
    assert_eq!(s.rgb(2, 1), Rgb8::new(0x11, 0x22, 0x33));
}

#[test]
fn row_excludes_padding() {
    let mut s = Surface::with_stride(2, 2, 16).unwrap();
    s.fill(Rgb8::WHITE);
    assert_eq!(s.row(1).len(), 8);
    assert!(s.row(1).chunks_exact(4).all(|px| px == [255, 255, 255, 0]));
    // padding bytes stay untouched
    assert_eq!(&s.data()[8..16], &[0u8; 8]);
}

#[test]
#[should_panic(expected = "out of bounds")]
fn out_of_bounds_pixel_panics() {
    let s = Surface::new(4, 4).unwrap();
    let _ = s.pixel(4, 0);
}
