use super::*;

const RED: Rgb8 = Rgb8::new(255, 0, 0);

fn rendered(ctx: &mut DrawContext) -> Surface {
    let mut s = Surface::aligned(ctx.width(), ctx.height(), 64).unwrap();
    ctx.finish_into(&mut s).unwrap();
    s
}

fn system_font() -> Option<FontFace> {
    let path = std::path::Path::new("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf");
    path.is_file().then(|| FontFace::from_path(path).unwrap())
}

#[test]
fn clear_covers_every_pixel() {
    let mut ctx = DrawContext::new(16, 8, None, 32.0).unwrap();
    ctx.clear(Rgb8::WHITE);
    let s = rendered(&mut ctx);
    for y in 0..8 {
        for x in 0..16 {
            assert_eq!(s.pixel(x, y), 0x00FF_FFFF);
        }
    }
}

#[test]
fn paint_defaults_to_black() {
    let mut ctx = DrawContext::new(32, 32, None, 32.0).unwrap();
    ctx.clear(Rgb8::WHITE);
    ctx.quad([
        Point::new(8.0, 8.0),
        Point::new(24.0, 8.0),
        Point::new(24.0, 24.0),
        Point::new(8.0, 24.0),
    ]);
    let s = rendered(&mut ctx);
    assert_eq!(s.rgb(16, 16), Rgb8::BLACK);
    assert_eq!(s.rgb(2, 2), Rgb8::WHITE);
}

#[test]
fn line_has_flat_ends_and_requested_width() {
    let mut ctx = DrawContext::new(40, 20, None, 32.0).unwrap();
    ctx.clear(Rgb8::WHITE);
    ctx.set_color(RED);
    ctx.line(6.0, Point::new(10.0, 10.0), Point::new(30.0, 10.0));
    let s = rendered(&mut ctx);

    assert_eq!(s.rgb(20, 10), RED);
    assert_eq!(s.rgb(20, 8), RED);
    assert_eq!(s.rgb(20, 3), Rgb8::WHITE);
    assert_eq!(s.rgb(5, 10), Rgb8::WHITE);
    assert_eq!(s.rgb(35, 10), Rgb8::WHITE);
}

#[test]
fn degenerate_line_draws_nothing() {
    let mut ctx = DrawContext::new(8, 8, None, 32.0).unwrap();
    ctx.clear(Rgb8::WHITE);
    ctx.line(4.0, Point::new(4.0, 4.0), Point::new(4.0, 4.0));
    let s = rendered(&mut ctx);
    assert_eq!(s.rgb(4, 4), Rgb8::WHITE);
}

#[test]
fn circle_fills_its_interior_only() {
    let mut ctx = DrawContext::new(40, 40, None, 32.0).unwrap();
    ctx.clear(Rgb8::WHITE);
    ctx.circle(10.0, Point::new(20.0, 20.0));
    let s = rendered(&mut ctx);
    assert_eq!(s.rgb(20, 20), Rgb8::BLACK);
    assert_eq!(s.rgb(2, 2), Rgb8::WHITE);
    assert_eq!(s.rgb(20, 35), Rgb8::WHITE);
}

#[test]
fn transform_moves_primitives() {
    let mut ctx = DrawContext::new(40, 20, None, 32.0).unwrap();
    ctx.clear(Rgb8::WHITE);
    ctx.set_transform(kurbo::Affine::translate((20.0, 0.0)));
    ctx.circle(5.0, Point::new(8.0, 10.0));
    let s = rendered(&mut ctx);
    assert_eq!(s.rgb(8, 10), Rgb8::WHITE);
    assert_eq!(s.rgb(28, 10), Rgb8::BLACK);
}

#[test]
fn finish_starts_a_new_scene() {
    let mut ctx = DrawContext::new(8, 8, None, 32.0).unwrap();
    ctx.clear(RED);
    let _ = rendered(&mut ctx);
    ctx.clear(Rgb8::WHITE);
    let s = rendered(&mut ctx);
    assert_eq!(s.rgb(4, 4), Rgb8::WHITE);
}

#[test]
fn surface_size_must_match() {
    let mut ctx = DrawContext::new(8, 8, None, 32.0).unwrap();
    let mut s = Surface::new(9, 8).unwrap();
    assert!(matches!(
        ctx.finish_into(&mut s).unwrap_err(),
        ReelError::Validation(_)
    ));
}

#[test]
fn oversized_canvas_is_rejected() {
    assert!(DrawContext::new(70_000, 8, None, 32.0).is_err());
    assert!(DrawContext::new(0, 8, None, 32.0).is_err());
}

#[test]
fn glyphs_need_a_font() {
    let mut ctx = DrawContext::new(8, 8, None, 32.0).unwrap();
    let err = ctx.glyph(12.0, 'A' as u32, Point::new(0.0, 8.0)).unwrap_err();
    assert!(matches!(err, ReelError::Script(_)));
    assert!(ctx.glyph_extents('A' as u32).is_err());
}

#[test]
fn glyph_extents_follow_the_last_glyph_size() {
    let Some(font) = system_font() else {
        return;
    };
    let mut ctx = DrawContext::new(64, 64, Some(font), 10.0).unwrap();
    ctx.clear(Rgb8::WHITE);
    let (w_small, h_small) = ctx.glyph_extents('M' as u32).unwrap();

    ctx.glyph(40.0, 'M' as u32, Point::new(8.0, 48.0)).unwrap();
    assert_eq!(ctx.font_size(), 40.0);
    let (w, h) = ctx.glyph_extents('M' as u32).unwrap();
    assert!(w > w_small && h > h_small);

    let s = rendered(&mut ctx);
    let inked = (0..64)
        .flat_map(|y| (0..64).map(move |x| (x, y)))
        .filter(|&(x, y)| s.rgb(x, y) != Rgb8::WHITE)
        .count();
    assert!(inked > 0);
}
