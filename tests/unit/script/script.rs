use super::*;
use crate::render::surface::Surface;

const BALL: &str = r#"{
    "duration": 1.0,
    "background": [0, 0, 255],
    "items": [
        { "op": "circle", "radius": 4, "center": { "x": 8, "y": 8 },
          "velocity": { "x": 20, "y": 0 } },
        { "op": "quad", "color": [255, 0, 0], "start": 0.5,
          "corners": [ { "x": 0, "y": 24 }, { "x": 8, "y": 24 },
                       { "x": 8, "y": 32 }, { "x": 0, "y": 32 } ] }
    ]
}"#;

fn render_at(script: &mut ReelScript, time: f64) -> (FrameStatus, Surface) {
    let mut ctx = DrawContext::new(32, 32, None, 32.0).unwrap();
    ctx.clear(Rgb8::WHITE);
    let status = script.render_frame(&mut ctx, time).unwrap();
    let mut s = Surface::new(32, 32).unwrap();
    ctx.finish_into(&mut s).unwrap();
    (status, s)
}

#[test]
fn parses_items_with_defaults() {
    let script = ReelScript::from_json_str(BALL).unwrap();
    assert_eq!(script.items.len(), 2);
    assert_eq!(script.items[0].color, Rgb8::BLACK);
    assert_eq!(script.items[0].start, 0.0);
    assert_eq!(script.items[1].color, Rgb8::new(255, 0, 0));
    assert!(matches!(script.items[1].shape, Shape::Quad { .. }));
    assert!(!script.uses_glyphs());
    script.validate(false).unwrap();
}

#[test]
fn malformed_json_is_a_script_error() {
    let err = ReelScript::from_json_str(r#"{ "duration": 1, "items": [ { "op": "spiral" } ] }"#)
        .unwrap_err();
    assert!(matches!(err, ReelError::Script(_)));
}

#[test]
fn glyph_scripts_need_a_font() {
    let script = ReelScript::from_json_str(
        r#"{ "duration": 1, "items": [
            { "op": "glyph_centered", "size": 12, "code": 65, "center": { "x": 4, "y": 4 } } ] }"#,
    )
    .unwrap();
    assert!(script.uses_glyphs());
    assert!(matches!(script.validate(false).unwrap_err(), ReelError::Setup(_)));
    script.validate(true).unwrap();
}

#[test]
fn bad_values_fail_validation() {
    let mut script = ReelScript::from_json_str(BALL).unwrap();
    script.items[0].end = Some(0.0);
    assert!(matches!(script.validate(false).unwrap_err(), ReelError::Validation(_)));

    let mut script = ReelScript::from_json_str(BALL).unwrap();
    script.items[0].shape = Shape::Circle {
        radius: 0.0,
        center: Point::ZERO,
    };
    assert!(script.validate(false).is_err());

    let mut script = ReelScript::from_json_str(BALL).unwrap();
    script.duration = f64::NAN;
    assert!(script.validate(false).is_err());
}

#[test]
fn finished_at_duration_without_drawing() {
    let mut script = ReelScript::from_json_str(BALL).unwrap();
    let (status, s) = render_at(&mut script, 1.0);
    assert_eq!(status, FrameStatus::Finished);
    assert_eq!(s.rgb(0, 0), Rgb8::WHITE);
}

#[test]
fn items_move_and_appear_on_schedule() {
    let mut script = ReelScript::from_json_str(BALL).unwrap();

    let (status, s) = render_at(&mut script, 0.0);
    assert_eq!(status, FrameStatus::Drawn);
    assert_eq!(s.rgb(0, 0), Rgb8::new(0, 0, 255));
    assert_eq!(s.rgb(8, 8), Rgb8::BLACK);
    assert_eq!(s.rgb(4, 28), Rgb8::new(0, 0, 255));

    let (_, s) = render_at(&mut script, 0.5);
    assert_eq!(s.rgb(18, 8), Rgb8::BLACK);
    assert_eq!(s.rgb(8, 8), Rgb8::new(0, 0, 255));
    assert_eq!(s.rgb(4, 28), Rgb8::new(255, 0, 0));
}

#[test]
fn serializes_back_to_the_same_script() {
    let script = ReelScript::from_json_str(BALL).unwrap();
    let json = serde_json::to_string(&script).unwrap();
    let back = ReelScript::from_json_str(&json).unwrap();
    assert_eq!(back.items[0].velocity, kurbo::Vec2::new(20.0, 0.0));
    assert_eq!(back.items[1].shape, script.items[1].shape);
    assert_eq!(back.background, Some(Rgb8::new(0, 0, 255)));
}
