use super::*;

#[test]
fn rescale_identity_is_untouched() {
    let tb = Rational::new(1, 30);
    assert_eq!(Rational::rescale(1234, tb, tb), 1234);
}

#[test]
fn rescale_frames_to_millis() {
    let from = Rational::new(1, 30);
    let to = Rational::new(1, 1000);
    assert_eq!(Rational::rescale(0, from, to), 0);
    assert_eq!(Rational::rescale(1, from, to), 33);
    assert_eq!(Rational::rescale(2, from, to), 67);
    assert_eq!(Rational::rescale(30, from, to), 1000);
}

#[test]
fn rescale_rounds_half_away_from_zero() {
    let from = Rational::new(1, 2);
    let to = Rational::new(1, 1);
    assert_eq!(Rational::rescale(1, from, to), 1);
    assert_eq!(Rational::rescale(-1, from, to), -1);
    assert_eq!(Rational::rescale(3, from, to), 2);
}

#[test]
fn rescale_to_mpeg_clock() {
    let from = Rational::new(1, 30);
    let to = Rational::new(1, 90_000);
    assert_eq!(Rational::rescale(7, from, to), 21_000);
}

#[test]
fn fps_time_base_is_inverse() {
    let fps = Fps::new(30, 1).unwrap();
    assert_eq!(fps.time_base(), Rational::new(1, 30));
    assert_eq!(fps.as_rational(), Rational::new(30, 1));
}

#[test]
fn fps_frame_time_has_no_drift() {
    let fps = Fps::new(30, 1).unwrap();
    assert_eq!(fps.frame_time_secs(FrameIndex(0)), 0.0);
    assert_eq!(fps.frame_time_secs(FrameIndex(30)), 1.0);
    assert_eq!(fps.frame_time_secs(FrameIndex(9000)), 300.0);
}

#[test]
fn fps_rejects_zero() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}

#[test]
fn rgb8_serializes_as_triplet() {
    let c: Rgb8 = serde_json::from_str("[1, 2, 3]").unwrap();
    assert_eq!(c, Rgb8::new(1, 2, 3));
    assert_eq!(serde_json::to_string(&Rgb8::WHITE).unwrap(), "[255,255,255]");
}
