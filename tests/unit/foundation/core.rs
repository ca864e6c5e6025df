use super::*;

#[test]
fn clamp01_bounds_and_absorbs_nan() {
    assert_eq!(clamp01(-3.0), 0.0);
    assert_eq!(clamp01(0.25), 0.25);
    assert_eq!(clamp01(7.5), 1.0);
    assert_eq!(clamp01(f64::NAN), 0.0);
    assert_eq!(clamp01(f64::INFINITY), 1.0);
    assert_eq!(clamp01(f64::NEG_INFINITY), 0.0);
}

#[test]
fn lerp_lands_exactly_on_the_target() {
    assert_eq!(lerp(0.0, 187.0, 1.0), 187.0);
    assert_eq!(lerp(0.1, 0.3, 1.0), 0.3);
    assert_eq!(lerp(10.0, 20.0, 0.5), 15.0);
}

#[test]
fn time_arithmetic() {
    let a = TimeMs(1000.0);
    assert_eq!(a.plus(600.0), TimeMs(1600.0));
    assert_eq!(TimeMs(1600.0).since(a), 600.0);
    assert_eq!(a.since(TimeMs(1600.0)), -600.0);
}

#[test]
fn measurable_rejects_degenerate_anchors() {
    assert!(Rect::new(0.0, 100.0, 1280.0, 720.0).is_measurable());
    assert!(!Rect::new(0.0, 0.0, 0.0, 720.0).is_measurable());
    assert!(!Rect::new(0.0, 0.0, 1280.0, 0.0).is_measurable());
    assert!(!Rect::new(f64::NAN, 0.0, 1280.0, 720.0).is_measurable());
    assert!(!Rect::new(0.0, f64::INFINITY, 1280.0, 720.0).is_measurable());
}
