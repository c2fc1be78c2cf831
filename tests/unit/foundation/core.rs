use super::*;

#[test]
fn period_order_is_chronological() {
    let a = PeriodKey::new(1989, 12).unwrap();
    let b = PeriodKey::new(1990, 1).unwrap();
    let c = PeriodKey::new(1990, 6).unwrap();
    assert!(a < b && b < c);
    assert_eq!(a.next(), b);
    assert_eq!(PeriodKey::from_ordinal(c.ordinal()), c);
    assert_eq!(c.to_string(), "1990-06");
    assert_eq!(c.month_name(), "Jun");
}

#[test]
fn period_rejects_invalid_month() {
    assert!(PeriodKey::new(2000, 0).is_err());
    assert!(PeriodKey::new(2000, 13).is_err());
}

#[test]
fn fps_rejects_zero_and_reports_frame_duration() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(5, 0).is_err());
    assert_eq!(Fps::new(5, 1).unwrap().frame_duration_ms(), 200);
    assert_eq!(Fps::new(30000, 1001).unwrap().frame_duration_ms(), 33);
}

#[test]
fn rgb_parse_and_lerp() {
    let c = Rgb8::parse("#87CEEB").unwrap();
    assert_eq!(c, Rgb8::from_hex(0x87ceeb));
    assert_eq!(c.to_hex_string(), "#87ceeb");
    assert!(Rgb8::parse("#12345").is_err());

    let black = Rgb8::new(0, 0, 0);
    let white = Rgb8::new(255, 255, 255);
    assert_eq!(black.lerp(white, 0.5), Rgb8::new(128, 128, 128));
    assert_eq!(black.lerp(white, 2.0), white);
}
