use super::*;

fn playing(len: usize) -> AnimationDriver {
    let mut d = AnimationDriver::new(Duration::from_millis(200)).unwrap();
    d.start(len).unwrap();
    d
}

#[test]
fn ticks_loop_back_to_zero() {
    let mut d = playing(3);
    let seen: Vec<usize> = (0..7).filter_map(|_| d.tick()).collect();
    assert_eq!(seen, vec![0, 1, 2, 0, 1, 2, 0]);
    assert_eq!(d.position(), Some(0));
}

#[test]
fn speed_change_keeps_position() {
    let mut d = playing(100);
    for _ in 0..48 {
        d.tick();
    }
    assert_eq!(d.position(), Some(47));

    d.set_speed(2.0).unwrap();
    assert_eq!(d.position(), Some(47));
    assert_eq!(d.interval(), Duration::from_millis(100));
    assert_eq!(d.tick(), Some(48));
}

#[test]
fn interval_scales_and_has_a_floor() {
    let mut d = playing(2);
    d.set_speed(3.0).unwrap();
    assert_eq!(d.interval().as_millis(), 66);

    let mut fast = AnimationDriver::new(Duration::from_millis(2)).unwrap();
    fast.start(1).unwrap();
    fast.set_speed(1000.0).unwrap();
    assert_eq!(fast.interval(), MIN_INTERVAL);
}

#[test]
fn tiny_speed_saturates_instead_of_overflowing() {
    let mut d = playing(2);
    d.set_speed(1e-300).unwrap();
    assert_eq!(d.interval(), MAX_INTERVAL);

    d.set_speed(f64::MIN_POSITIVE).unwrap();
    assert_eq!(d.interval(), MAX_INTERVAL);

    d.set_speed(0.5).unwrap();
    assert_eq!(d.interval(), Duration::from_millis(400));
}

#[test]
fn invalid_speeds_are_rejected_without_side_effects() {
    let mut d = playing(2);
    for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        assert!(d.set_speed(bad).is_err());
    }
    assert_eq!(d.speed(), 1.0);
}

#[test]
fn paused_driver_does_not_advance() {
    let mut d = playing(5);
    d.tick();
    d.apply(Command::TogglePause).unwrap();
    assert_eq!(d.state(), DriverState::Paused);
    assert_eq!(d.tick(), None);
    assert_eq!(d.position(), Some(0));

    d.set_speed(2.0).unwrap();
    d.apply(Command::TogglePause).unwrap();
    assert_eq!(d.tick(), Some(1));
}

#[test]
fn lifecycle_transitions_are_checked() {
    let mut d = AnimationDriver::new(Duration::from_millis(10)).unwrap();
    assert!(d.pause().is_err());
    assert_eq!(d.tick(), None);
    assert!(d.start(0).is_err());

    d.start(4).unwrap();
    assert!(d.start(4).is_err());

    d.apply(Command::Stop).unwrap();
    assert_eq!(d.state(), DriverState::Stopped);
    assert_eq!(d.tick(), None);
    assert!(d.resume().is_err());
    assert!(AnimationDriver::new(Duration::ZERO).is_err());
}

#[test]
fn control_lines_parse() {
    assert_eq!(Command::parse_control("2\n"), Some(Command::SetSpeed(2.0)));
    assert_eq!(Command::parse_control(" P "), Some(Command::TogglePause));
    assert_eq!(Command::parse_control(" \n"), Some(Command::TogglePause));
    assert_eq!(Command::parse_control("q"), Some(Command::Stop));
    assert_eq!(Command::parse_control(""), None);
    assert_eq!(Command::parse_control("9"), None);
}
