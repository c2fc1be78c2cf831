use super::*;

#[test]
fn empty_config_resolves_to_mode_defaults() {
    let bar = VizConfig::default().resolve(RenderMode::Bar).unwrap();
    assert_eq!(bar.canvas, Canvas::new(1200, 700).unwrap());
    assert_eq!(bar.interval, Duration::from_millis(1500));
    assert_eq!(bar.years, Some(1884..=2025));
    assert_eq!(bar.skip_rows, 2);
    assert_eq!(bar.on_missing, MissingDataPolicy::Fail);
    assert_eq!(bar.export_fps, Fps::new(5, 1).unwrap());
    assert_eq!(bar.data, PathBuf::from("daily_HKO_RF_ALL.csv"));
    assert_eq!(bar.title, "Hong Kong Observatory Monthly Rainfall Statistics");

    let map = VizConfig::default().resolve(RenderMode::Scatter).unwrap();
    assert_eq!(map.canvas, Canvas::new(1200, 800).unwrap());
    assert_eq!(map.interval, Duration::from_millis(200));
    assert_eq!(map.years, None);
    assert_eq!(map.skip_rows, 0);
    assert_eq!(map.on_missing, MissingDataPolicy::Synthesize);
    assert_eq!(map.title, "Monthly Average Rainfall");
}

#[test]
fn json_fields_override_defaults() {
    let json = r#"{
        "canvas": {"width": 640, "height": 360},
        "interval_ms": 250,
        "export_fps": 10,
        "start_year": 1990,
        "title": "HK Rain",
        "on_missing": "synthesize",
        "seed": 7
    }"#;
    let cfg = VizConfig::from_reader(json.as_bytes()).unwrap();
    let r = cfg.resolve(RenderMode::Bar).unwrap();
    assert_eq!(r.canvas, Canvas::new(640, 360).unwrap());
    assert_eq!(r.interval, Duration::from_millis(250));
    assert_eq!(r.export_fps, Fps::new(10, 1).unwrap());
    assert_eq!(r.years, Some(1990..=2025));
    assert_eq!(r.title, "HK Rain");
    assert_eq!(r.on_missing, MissingDataPolicy::Synthesize);
    assert_eq!(r.synth_options().seed, 7);
    assert_eq!(r.synth_options().years, 1990..=2025);
}

#[test]
fn open_ended_scatter_window() {
    let cfg = VizConfig {
        end_year: Some(1950),
        ..Default::default()
    };
    let r = cfg.resolve(RenderMode::Scatter).unwrap();
    assert_eq!(r.years, Some(i32::MIN..=1950));
    assert_eq!(r.synth_options().years, 1924..=1950);
}

#[test]
fn unknown_and_invalid_fields_are_rejected() {
    assert!(VizConfig::from_reader(r#"{"colour": "red"}"#.as_bytes()).is_err());

    for bad in [
        VizConfig {
            interval_ms: Some(0),
            ..Default::default()
        },
        VizConfig {
            export_fps: Some(0),
            ..Default::default()
        },
        VizConfig {
            start_year: Some(2000),
            end_year: Some(1999),
            ..Default::default()
        },
        VizConfig {
            canvas: Some(Canvas {
                width: 0,
                height: 10,
            }),
            ..Default::default()
        },
    ] {
        let err = bad.validate().unwrap_err();
        assert!(matches!(err, RainError::Validation(_)), "{bad:?}");
    }

    let cfg = VizConfig {
        start_year: Some(2030),
        ..Default::default()
    };
    assert!(cfg.resolve(RenderMode::Bar).is_err());
}

#[test]
fn from_path_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("viz.json");
    std::fs::write(&path, r#"{"skip_rows": 3}"#).unwrap();
    let cfg = VizConfig::from_path(&path).unwrap();
    assert_eq!(cfg.skip_rows, Some(3));
    assert!(VizConfig::from_path(dir.path().join("missing.json")).is_err());
}
