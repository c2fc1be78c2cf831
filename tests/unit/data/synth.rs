use super::*;

fn small() -> SynthOptions {
    SynthOptions {
        years: 2000..=2001,
        locations: reference_locations(),
        seed: 7,
    }
}

#[test]
fn one_record_per_year_month_location() {
    let recs = generate(&small());
    assert_eq!(recs.len(), 2 * 12 * 8);
    assert!(recs.iter().all(|r| r.value >= 0.0 && r.value.is_finite()));
    assert!(recs.iter().all(|r| r.location.is_some()));
}

#[test]
fn same_seed_reproduces_values() {
    let a = generate(&small());
    let b = generate(&small());
    assert_eq!(a, b);

    let c = generate(&small().with_seed(8));
    assert_ne!(a, c);
}

#[test]
fn regimes_follow_latitude_bands() {
    assert_eq!(SeasonalRegime::for_latitude(51.5), SeasonalRegime::Temperate);
    assert_eq!(SeasonalRegime::for_latitude(19.0), SeasonalRegime::Monsoon);
    assert_eq!(SeasonalRegime::for_latitude(-33.9), SeasonalRegime::Southern);

    assert!(SeasonalRegime::Southern.is_wet_season(1));
    assert!(!SeasonalRegime::Southern.is_wet_season(7));
    assert_eq!(SeasonalRegime::Monsoon.base_range(7), (100.0, 300.0));
}

#[test]
fn monsoon_sites_are_wetter_mid_year_on_average() {
    let opts = SynthOptions {
        years: 1900..=1999,
        locations: vec![Location::new(19.0760, 72.8777).named("Mumbai")],
        seed: 1,
    };
    let recs = generate(&opts);
    let mean = |m: u8| {
        let v: Vec<f64> = recs.iter().filter(|r| r.month == m).map(|r| r.value).collect();
        v.iter().sum::<f64>() / v.len() as f64
    };
    assert!(mean(7) > 2.0 * mean(1));
}
