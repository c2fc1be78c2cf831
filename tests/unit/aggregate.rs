use super::*;
use crate::data::loader::{LoadOptions, RecordLayout, load_str};
use crate::data::synth::{SynthOptions, generate, reference_locations};

fn rec(year: i32, month: u8, value: f64) -> RawRecord {
    RawRecord {
        year,
        month,
        day: Some(1),
        date: chrono::NaiveDate::from_ymd_opt(year, u32::from(month), 1).unwrap(),
        location: None,
        value,
        quality: None,
    }
}

fn pk(year: i32, month: u8) -> PeriodKey {
    PeriodKey::new(year, month).unwrap()
}

#[test]
fn june_1990_rows_sum_into_one_summary() {
    let text = "meta\nmeta\n1990,6,15,120.5,\n1990,6,20,30.0,\n";
    let loaded = load_str(text, LoadOptions::new(RecordLayout::Daily).with_skip_rows(2)).unwrap();
    let out = aggregate(&loaded.records, Grouping::Period);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].period, pk(1990, 6));
    assert_eq!(out[0].value, 150.5);
    assert_eq!(out[0].record_count, 2);
}

#[test]
fn output_is_sorted_and_sums_are_preserved() {
    let records = vec![
        rec(1991, 2, 4.0),
        rec(1990, 12, 1.5),
        rec(1991, 2, 0.25),
        rec(1990, 1, 7.0),
        rec(1990, 12, 2.5),
    ];
    let out = aggregate(&records, Grouping::Period);
    let periods: Vec<PeriodKey> = out.iter().map(|s| s.period).collect();
    assert_eq!(periods, vec![pk(1990, 1), pk(1990, 12), pk(1991, 2)]);

    for s in &out {
        let expected: f64 = records
            .iter()
            .filter(|r| r.period() == s.period)
            .map(|r| r.value)
            .sum();
        assert_eq!(s.value, expected);
    }
}

#[test]
fn absent_periods_have_no_summary_but_zero_rain_does() {
    let series = MonthlySeries::from_records(&[rec(2000, 3, 0.0)], Grouping::Period);
    assert_eq!(series.value_for(pk(2000, 3)), Some(0.0));
    assert_eq!(series.value_for(pk(2000, 4)), None);
    assert!(series.for_period(pk(2000, 4)).is_empty());
}

#[test]
fn location_grouping_keeps_one_summary_per_site() {
    let opts = SynthOptions {
        years: 2010..=2011,
        locations: reference_locations(),
        seed: 11,
    };
    let series = MonthlySeries::from_records(&generate(&opts), Grouping::PeriodLocation);
    assert_eq!(series.len(), 2 * 12 * 8);
    assert_eq!(series.for_period(pk(2011, 5)).len(), 8);
    assert!(series.for_period(pk(2011, 5)).iter().all(|s| s.location.is_some()));
    assert_eq!(series.years(), vec![2010, 2011]);
    assert_eq!(series.span(), Some((pk(2010, 1), pk(2011, 12))));
    assert_eq!(series.for_year(2010).len(), 12 * 8);
}

#[test]
fn dataset_stats_pick_first_extreme_on_ties() {
    let records = vec![
        rec(2000, 1, 10.0),
        rec(2000, 2, 50.0),
        rec(2000, 3, 50.0),
        rec(2000, 4, 10.0),
    ];
    let series = MonthlySeries::from_records(&records, Grouping::Period);
    let stats = DatasetStats::compute(&series).unwrap();
    assert_eq!(stats.summaries, 4);
    assert_eq!(stats.locations, 1);
    assert_eq!(stats.wettest, (pk(2000, 2), 50.0));
    assert_eq!(stats.driest, (pk(2000, 1), 10.0));
    assert_eq!(stats.mean, 30.0);
    assert!(DatasetStats::compute(&MonthlySeries::default()).is_none());
}
