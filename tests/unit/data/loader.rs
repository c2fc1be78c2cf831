use super::*;

const DAILY: &str = "\
香港天文台總部 每日總雨量(毫米)
Daily Total Rainfall (mm) at the Observatory
年/Year,月/Month,日/Day,數值/Value,數據完整性/data Completeness
1990,6,15,120.5,C
1990,6,20,30.0,
1990,6,31,5.0,C
1990,7,1,Trace,C
1990,7,2,***,
1990,7,3,12#,C
abc,7,4,1.0,C
*** 完 ***
";

#[test]
fn daily_rows_are_cleaned_and_counted() {
    let loaded = load_str(DAILY, LoadOptions::new(RecordLayout::Daily)).unwrap();
    let r = loaded.report;
    assert_eq!(r.rows_seen, 9);
    assert_eq!(r.kept, 3);
    assert_eq!(r.trace_values, 1);
    assert_eq!(r.missing_values, 1);
    assert_eq!(r.flagged_values, 1);
    // header line, 31 June, non-numeric year, footer
    assert_eq!(r.malformed_rows, 4);
    assert_eq!(r.dropped(), 6);

    let first = &loaded.records[0];
    assert_eq!((first.year, first.month, first.day), (1990, 6, Some(15)));
    assert_eq!(first.value, 120.5);
    assert_eq!(first.quality.as_deref(), Some("C"));
    assert_eq!(loaded.records[1].quality, None);
    assert_eq!(loaded.records[2].value, crate::data::record::TRACE_VALUE);
}

#[test]
fn skip_rows_without_header_keeps_first_data_row() {
    let text = "meta one\nmeta two\n1990,6,15,120.5,\n1990,6,20,30.0,\n";
    let loaded = load_str(text, LoadOptions::new(RecordLayout::Daily).with_skip_rows(2)).unwrap();
    assert_eq!(loaded.records.len(), 2);
    assert_eq!(loaded.report.malformed_rows, 0);
}

#[test]
fn reparsing_is_idempotent() {
    let opts = LoadOptions::new(RecordLayout::Daily);
    let a = load_str(DAILY, opts).unwrap();
    let b = load_str(DAILY, opts).unwrap();
    assert_eq!(a, b);
}

#[test]
fn located_layout_resolves_columns_by_name() {
    let text = "\
city,year,month,latitude,longitude,rainfall
London,1990,6,51.5074,-0.1278,80.25
Tokyo,1990,6,35.6762,139.6503,***
Nowhere,1990,6,95.0,0.0,10
Sydney,1990,13,-33.8688,151.2093,10
";
    let loaded = load_str(text, LoadOptions::new(RecordLayout::Located)).unwrap();
    assert_eq!(loaded.records.len(), 1);
    assert_eq!(loaded.report.missing_values, 1);
    assert_eq!(loaded.report.malformed_rows, 2);

    let rec = &loaded.records[0];
    let loc = rec.location.as_ref().unwrap();
    assert_eq!(loc.name.as_deref(), Some("London"));
    assert_eq!(rec.day, None);
    assert_eq!(rec.date, chrono::NaiveDate::from_ymd_opt(1990, 6, 1).unwrap());
}

#[test]
fn located_layout_requires_value_column() {
    let text = "year,month,latitude,longitude\n1990,6,1.0,2.0\n";
    let err = load_str(text, LoadOptions::new(RecordLayout::Located)).unwrap_err();
    assert!(err.to_string().contains("rainfall"));
}

#[test]
fn missing_file_is_data_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let err = load(
        &dir.path().join("nope.csv"),
        LoadOptions::new(RecordLayout::Daily),
    )
    .unwrap_err();
    assert!(err.is_data_unavailable());
}
