use super::*;
use crate::aggregate::PeriodSummary;
use crate::colormap::{DRY_COLOR, EXTREME_COLOR};
use crate::data::record::Location;
use crate::foundation::core::Point;

fn pk(year: i32, month: u8) -> PeriodKey {
    PeriodKey::new(year, month).unwrap()
}

fn summary(year: i32, month: u8, value: f64) -> PeriodSummary {
    PeriodSummary {
        period: pk(year, month),
        value,
        record_count: 1,
        location: None,
    }
}

fn located(year: i32, month: u8, value: f64, lat: f64, lon: f64) -> PeriodSummary {
    PeriodSummary {
        location: Some(Location::new(lat, lon).named("site")),
        ..summary(year, month, value)
    }
}

fn bar_series() -> MonthlySeries {
    MonthlySeries::from_summaries(vec![
        summary(1990, 3, 40.0),
        summary(1990, 6, 420.0),
        summary(1990, 8, 700.0),
        summary(1992, 1, 10.0),
    ])
}

#[test]
fn default_bar_title_names_the_observatory() {
    let r = FrameRenderer::new(
        RenderMode::Bar,
        bar_series(),
        None,
        RenderMode::Bar.default_title(),
    )
    .unwrap();
    let Frame::Bar(f) = r.render_key(FrameKey::Year(1990)).unwrap() else {
        panic!("expected bar frame");
    };
    assert_eq!(
        f.title,
        "Hong Kong Observatory Monthly Rainfall Statistics - 1990"
    );
}

#[test]
fn sparse_year_still_yields_twelve_labelled_bars() {
    let r = FrameRenderer::new(RenderMode::Bar, bar_series(), None, "Rain").unwrap();
    let Frame::Bar(f) = r.render_key(FrameKey::Year(1990)).unwrap() else {
        panic!("expected bar frame");
    };
    assert_eq!(f.bars.len(), 12);
    assert_eq!(f.populated_months(), 3);

    let zeros: Vec<&Bar> = f.bars.iter().filter(|b| b.value == 0.0).collect();
    assert_eq!(zeros.len(), 9);
    for b in zeros {
        assert_eq!(b.label, "0");
        assert_eq!(b.label_y, bar::LABEL_FLOOR_MM);
        assert_eq!(b.color, DRY_COLOR);
    }

    assert_eq!(f.bars[5].label_y, 435.0);
    assert_eq!(f.bars[7].color, EXTREME_COLOR);
    assert_eq!(f.y_max, bar::BAR_AXIS_MAX_MM);
    assert_eq!(f.title, "Rain - 1990");
    assert_eq!(f.legend.len(), 3);
}

#[test]
fn year_stats_break_ties_by_calendar_order() {
    let Frame::Bar(f) = FrameRenderer::new(RenderMode::Bar, bar_series(), None, "Rain")
        .unwrap()
        .render_key(FrameKey::Year(1990))
        .unwrap()
    else {
        panic!("expected bar frame");
    };
    assert_eq!(f.stats.total, 1160.0);
    assert!((f.stats.mean - 1160.0 / 12.0).abs() < 1e-12);
    assert_eq!(f.stats.wettest.month, 8);
    // January is the first of the nine zero months.
    assert_eq!(f.stats.driest.month, 1);
    assert_eq!(
        f.stats_line,
        "Annual: 1160mm | Avg: 97mm | Peak: Aug(700mm) | Low: Jan(0mm)"
    );
}

#[test]
fn bar_timeline_lists_years_with_data_in_range() {
    let series = bar_series();
    assert_eq!(
        timeline(RenderMode::Bar, &series, None),
        vec![FrameKey::Year(1990), FrameKey::Year(1992)]
    );
    assert_eq!(
        timeline(RenderMode::Bar, &series, Some(&(1991..=2000))),
        vec![FrameKey::Year(1992)]
    );
    let err = FrameRenderer::new(RenderMode::Bar, series, Some(1800..=1850), "Rain").unwrap_err();
    assert!(err.to_string().contains("1800-1850"));
}

#[test]
fn scatter_timeline_covers_whole_years_including_gaps() {
    let series = MonthlySeries::from_summaries(vec![
        located(2000, 6, 100.0, 10.0, 20.0),
        located(2001, 2, 30.0, 10.0, 20.0),
    ]);
    let keys = timeline(RenderMode::Scatter, &series, None);
    assert_eq!(keys.len(), 24);
    assert_eq!(keys[0], FrameKey::Period(pk(2000, 1)));
    assert_eq!(keys[23], FrameKey::Period(pk(2001, 12)));
}

#[test]
fn scatter_frames_map_values_and_handle_empty_periods() {
    let series = MonthlySeries::from_summaries(vec![
        located(2000, 6, 5.0, 51.5, -0.1),
        located(2000, 6, 250.0, 19.0, 72.9),
        located(2000, 7, 80.0, 51.5, -0.1),
    ]);
    let r = FrameRenderer::new(RenderMode::Scatter, series, None, "Monthly Average Rainfall")
        .unwrap();

    let Frame::Scatter(f) = r.render_key(FrameKey::Period(pk(2000, 6))).unwrap() else {
        panic!("expected scatter frame");
    };
    assert_eq!(f.title, "Monthly Average Rainfall: Jun 2000");
    assert_eq!(f.points.len(), 2);
    assert_eq!(f.points[0].size, 20.0);
    assert_eq!(f.points[1].size, 200.0);
    assert_eq!(f.points[1].position, Point::new(72.9, 19.0));
    assert_eq!(f.value_range, (0.0, 300.0));

    let Frame::Scatter(empty) = r.render_key(FrameKey::Period(pk(2000, 1))).unwrap() else {
        panic!("expected scatter frame");
    };
    assert!(empty.points.is_empty());
    assert_eq!(empty.title, "Monthly Average Rainfall: Jan 2000");
}

#[test]
fn frames_are_recomputed_identically() {
    let r = FrameRenderer::new(RenderMode::Bar, bar_series(), None, "Rain").unwrap();
    assert_eq!(r.render_index(0).unwrap(), r.render_index(0).unwrap());
    assert!(r.render_index(2).is_err());
    assert!(r.render_key(FrameKey::Period(pk(1990, 1))).is_err());
    assert_eq!(r.label(1).as_deref(), Some("1992"));
}
