use crate::aggregate::MonthlySeries;
use crate::colormap::{MIN_MARKER_SIZE, ValueMapper};
use crate::foundation::core::{PeriodKey, Point, Rgb8};

/// One site on the map.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ScatterPoint {
    /// `x` = longitude, `y` = latitude, in degrees.
    pub position: Point,
    /// Monthly total in mm.
    pub value: f64,
    /// Fill color.
    pub color: Rgb8,
    /// Marker area.
    pub size: f64,
    /// Site name, when known.
    pub name: Option<String>,
}

/// Map state for one period.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ScatterFrame {
    /// Period shown.
    pub period: PeriodKey,
    /// Headline text.
    pub title: String,
    /// Sites with data this period; empty when the period has none.
    pub points: Vec<ScatterPoint>,
    /// Colorbar range.
    pub value_range: (f64, f64),
}

/// Build the frame for `period` from its per-location summaries.
pub fn render_scatter_frame(
    period: PeriodKey,
    series: &MonthlySeries,
    mapper: &ValueMapper,
    title_prefix: &str,
) -> ScatterFrame {
    let points = series
        .for_period(period)
        .iter()
        .filter_map(|s| {
            let loc = s.location.as_ref()?;
            Some(ScatterPoint {
                position: Point::new(loc.longitude, loc.latitude),
                value: s.value,
                color: mapper.color_for(s.value),
                size: mapper.size_for(s.value).unwrap_or(MIN_MARKER_SIZE),
                name: loc.name.clone(),
            })
        })
        .collect();

    let value_range = match mapper {
        ValueMapper::Continuous(cmap) => cmap.range(),
        ValueMapper::Banded => crate::colormap::MAP_RANGE_MM,
    };

    ScatterFrame {
        period,
        title: format!(
            "{title_prefix}: {} {}",
            period.month_name(),
            period.year
        ),
        points,
        value_range,
    }
}
