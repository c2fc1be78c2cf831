use crate::aggregate::MonthlySeries;
use crate::colormap::{LegendEntry, ValueMapper};
use crate::foundation::core::{MONTH_NAMES, PeriodKey, Rgb8};

/// Fixed y-axis maximum (mm) shared by every bar frame.
pub const BAR_AXIS_MAX_MM: f64 = 1400.0;
/// Labels of bars shorter than this sit at this height instead.
pub const LABEL_FLOOR_MM: f64 = 30.0;
/// Gap between a bar top and its label.
pub const LABEL_OFFSET_MM: f64 = 15.0;

/// One month's bar.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Bar {
    /// Month, `1..=12`.
    pub month: u8,
    /// Monthly total; `0.0` for months without data.
    pub value: f64,
    /// Whether the month had any data.
    pub populated: bool,
    /// Fill color.
    pub color: Rgb8,
    /// Rounded value text.
    pub label: String,
    /// Label anchor height in data units.
    pub label_y: f64,
}

/// A month and its value.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct MonthValue {
    /// Month, `1..=12`.
    pub month: u8,
    /// Value in mm.
    pub value: f64,
}

impl MonthValue {
    /// Short month name.
    pub fn month_name(self) -> &'static str {
        MONTH_NAMES[usize::from(self.month.clamp(1, 12)) - 1]
    }
}

/// Annual figures computed over the 12 bar values.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct YearStats {
    /// Sum of all months.
    pub total: f64,
    /// `total / 12`.
    pub mean: f64,
    /// Highest month (first in calendar order on ties).
    pub wettest: MonthValue,
    /// Lowest month (first in calendar order on ties).
    pub driest: MonthValue,
}

impl YearStats {
    /// Compute over January..December values.
    pub fn compute(values: &[f64; 12]) -> Self {
        let mut wettest = MonthValue {
            month: 1,
            value: values[0],
        };
        let mut driest = wettest;
        for (i, &v) in values.iter().enumerate().skip(1) {
            let month = (i + 1) as u8;
            if v > wettest.value {
                wettest = MonthValue { month, value: v };
            }
            if v < driest.value {
                driest = MonthValue { month, value: v };
            }
        }
        let total: f64 = values.iter().sum();
        Self {
            total,
            mean: total / 12.0,
            wettest,
            driest,
        }
    }

    /// `Annual: …mm | Avg: …mm | Peak: Mon(…mm) | Low: Mon(…mm)`.
    pub fn summary_line(&self) -> String {
        format!(
            "Annual: {:.0}mm | Avg: {:.0}mm | Peak: {}({:.0}mm) | Low: {}({:.0}mm)",
            self.total,
            self.mean,
            self.wettest.month_name(),
            self.wettest.value,
            self.driest.month_name(),
            self.driest.value,
        )
    }
}

/// Twelve-month bar chart for one year.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct BarFrame {
    /// Year shown.
    pub year: i32,
    /// Headline text.
    pub title: String,
    /// Exactly 12 bars, January first.
    pub bars: Vec<Bar>,
    /// Annual figures.
    pub stats: YearStats,
    /// Pre-formatted statistics line.
    pub stats_line: String,
    /// Band swatches.
    pub legend: Vec<LegendEntry>,
    /// Fixed y-axis maximum.
    pub y_max: f64,
}

impl BarFrame {
    /// Number of months with data.
    pub fn populated_months(&self) -> usize {
        self.bars.iter().filter(|b| b.populated).count()
    }
}

/// Label anchor for a bar of height `value`.
pub fn label_height(value: f64) -> f64 {
    if value < LABEL_FLOOR_MM {
        LABEL_FLOOR_MM
    } else {
        value + LABEL_OFFSET_MM
    }
}

/// Build the frame for `year`, substituting zero for months without data.
pub fn render_bar_frame(
    year: i32,
    series: &MonthlySeries,
    mapper: &ValueMapper,
    title_prefix: &str,
) -> BarFrame {
    let mut values = [0.0f64; 12];
    let mut bars = Vec::with_capacity(12);
    for (i, slot) in values.iter_mut().enumerate() {
        let month = (i + 1) as u8;
        let found = series.value_for(PeriodKey { year, month });
        let value = found.unwrap_or(0.0);
        *slot = value;
        bars.push(Bar {
            month,
            value,
            populated: found.is_some(),
            color: mapper.color_for(value),
            label: format!("{value:.0}"),
            label_y: label_height(value),
        });
    }

    let stats = YearStats::compute(&values);
    BarFrame {
        year,
        title: format!("{title_prefix} - {year}"),
        bars,
        stats_line: stats.summary_line(),
        stats,
        legend: mapper.legend(),
        y_max: BAR_AXIS_MAX_MM,
    }
}
