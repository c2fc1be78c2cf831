//! Per-period frame descriptors.
//!
//! A [`Frame`] is rebuilt from the read-only [`MonthlySeries`] on every call; nothing is
//! cached between ticks.

/// Yearly bar chart descriptors.
pub mod bar;
/// Monthly world map descriptors.
pub mod scatter;

use std::ops::RangeInclusive;

use tracing::debug;

use crate::aggregate::{Grouping, MonthlySeries};
use crate::colormap::ValueMapper;
use crate::data::MissingDataPolicy;
use crate::data::loader::RecordLayout;
use crate::foundation::core::{Canvas, PeriodKey};
use crate::foundation::error::{RainError, RainResult};

pub use bar::{Bar, BarFrame, YearStats, render_bar_frame};
pub use scatter::{ScatterFrame, ScatterPoint, render_scatter_frame};

/// Chart variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// One frame per year: twelve monthly bars for a single station.
    Bar,
    /// One frame per month: sites on a world map.
    Scatter,
}

impl RenderMode {
    /// Expected input layout.
    pub fn layout(self) -> RecordLayout {
        match self {
            Self::Bar => RecordLayout::Daily,
            Self::Scatter => RecordLayout::Located,
        }
    }

    /// Aggregation key.
    pub fn grouping(self) -> Grouping {
        match self {
            Self::Bar => Grouping::Period,
            Self::Scatter => Grouping::PeriodLocation,
        }
    }

    /// Visual encoding.
    pub fn mapper(self) -> ValueMapper {
        match self {
            Self::Bar => ValueMapper::bar(),
            Self::Scatter => ValueMapper::scatter(),
        }
    }

    /// Behaviour when the data file is missing.
    pub fn default_missing_policy(self) -> MissingDataPolicy {
        match self {
            Self::Bar => MissingDataPolicy::Fail,
            Self::Scatter => MissingDataPolicy::Synthesize,
        }
    }

    /// Default output size.
    pub fn default_canvas(self) -> Canvas {
        match self {
            Self::Bar => Canvas {
                width: 1200,
                height: 700,
            },
            Self::Scatter => Canvas {
                width: 1200,
                height: 800,
            },
        }
    }

    /// Default playback cadence.
    pub fn default_interval_ms(self) -> u64 {
        match self {
            Self::Bar => 1500,
            Self::Scatter => 200,
        }
    }

    /// Default year window; `None` means "whatever the data covers".
    pub fn default_years(self) -> Option<RangeInclusive<i32>> {
        match self {
            Self::Bar => Some(1884..=2025),
            Self::Scatter => None,
        }
    }

    /// Default headline prefix.
    pub fn default_title(self) -> &'static str {
        match self {
            Self::Bar => "Hong Kong Observatory Monthly Rainfall Statistics",
            Self::Scatter => "Monthly Average Rainfall",
        }
    }
}

/// Identity of one timeline step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameKey {
    /// Bar charts step by year.
    Year(i32),
    /// Maps step by month.
    Period(PeriodKey),
}

/// Renderable state for one timeline step.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Frame {
    /// Bar chart.
    Bar(BarFrame),
    /// Scatter map.
    Scatter(ScatterFrame),
}

/// Ordered timeline for `mode`.
///
/// Bar mode steps through years that have data inside `years`. Scatter mode steps through
/// every month from January of the first year to December of the last, including months
/// without data.
pub fn timeline(
    mode: RenderMode,
    series: &MonthlySeries,
    years: Option<&RangeInclusive<i32>>,
) -> Vec<FrameKey> {
    let in_range = |y: i32| years.is_none_or(|r| r.contains(&y));
    match mode {
        RenderMode::Bar => series
            .years()
            .into_iter()
            .filter(|&y| in_range(y))
            .map(FrameKey::Year)
            .collect(),
        RenderMode::Scatter => {
            let data_years = series.years();
            let (Some(&first), Some(&last)) = (
                data_years.iter().find(|&&y| in_range(y)),
                data_years.iter().rev().find(|&&y| in_range(y)),
            ) else {
                return Vec::new();
            };
            let start = PeriodKey {
                year: first,
                month: 1,
            };
            let end = PeriodKey {
                year: last,
                month: 12,
            };
            (start.ordinal()..=end.ordinal())
                .map(|o| FrameKey::Period(PeriodKey::from_ordinal(o)))
                .collect()
        }
    }
}

/// Stateless frame factory over an immutable series.
#[derive(Clone, Debug)]
pub struct FrameRenderer {
    mode: RenderMode,
    series: MonthlySeries,
    mapper: ValueMapper,
    title: String,
    timeline: Vec<FrameKey>,
}

impl FrameRenderer {
    /// Build a renderer; fails when no data falls inside `years`.
    pub fn new(
        mode: RenderMode,
        series: MonthlySeries,
        years: Option<RangeInclusive<i32>>,
        title: impl Into<String>,
    ) -> RainResult<Self> {
        let timeline = timeline(mode, &series, years.as_ref());
        if timeline.is_empty() {
            let span = years
                .map(|r| format!(" for {}-{}", r.start(), r.end()))
                .unwrap_or_default();
            return Err(RainError::validation(format!("no data available{span}")));
        }
        Ok(Self {
            mode,
            mapper: mode.mapper(),
            series,
            title: title.into(),
            timeline,
        })
    }

    /// Chart variant.
    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Underlying data.
    pub fn series(&self) -> &MonthlySeries {
        &self.series
    }

    /// Ordered timeline.
    pub fn timeline(&self) -> &[FrameKey] {
        &self.timeline
    }

    /// Timeline length (never zero).
    pub fn len(&self) -> usize {
        self.timeline.len()
    }

    /// Always `false`; construction rejects empty timelines.
    pub fn is_empty(&self) -> bool {
        self.timeline.is_empty()
    }

    /// Frame at timeline position `index`.
    pub fn render_index(&self, index: usize) -> RainResult<Frame> {
        let key = *self.timeline.get(index).ok_or_else(|| {
            RainError::validation(format!(
                "frame index {index} out of range (timeline has {} frames)",
                self.timeline.len()
            ))
        })?;
        self.render_key(key)
    }

    /// Frame for an explicit key, which need not be on the timeline.
    pub fn render_key(&self, key: FrameKey) -> RainResult<Frame> {
        debug!(?key, "render frame");
        match (self.mode, key) {
            (RenderMode::Bar, FrameKey::Year(year)) => Ok(Frame::Bar(render_bar_frame(
                year,
                &self.series,
                &self.mapper,
                &self.title,
            ))),
            (RenderMode::Scatter, FrameKey::Period(period)) => Ok(Frame::Scatter(
                render_scatter_frame(period, &self.series, &self.mapper, &self.title),
            )),
            (mode, key) => Err(RainError::validation(format!(
                "{key:?} is not a {mode:?} frame key"
            ))),
        }
    }

    /// Human-readable label for timeline position `index`.
    pub fn label(&self, index: usize) -> Option<String> {
        self.timeline.get(index).map(|k| match k {
            FrameKey::Year(y) => y.to_string(),
            FrameKey::Period(p) => p.to_string(),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frame/renderer.rs"]
mod tests;
