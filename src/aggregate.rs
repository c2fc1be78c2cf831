//! Monthly aggregation of cleaned records.

use std::collections::BTreeMap;

use tracing::info;

use crate::data::record::{Location, RawRecord};
use crate::foundation::core::PeriodKey;

/// Grouping key used by [`aggregate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Grouping {
    /// One summary per `(year, month)`.
    Period,
    /// One summary per `(year, month, location)`.
    PeriodLocation,
}

/// Monthly total for a period (and, for map data, one location).
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PeriodSummary {
    /// Calendar bucket.
    pub period: PeriodKey,
    /// Sum of the bucket's record values, in millimetres.
    pub value: f64,
    /// Number of records summed.
    pub record_count: usize,
    /// Location of the bucket under [`Grouping::PeriodLocation`].
    pub location: Option<Location>,
}

/// Orderable location identity (micro-degree resolution).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct LocationKey {
    lat_e6: i64,
    lon_e6: i64,
}

impl LocationKey {
    fn of(loc: &Location) -> Self {
        Self {
            lat_e6: (loc.latitude * 1e6).round() as i64,
            lon_e6: (loc.longitude * 1e6).round() as i64,
        }
    }
}

struct Bucket {
    sum: f64,
    count: usize,
    location: Option<Location>,
}

/// Sum records into per-period buckets, sorted ascending by period (then location).
///
/// Periods without records produce no summary.
#[tracing::instrument(skip(records), fields(records = records.len()))]
pub fn aggregate(records: &[RawRecord], grouping: Grouping) -> Vec<PeriodSummary> {
    let mut buckets: BTreeMap<(PeriodKey, Option<LocationKey>), Bucket> = BTreeMap::new();
    for rec in records {
        let loc_key = match grouping {
            Grouping::Period => None,
            Grouping::PeriodLocation => rec.location.as_ref().map(LocationKey::of),
        };
        let bucket = buckets
            .entry((rec.period(), loc_key))
            .or_insert_with(|| Bucket {
                sum: 0.0,
                count: 0,
                location: match grouping {
                    Grouping::Period => None,
                    Grouping::PeriodLocation => rec.location.clone(),
                },
            });
        bucket.sum += rec.value;
        bucket.count += 1;
    }

    let out: Vec<PeriodSummary> = buckets
        .into_iter()
        .map(|((period, _), b)| PeriodSummary {
            period,
            value: b.sum,
            record_count: b.count,
            location: b.location,
        })
        .collect();
    info!(summaries = out.len(), "aggregated monthly totals");
    out
}

/// Sorted, read-only collection of [`PeriodSummary`] values.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MonthlySeries {
    summaries: Vec<PeriodSummary>,
}

impl MonthlySeries {
    /// Aggregate `records` under `grouping`.
    pub fn from_records(records: &[RawRecord], grouping: Grouping) -> Self {
        Self {
            summaries: aggregate(records, grouping),
        }
    }

    /// Wrap existing summaries, sorting them by period.
    pub fn from_summaries(mut summaries: Vec<PeriodSummary>) -> Self {
        summaries.sort_by(|a, b| a.period.cmp(&b.period));
        Self { summaries }
    }

    /// All summaries, ascending by period.
    pub fn summaries(&self) -> &[PeriodSummary] {
        &self.summaries
    }

    /// Number of summaries.
    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    /// Return `true` when there is no data at all.
    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }

    /// Summaries for one period; empty when the period has no data.
    pub fn for_period(&self, period: PeriodKey) -> &[PeriodSummary] {
        let lo = self.summaries.partition_point(|s| s.period < period);
        let hi = self.summaries.partition_point(|s| s.period <= period);
        &self.summaries[lo..hi]
    }

    /// Total for one period, or `None` when the period has no data.
    pub fn value_for(&self, period: PeriodKey) -> Option<f64> {
        let rows = self.for_period(period);
        (!rows.is_empty()).then(|| rows.iter().map(|s| s.value).sum())
    }

    /// Summaries for every month of `year`.
    pub fn for_year(&self, year: i32) -> &[PeriodSummary] {
        let lo = self.summaries.partition_point(|s| s.period.year < year);
        let hi = self.summaries.partition_point(|s| s.period.year <= year);
        &self.summaries[lo..hi]
    }

    /// Distinct years with data, ascending.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.summaries.iter().map(|s| s.period.year).collect();
        years.dedup();
        years
    }

    /// Distinct periods with data, ascending.
    pub fn periods(&self) -> Vec<PeriodKey> {
        let mut periods: Vec<PeriodKey> = self.summaries.iter().map(|s| s.period).collect();
        periods.dedup();
        periods
    }

    /// First and last period with data.
    pub fn span(&self) -> Option<(PeriodKey, PeriodKey)> {
        Some((self.summaries.first()?.period, self.summaries.last()?.period))
    }
}

/// Whole-dataset figures shown by the `stats` command.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct DatasetStats {
    /// Number of summaries.
    pub summaries: usize,
    /// Distinct locations (1 when not grouped by location).
    pub locations: usize,
    /// Earliest period.
    pub first: PeriodKey,
    /// Latest period.
    pub last: PeriodKey,
    /// Mean summary value.
    pub mean: f64,
    /// Wettest summary.
    pub wettest: (PeriodKey, f64),
    /// Driest summary.
    pub driest: (PeriodKey, f64),
}

impl DatasetStats {
    /// Compute stats; `None` for an empty series. Ties resolve to the earliest period.
    pub fn compute(series: &MonthlySeries) -> Option<Self> {
        let rows = series.summaries();
        let (first, last) = series.span()?;
        let mut wettest = (rows[0].period, rows[0].value);
        let mut driest = wettest;
        for s in &rows[1..] {
            if s.value > wettest.1 {
                wettest = (s.period, s.value);
            }
            if s.value < driest.1 {
                driest = (s.period, s.value);
            }
        }
        let mut locations: Vec<LocationKey> = rows
            .iter()
            .filter_map(|s| s.location.as_ref().map(LocationKey::of))
            .collect();
        locations.sort();
        locations.dedup();

        Some(Self {
            summaries: rows.len(),
            locations: locations.len().max(1),
            first,
            last,
            mean: rows.iter().map(|s| s.value).sum::<f64>() / rows.len() as f64,
            wettest,
            driest,
        })
    }
}

#[cfg(test)]
#[path = "../tests/unit/aggregate.rs"]
mod tests;
