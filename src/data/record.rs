use chrono::NaiveDate;

use crate::foundation::core::PeriodKey;

/// Value substituted for a "trace" (negligible but non-zero) reading, in millimetres.
pub const TRACE_VALUE: f64 = 0.01;

/// Sentinels meaning "no reading".
const MISSING_SENTINELS: [&str; 1] = ["***"];

/// Sentinels meaning "negligible positive reading".
const TRACE_SENTINELS: [&str; 2] = ["Trace", "微量"];

/// A station/site position, optionally named.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Location {
    /// Degrees north, `-90..=90`.
    pub latitude: f64,
    /// Degrees east, `-180..=180`.
    pub longitude: f64,
    /// Human-readable site name, when the source carries one.
    pub name: Option<String>,
}

impl Location {
    /// Create an unnamed location.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            name: None,
        }
    }

    /// Attach a display name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Return `true` when both coordinates are finite and inside the geographic range.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// One cleaned input row.
///
/// `value` is always finite and non-negative; rows with a missing or corrupted value never
/// become a `RawRecord`.
#[derive(Clone, Debug, PartialEq)]
pub struct RawRecord {
    /// Calendar year.
    pub year: i32,
    /// Month, `1..=12`.
    pub month: u8,
    /// Day of month, when the source is daily.
    pub day: Option<u8>,
    /// Derived calendar date (first of the month when `day` is absent).
    pub date: NaiveDate,
    /// Site position for located (map) sources.
    pub location: Option<Location>,
    /// Rainfall in millimetres.
    pub value: f64,
    /// Source quality flag, verbatim.
    pub quality: Option<String>,
}

impl RawRecord {
    /// The `(year, month)` bucket this record aggregates into.
    pub fn period(&self) -> PeriodKey {
        PeriodKey {
            year: self.year,
            month: self.month,
        }
    }
}

/// Classification of a raw value cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ValueField {
    /// A usable non-negative reading.
    Measured(f64),
    /// Negligible rainfall; counts as [`TRACE_VALUE`].
    Trace,
    /// No reading; excluded from aggregation.
    Missing,
    /// Corrupted or out-of-range text; excluded and flagged.
    Invalid,
}

impl ValueField {
    /// Classify one value cell.
    pub fn parse(raw: &str) -> Self {
        let s = raw.trim();
        if s.is_empty() || MISSING_SENTINELS.contains(&s) {
            return Self::Missing;
        }
        if TRACE_SENTINELS.iter().any(|t| t.eq_ignore_ascii_case(s)) {
            return Self::Trace;
        }
        match s.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => Self::Measured(v),
            _ => Self::Invalid,
        }
    }

    /// Usable numeric value, if any.
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Measured(v) => Some(v),
            Self::Trace => Some(TRACE_VALUE),
            Self::Missing | Self::Invalid => None,
        }
    }
}

/// Build the derived date, rejecting impossible calendar values.
pub(crate) fn derive_date(year: i32, month: u8, day: Option<u8>) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, u32::from(month), u32::from(day.unwrap_or(1)))
}
