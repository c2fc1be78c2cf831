//! CSV ingestion and row cleaning.

use std::path::Path;

use anyhow::Context as _;
use tracing::{debug, info};

use crate::data::record::{Location, RawRecord, ValueField, derive_date};
use crate::foundation::error::{RainError, RainResult};

/// Column arrangement of an input file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordLayout {
    /// Positional station export: `year, month, day, value[, quality]`, preceded by metadata
    /// lines. A header line surviving the skip is discarded like any other non-numeric row.
    Daily,
    /// Named header row with `year, month, latitude, longitude, rainfall` and optionally
    /// `day` and `city`.
    Located,
}

impl RecordLayout {
    /// Metadata lines skipped before the first CSV line unless overridden.
    pub fn default_skip_rows(self) -> usize {
        match self {
            Self::Daily => 2,
            Self::Located => 0,
        }
    }
}

/// Options for [`load`] and [`load_str`].
#[derive(Clone, Copy, Debug)]
pub struct LoadOptions {
    /// Column arrangement.
    pub layout: RecordLayout,
    /// Number of leading lines to ignore.
    pub skip_rows: usize,
}

impl LoadOptions {
    /// Options with the layout's default skip count.
    pub fn new(layout: RecordLayout) -> Self {
        Self {
            layout,
            skip_rows: layout.default_skip_rows(),
        }
    }

    /// Override the skip count.
    pub fn with_skip_rows(mut self, skip_rows: usize) -> Self {
        self.skip_rows = skip_rows;
        self
    }
}

/// Row accounting for one load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct LoadReport {
    /// Non-empty CSV rows examined after the skip.
    pub rows_seen: usize,
    /// Rows that became records.
    pub kept: usize,
    /// Rows whose value was the "no data" sentinel.
    pub missing_values: usize,
    /// Kept rows whose value was the trace sentinel.
    pub trace_values: usize,
    /// Rows whose value text was corrupted or negative.
    pub flagged_values: usize,
    /// Rows with a non-numeric or impossible date/position (includes header lines).
    pub malformed_rows: usize,
}

impl LoadReport {
    /// Rows examined but not kept.
    pub fn dropped(&self) -> usize {
        self.rows_seen - self.kept
    }
}

/// Records plus their load accounting.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoadedData {
    /// Cleaned records in file order.
    pub records: Vec<RawRecord>,
    /// Row accounting.
    pub report: LoadReport,
}

/// Load and clean a CSV file.
///
/// Fails with [`RainError::DataUnavailable`] when `path` does not exist.
#[tracing::instrument(skip(opts), fields(layout = ?opts.layout, skip = opts.skip_rows))]
pub fn load(path: &Path, opts: LoadOptions) -> RainResult<LoadedData> {
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(RainError::data_unavailable(path));
        }
        Err(e) => {
            return Err(anyhow::Error::new(e)
                .context(format!("read data file '{}'", path.display()))
                .into());
        }
    };
    let text = String::from_utf8_lossy(&bytes);
    let loaded = load_str(&text, opts)?;
    info!(
        path = %path.display(),
        kept = loaded.report.kept,
        dropped = loaded.report.dropped(),
        "loaded rainfall records"
    );
    Ok(loaded)
}

/// Load and clean CSV text already in memory.
pub fn load_str(text: &str, opts: LoadOptions) -> RainResult<LoadedData> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let body = skip_lines(text, opts.skip_rows);
    match opts.layout {
        RecordLayout::Daily => load_daily(body),
        RecordLayout::Located => load_located(body),
    }
}

fn skip_lines(text: &str, n: usize) -> &str {
    let mut rest = text;
    for _ in 0..n {
        match rest.find('\n') {
            Some(pos) => rest = &rest[pos + 1..],
            None => return "",
        }
    }
    rest
}

fn reader(body: &str, has_headers: bool) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .has_headers(has_headers)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes())
}

fn is_blank(row: &csv::StringRecord) -> bool {
    row.iter().all(|f| f.is_empty())
}

fn parse_year(s: &str) -> Option<i32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn parse_month(s: &str) -> Option<u8> {
    s.parse::<u8>().ok().filter(|m| (1..=12).contains(m))
}

/// Tally a value cell; returns the usable value when the row should be kept.
fn classify_value(raw: &str, report: &mut LoadReport) -> Option<f64> {
    let field = ValueField::parse(raw);
    match field {
        ValueField::Missing => report.missing_values += 1,
        ValueField::Invalid => report.flagged_values += 1,
        ValueField::Trace => report.trace_values += 1,
        ValueField::Measured(_) => {}
    }
    field.value()
}

fn load_daily(body: &str) -> RainResult<LoadedData> {
    let mut out = LoadedData::default();
    for row in reader(body, false).records() {
        let row = row.context("read csv row")?;
        if is_blank(&row) {
            continue;
        }
        out.report.rows_seen += 1;

        let date = (|| {
            let year = parse_year(row.get(0)?)?;
            let month = parse_month(row.get(1)?)?;
            let day = row.get(2)?.parse::<u8>().ok()?;
            let date = derive_date(year, month, Some(day))?;
            Some((year, month, day, date))
        })();
        let Some((year, month, day, date)) = date else {
            out.report.malformed_rows += 1;
            continue;
        };

        let Some(value) = classify_value(row.get(3).unwrap_or(""), &mut out.report) else {
            continue;
        };
        let quality = row
            .get(4)
            .filter(|q| !q.is_empty())
            .map(ToOwned::to_owned);

        out.records.push(RawRecord {
            year,
            month,
            day: Some(day),
            date,
            location: None,
            value,
            quality,
        });
    }
    out.report.kept = out.records.len();
    debug!(report = ?out.report, "daily layout parsed");
    Ok(out)
}

/// Header positions for the located layout.
struct LocatedColumns {
    year: usize,
    month: usize,
    day: Option<usize>,
    latitude: usize,
    longitude: usize,
    value: usize,
    name: Option<usize>,
}

impl LocatedColumns {
    fn resolve(headers: &csv::StringRecord) -> RainResult<Self> {
        let find = |names: &[&str]| {
            headers
                .iter()
                .position(|h| names.iter().any(|n| h.eq_ignore_ascii_case(n)))
        };
        let required = |names: &[&str]| {
            find(names).ok_or_else(|| {
                RainError::validation(format!("missing required column '{}'", names[0]))
            })
        };
        Ok(Self {
            year: required(&["year"])?,
            month: required(&["month"])?,
            day: find(&["day"]),
            latitude: required(&["latitude", "lat"])?,
            longitude: required(&["longitude", "lon", "lng"])?,
            value: required(&["rainfall", "value", "rainfall_mm", "precipitation"])?,
            name: find(&["city", "name", "location", "station"]),
        })
    }
}

fn load_located(body: &str) -> RainResult<LoadedData> {
    let mut rdr = reader(body, true);
    let headers = rdr.headers().context("read csv header row")?.clone();
    let cols = LocatedColumns::resolve(&headers)?;

    let mut out = LoadedData::default();
    for row in rdr.records() {
        let row = row.context("read csv row")?;
        if is_blank(&row) {
            continue;
        }
        out.report.rows_seen += 1;

        let parsed = (|| {
            let year = parse_year(row.get(cols.year)?)?;
            let month = parse_month(row.get(cols.month)?)?;
            let day = match cols.day.and_then(|i| row.get(i)).filter(|s| !s.is_empty()) {
                Some(s) => Some(s.parse::<u8>().ok()?),
                None => None,
            };
            let date = derive_date(year, month, day)?;
            let location = Location {
                latitude: row.get(cols.latitude)?.parse().ok()?,
                longitude: row.get(cols.longitude)?.parse().ok()?,
                name: cols
                    .name
                    .and_then(|i| row.get(i))
                    .filter(|s| !s.is_empty())
                    .map(ToOwned::to_owned),
            };
            location.is_valid().then_some((year, month, day, date, location))
        })();
        let Some((year, month, day, date, location)) = parsed else {
            out.report.malformed_rows += 1;
            continue;
        };

        let Some(value) = classify_value(row.get(cols.value).unwrap_or(""), &mut out.report)
        else {
            continue;
        };

        out.records.push(RawRecord {
            year,
            month,
            day,
            date,
            location: Some(location),
            value,
            quality: None,
        });
    }
    out.report.kept = out.records.len();
    debug!(report = ?out.report, "located layout parsed");
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/data/loader.rs"]
mod tests;
