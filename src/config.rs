//! JSON run configuration.
//!
//! Every field is optional; [`VizConfig::resolve`] fills the gaps with per-mode defaults.
//! Command-line flags are applied on top of the file before resolving.

use std::fs::File;
use std::io::BufReader;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::data::MissingDataPolicy;
use crate::data::loader::LoadOptions;
use crate::data::synth::SynthOptions;
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{RainError, RainResult};
use crate::frame::RenderMode;

/// Export frame rate used when none is configured.
pub const DEFAULT_EXPORT_FPS: u32 = 5;

/// File-level configuration.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VizConfig {
    /// Input CSV; the chart's default file when unset.
    pub data: Option<PathBuf>,
    /// Output size in pixels.
    pub canvas: Option<Canvas>,
    /// Playback interval at 1x speed.
    pub interval_ms: Option<u64>,
    /// Frame rate of exported animations.
    pub export_fps: Option<u32>,
    /// First year shown (inclusive).
    pub start_year: Option<i32>,
    /// Last year shown (inclusive).
    pub end_year: Option<i32>,
    /// Headline prefix.
    pub title: Option<String>,
    /// Lines to drop before CSV parsing.
    pub skip_rows: Option<usize>,
    /// What to do when the data file is absent.
    pub on_missing: Option<MissingDataPolicy>,
    /// Seed for synthetic data.
    pub seed: Option<u64>,
}

impl VizConfig {
    /// Parse from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> RainResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| RainError::validation(format!("parse config JSON: {e}")))
    }

    /// Parse from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> RainResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            RainError::validation(format!("open config '{}': {e}", path.display()))
        })?;
        let cfg = Self::from_reader(BufReader::new(f))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values that can never render.
    pub fn validate(&self) -> RainResult<()> {
        if let Some(c) = self.canvas {
            Canvas::new(c.width, c.height)?;
        }
        if self.interval_ms == Some(0) {
            return Err(RainError::validation("interval_ms must be > 0"));
        }
        if self.export_fps == Some(0) {
            return Err(RainError::validation("export_fps must be > 0"));
        }
        if let (Some(start), Some(end)) = (self.start_year, self.end_year)
            && start > end
        {
            return Err(RainError::validation(format!(
                "start_year {start} is after end_year {end}"
            )));
        }
        if self.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(RainError::validation("title must not be empty"));
        }
        Ok(())
    }

    /// Fill unset fields with the defaults for `mode`.
    pub fn resolve(&self, mode: RenderMode) -> RainResult<ResolvedConfig> {
        self.validate()?;

        let years = match (self.start_year, self.end_year, mode.default_years()) {
            (None, None, default) => default,
            (start, end, default) => {
                let lo = start
                    .or(default.as_ref().map(|r| *r.start()))
                    .unwrap_or(i32::MIN);
                let hi = end
                    .or(default.as_ref().map(|r| *r.end()))
                    .unwrap_or(i32::MAX);
                if lo > hi {
                    return Err(RainError::validation(format!(
                        "year range {lo}..={hi} is empty"
                    )));
                }
                Some(lo..=hi)
            }
        };

        Ok(ResolvedConfig {
            mode,
            data: self
                .data
                .clone()
                .unwrap_or_else(|| default_data_path(mode)),
            canvas: self.canvas.unwrap_or(mode.default_canvas()),
            interval: Duration::from_millis(
                self.interval_ms.unwrap_or(mode.default_interval_ms()),
            ),
            export_fps: Fps::new(self.export_fps.unwrap_or(DEFAULT_EXPORT_FPS), 1)?,
            years,
            title: self
                .title
                .clone()
                .unwrap_or_else(|| mode.default_title().to_owned()),
            skip_rows: self
                .skip_rows
                .unwrap_or(mode.layout().default_skip_rows()),
            on_missing: self.on_missing.unwrap_or(mode.default_missing_policy()),
            seed: self.seed.unwrap_or(crate::data::synth::DEFAULT_SEED),
        })
    }
}

/// Conventional input file for `mode`.
pub fn default_data_path(mode: RenderMode) -> PathBuf {
    match mode {
        RenderMode::Bar => PathBuf::from("daily_HKO_RF_ALL.csv"),
        RenderMode::Scatter => PathBuf::from("data/rainfall_data.csv"),
    }
}

/// Fully specified run settings.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedConfig {
    /// Chart kind.
    pub mode: RenderMode,
    /// Input CSV.
    pub data: PathBuf,
    /// Output size in pixels.
    pub canvas: Canvas,
    /// Playback interval at 1x speed.
    pub interval: Duration,
    /// Frame rate of exported animations.
    pub export_fps: Fps,
    /// Years to show; `None` shows everything in the data.
    pub years: Option<RangeInclusive<i32>>,
    /// Headline prefix.
    pub title: String,
    /// Lines to drop before CSV parsing.
    pub skip_rows: usize,
    /// What to do when the data file is absent.
    pub on_missing: MissingDataPolicy,
    /// Seed for synthetic data.
    pub seed: u64,
}

impl ResolvedConfig {
    /// CSV options matching the chart's layout.
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions::new(self.mode.layout()).with_skip_rows(self.skip_rows)
    }

    /// Synthetic data options, narrowed to the configured years when they overlap.
    pub fn synth_options(&self) -> SynthOptions {
        let mut opts = match self.mode {
            RenderMode::Bar => SynthOptions::station(),
            RenderMode::Scatter => SynthOptions::world(),
        }
        .with_seed(self.seed);
        if let Some(years) = &self.years {
            let lo = (*years.start()).max(*opts.years.start());
            let hi = (*years.end()).min(*opts.years.end());
            if lo <= hi {
                opts.years = lo..=hi;
            }
        }
        opts
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
