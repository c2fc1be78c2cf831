//! Seeded synthetic rainfall used when no data file is available.
//!
//! The values only need to look plausible: each site gets a seasonal base drawn from a
//! latitude-dependent regime plus zero-mean noise at 30% of that base.

use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use tracing::info;

use crate::data::record::{Location, RawRecord, derive_date};

/// Default seed; a fixed seed keeps demo runs reproducible.
pub const DEFAULT_SEED: u64 = 0x5241_494e;

/// Relative standard deviation of the per-month noise.
const NOISE_FRACTION: f64 = 0.3;

/// Stereotyped seasonal pattern chosen from latitude.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeasonalRegime {
    /// North of 40°N: modest mid-year peak.
    Temperate,
    /// 0°N to 40°N: strong June–September monsoon peak.
    Monsoon,
    /// Southern hemisphere: December–February peak.
    Southern,
}

impl SeasonalRegime {
    /// Regime for a latitude in degrees north.
    pub fn for_latitude(latitude: f64) -> Self {
        if latitude > 40.0 {
            Self::Temperate
        } else if latitude > 0.0 {
            Self::Monsoon
        } else {
            Self::Southern
        }
    }

    /// Return `true` when `month` falls in the regime's wet season.
    pub fn is_wet_season(self, month: u8) -> bool {
        match self {
            Self::Temperate => (6..=8).contains(&month),
            Self::Monsoon => (6..=9).contains(&month),
            Self::Southern => matches!(month, 12 | 1 | 2),
        }
    }

    /// Uniform range (mm) the seasonal base is drawn from.
    pub fn base_range(self, month: u8) -> (f64, f64) {
        let wet = self.is_wet_season(month);
        match (self, wet) {
            (Self::Temperate, true) => (60.0, 120.0),
            (Self::Temperate, false) => (30.0, 80.0),
            (Self::Monsoon, true) => (100.0, 300.0),
            (Self::Monsoon, false) => (10.0, 60.0),
            (Self::Southern, true) => (80.0, 150.0),
            (Self::Southern, false) => (40.0, 90.0),
        }
    }
}

/// Generator inputs.
#[derive(Clone, Debug)]
pub struct SynthOptions {
    /// Inclusive year span.
    pub years: RangeInclusive<i32>,
    /// Sites to generate one record per month for.
    pub locations: Vec<Location>,
    /// RNG seed.
    pub seed: u64,
}

impl SynthOptions {
    /// A century of world-city data (1924–2023).
    pub fn world() -> Self {
        Self {
            years: 1924..=2023,
            locations: reference_locations(),
            seed: DEFAULT_SEED,
        }
    }

    /// A single subtropical station covering the bar-chart default years.
    pub fn station() -> Self {
        Self {
            years: 1884..=2025,
            locations: vec![Location::new(22.3022, 114.1742).named("Hong Kong")],
            seed: DEFAULT_SEED,
        }
    }

    /// Override the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Eight reference cities spread over all three regimes.
pub fn reference_locations() -> Vec<Location> {
    [
        ("London", 51.5074, -0.1278),
        ("New York", 40.7128, -74.0060),
        ("Tokyo", 35.6762, 139.6503),
        ("Sydney", -33.8688, 151.2093),
        ("Mumbai", 19.0760, 72.8777),
        ("Cairo", 30.0444, 31.2357),
        ("São Paulo", -23.5505, -46.6333),
        ("Moscow", 55.7558, 37.6176),
    ]
    .into_iter()
    .map(|(name, lat, lon)| Location::new(lat, lon).named(name))
    .collect()
}

/// Produce one record per `(year, month, location)`.
#[tracing::instrument(skip(opts), fields(years = ?opts.years, sites = opts.locations.len()))]
pub fn generate(opts: &SynthOptions) -> Vec<RawRecord> {
    let mut rng = StdRng::seed_from_u64(opts.seed);
    let mut out = Vec::new();
    for year in opts.years.clone() {
        for month in 1..=12u8 {
            let Some(date) = derive_date(year, month, None) else {
                continue;
            };
            for location in &opts.locations {
                let base = seasonal_base(&mut rng, month, location.latitude);
                let noise = Normal::new(0.0, base * NOISE_FRACTION)
                    .map(|n| n.sample(&mut rng))
                    .unwrap_or(0.0);
                out.push(RawRecord {
                    year,
                    month,
                    day: None,
                    date,
                    location: Some(location.clone()),
                    value: (base + noise).max(0.0),
                    quality: None,
                });
            }
        }
    }
    info!(records = out.len(), "generated synthetic rainfall");
    out
}

/// Draw the expected magnitude for one site-month.
pub fn seasonal_base(rng: &mut impl Rng, month: u8, latitude: f64) -> f64 {
    let (lo, hi) = SeasonalRegime::for_latitude(latitude).base_range(month);
    rng.random_range(lo..hi)
}

#[cfg(test)]
#[path = "../../tests/unit/data/synth.rs"]
mod tests;
