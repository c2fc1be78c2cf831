//! Value → color/marker-size encodings.
//!
//! Both mappings are pure functions over fixed constant tables.

use crate::foundation::core::Rgb8;
use crate::foundation::error::{RainError, RainResult};

/// Lower edge of the gradient band (inclusive).
pub const BAND_LOW_MM: f64 = 50.0;
/// Upper edge of the gradient band (inclusive).
pub const BAND_HIGH_MM: f64 = 600.0;

/// Color for values below [`BAND_LOW_MM`].
pub const DRY_COLOR: Rgb8 = Rgb8::from_hex(0xFFD700);
/// Color for values above [`BAND_HIGH_MM`].
pub const EXTREME_COLOR: Rgb8 = Rgb8::from_hex(0x000000);
/// Five steps from light to dark blue across the gradient band.
pub const BAND_GRADIENT: [Rgb8; 5] = [
    Rgb8::from_hex(0x87CEEB),
    Rgb8::from_hex(0x4682B4),
    Rgb8::from_hex(0x1E90FF),
    Rgb8::from_hex(0x0000FF),
    Rgb8::from_hex(0x000080),
];

/// Dry-to-wet sequential blues used for the map.
pub const RAINFALL_STOPS: [Rgb8; 9] = [
    Rgb8::from_hex(0xF7FBFF),
    Rgb8::from_hex(0xDEEBF7),
    Rgb8::from_hex(0xC6DBEF),
    Rgb8::from_hex(0x9ECAE1),
    Rgb8::from_hex(0x6BAED6),
    Rgb8::from_hex(0x4292C6),
    Rgb8::from_hex(0x2171B5),
    Rgb8::from_hex(0x08519C),
    Rgb8::from_hex(0x08306B),
];

/// Global map color range, in millimetres.
pub const MAP_RANGE_MM: (f64, f64) = (0.0, 300.0);

/// Smallest marker area.
pub const MIN_MARKER_SIZE: f64 = 20.0;
/// Largest marker area.
pub const MAX_MARKER_SIZE: f64 = 200.0;
/// Marker area per millimetre before clamping.
const MARKER_SIZE_PER_MM: f64 = 2.0;

/// Discrete band a bar value falls in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Band {
    /// Below [`BAND_LOW_MM`].
    Dry,
    /// Inside `[BAND_LOW_MM, BAND_HIGH_MM]`, with the gradient step index.
    Gradient(usize),
    /// Above [`BAND_HIGH_MM`].
    Extreme,
}

impl Band {
    /// Classify `value`. NaN and negatives fall into [`Band::Dry`].
    pub fn of(value: f64) -> Self {
        if value.is_nan() || value < BAND_LOW_MM {
            return Self::Dry;
        }
        if value > BAND_HIGH_MM {
            return Self::Extreme;
        }
        let t = (value - BAND_LOW_MM) / (BAND_HIGH_MM - BAND_LOW_MM);
        let last = BAND_GRADIENT.len() - 1;
        Self::Gradient(((t * last as f64) as usize).min(last))
    }

    /// Fill color of the band.
    pub fn color(self) -> Rgb8 {
        match self {
            Self::Dry => DRY_COLOR,
            Self::Gradient(i) => BAND_GRADIENT[i.min(BAND_GRADIENT.len() - 1)],
            Self::Extreme => EXTREME_COLOR,
        }
    }
}

/// Continuous colormap with evenly spaced stops over `[vmin, vmax]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Colormap {
    stops: Vec<Rgb8>,
    vmin: f64,
    vmax: f64,
}

impl Colormap {
    /// Create a validated colormap.
    pub fn new(stops: Vec<Rgb8>, vmin: f64, vmax: f64) -> RainResult<Self> {
        if stops.len() < 2 {
            return Err(RainError::validation("colormap needs at least two stops"));
        }
        if !(vmin.is_finite() && vmax.is_finite() && vmin < vmax) {
            return Err(RainError::validation(format!(
                "colormap range must satisfy vmin < vmax, got [{vmin}, {vmax}]"
            )));
        }
        Ok(Self { stops, vmin, vmax })
    }

    /// The map's blues over [`MAP_RANGE_MM`].
    pub fn rainfall() -> Self {
        Self {
            stops: RAINFALL_STOPS.to_vec(),
            vmin: MAP_RANGE_MM.0,
            vmax: MAP_RANGE_MM.1,
        }
    }

    /// Stops, low to high.
    pub fn stops(&self) -> &[Rgb8] {
        &self.stops
    }

    /// `(vmin, vmax)`.
    pub fn range(&self) -> (f64, f64) {
        (self.vmin, self.vmax)
    }

    /// Sample at normalized position `t` (clamped to `[0, 1]`).
    pub fn sample(&self, t: f64) -> Rgb8 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let segments = (self.stops.len() - 1) as f64;
        let pos = t * segments;
        let i = (pos.floor() as usize).min(self.stops.len() - 2);
        self.stops[i].lerp(self.stops[i + 1], pos - i as f64)
    }

    /// Color for a data value; out-of-range values clamp to the end stops.
    pub fn color_for(&self, value: f64) -> Rgb8 {
        self.sample((value - self.vmin) / (self.vmax - self.vmin))
    }
}

/// Legend swatch.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LegendEntry {
    /// Swatch label.
    pub label: String,
    /// Swatch color.
    pub color: Rgb8,
}

/// Visual encoding for one rendering mode.
#[derive(Clone, Debug, PartialEq)]
pub enum ValueMapper {
    /// Three-tier bands for bar charts.
    Banded,
    /// Continuous colormap plus marker sizing for scatter maps.
    Continuous(Colormap),
}

impl ValueMapper {
    /// Bar-chart mapping.
    pub fn bar() -> Self {
        Self::Banded
    }

    /// Scatter-map mapping over [`MAP_RANGE_MM`].
    pub fn scatter() -> Self {
        Self::Continuous(Colormap::rainfall())
    }

    /// Fill color for `value`.
    pub fn color_for(&self, value: f64) -> Rgb8 {
        match self {
            Self::Banded => Band::of(value).color(),
            Self::Continuous(cmap) => cmap.color_for(value),
        }
    }

    /// Marker area for `value`; `None` for bar charts.
    pub fn size_for(&self, value: f64) -> Option<f64> {
        match self {
            Self::Banded => None,
            Self::Continuous(_) => Some(marker_size(value)),
        }
    }

    /// Swatches describing the bands (empty for continuous maps, which draw a colorbar).
    pub fn legend(&self) -> Vec<LegendEntry> {
        match self {
            Self::Banded => vec![
                LegendEntry {
                    label: format!("< {BAND_LOW_MM:.0}mm"),
                    color: DRY_COLOR,
                },
                LegendEntry {
                    label: format!("{BAND_LOW_MM:.0}-{BAND_HIGH_MM:.0}mm"),
                    color: BAND_GRADIENT[1],
                },
                LegendEntry {
                    label: format!("> {BAND_HIGH_MM:.0}mm"),
                    color: EXTREME_COLOR,
                },
            ],
            Self::Continuous(_) => Vec::new(),
        }
    }
}

/// `clamp(value * 2, 20, 200)`; NaN maps to the minimum.
pub fn marker_size(value: f64) -> f64 {
    if value.is_nan() {
        return MIN_MARKER_SIZE;
    }
    (value * MARKER_SIZE_PER_MM).clamp(MIN_MARKER_SIZE, MAX_MARKER_SIZE)
}

#[cfg(test)]
#[path = "../tests/unit/colormap.rs"]
mod tests;
