use crate::foundation::error::{RainError, RainResult};

pub use kurbo::{Point, Rect};

/// Three-letter English month abbreviations, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A `(year, month)` calendar bucket.
///
/// Field order makes the derived `Ord` chronological.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct PeriodKey {
    /// Calendar year.
    pub year: i32,
    /// Month, `1..=12`.
    pub month: u8,
}

impl PeriodKey {
    /// Create a validated period.
    pub fn new(year: i32, month: u8) -> RainResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(RainError::validation(format!(
                "month must be in 1..=12, got {month}"
            )));
        }
        Ok(Self { year, month })
    }

    /// Months elapsed since January of year 0. Consecutive periods differ by one.
    pub fn ordinal(self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }

    /// Inverse of [`PeriodKey::ordinal`].
    pub fn from_ordinal(ordinal: i64) -> Self {
        let year = ordinal.div_euclid(12);
        let month = ordinal.rem_euclid(12) + 1;
        Self {
            year: year as i32,
            month: month as u8,
        }
    }

    /// The following calendar month.
    pub fn next(self) -> Self {
        Self::from_ordinal(self.ordinal() + 1)
    }

    /// Short month name, e.g. `"Jun"`.
    pub fn month_name(self) -> &'static str {
        MONTH_NAMES[usize::from(self.month.clamp(1, 12)) - 1]
    }
}

impl std::fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// Absolute 0-based index into an animation timeline.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> RainResult<Self> {
        if den == 0 {
            return Err(RainError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(RainError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in whole milliseconds, rounded, never zero.
    pub fn frame_duration_ms(self) -> u32 {
        let ms = (1000.0 * f64::from(self.den) / f64::from(self.num)).round();
        (ms as u32).max(1)
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas.
    pub fn new(width: u32, height: u32) -> RainResult<Self> {
        if width == 0 || height == 0 {
            return Err(RainError::validation("canvas width/height must be non-zero"));
        }
        Ok(Self { width, height })
    }
}

/// Opaque sRGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl Rgb8 {
    /// Construct from channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Construct from a packed `0xRRGGBB` literal.
    pub const fn from_hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
        }
    }

    /// Parse `#RRGGBB` (leading `#` optional, case-insensitive).
    pub fn parse(s: &str) -> RainResult<Self> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if s.len() != 6 || !s.is_ascii() {
            return Err(RainError::validation(format!(
                "color must be #RRGGBB, got \"{s}\""
            )));
        }
        let v = u32::from_str_radix(s, 16)
            .map_err(|_| RainError::validation(format!("invalid hex color \"{s}\"")))?;
        Ok(Self::from_hex(v))
    }

    /// Linear interpolation in sRGB space; `t` is clamped to `[0, 1]`.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        fn mix(a: u8, b: u8, t: f64) -> u8 {
            (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8
        }
        Self {
            r: mix(self.r, other.r, t),
            g: mix(self.g, other.g, t),
            b: mix(self.b, other.b, t),
        }
    }

    /// Lower-case `#rrggbb` form, as used in SVG output.
    pub fn to_hex_string(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl serde::Serialize for Rgb8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex_string())
    }
}

impl<'de> serde::Deserialize<'de> for Rgb8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
