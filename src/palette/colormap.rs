//! Colormap - linear segmented colormaps over evenly spaced stops

use serde::{Deserialize, Serialize};

use super::{Color, Rgb};
use crate::{Error, Result};

/// Default number of quantization levels.
pub const DEFAULT_LEVELS: usize = 256;

/// Linear colormap through evenly spaced color stops, quantized to `levels`
/// entries.
///
/// ```rust
/// use plotkit::palette::{Color, Colormap};
///
/// let cmap = Colormap::bl_wh_rd();
/// assert_eq!(cmap.sample(0.0), Color::Blue.rgb());
/// assert_eq!(cmap.sample(1.0), Color::Red.rgb());
/// assert_eq!(cmap.lut().len(), 256);
/// ```
///
/// Deserialization goes through [`from_list`](Self::from_list), so the same
/// bounds apply to colormaps read from config files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "RawColormap", try_from = "RawColormap")]
pub struct Colormap {
    name: String,
    stops: Vec<Rgb>,
    levels: usize,
}

impl Colormap {
    /// Create a colormap from at least two stops.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if there are fewer than two stops or
    /// fewer than two levels.
    pub fn from_list(
        name: impl Into<String>,
        stops: impl IntoIterator<Item = Rgb>,
        levels: usize,
    ) -> Result<Self> {
        let name = name.into();
        let stops: Vec<Rgb> = stops.into_iter().collect();
        if stops.len() < 2 {
            return Err(Error::InvalidConfig(format!(
                "colormap {name:?} needs at least 2 stops, got {}",
                stops.len()
            )));
        }
        if levels < 2 {
            return Err(Error::InvalidConfig(format!(
                "colormap {name:?} needs at least 2 levels, got {levels}"
            )));
        }
        Ok(Self {
            name,
            stops,
            levels,
        })
    }

    fn preset(name: &str, colors: &[Color]) -> Self {
        Self {
            name: name.to_string(),
            stops: colors.iter().map(|c| c.rgb()).collect(),
            levels: DEFAULT_LEVELS,
        }
    }

    /// Blue → white → orange.
    #[must_use]
    pub fn bl_wh_or() -> Self {
        Self::preset("BlWhOr", &[Color::Blue, Color::White, Color::Orange])
    }

    /// Blue → white → red.
    #[must_use]
    pub fn bl_wh_rd() -> Self {
        Self::preset("BlWhRd", &[Color::Blue, Color::White, Color::Red])
    }

    /// White → blue.
    #[must_use]
    pub fn wh_bl() -> Self {
        Self::preset("WhBl", &[Color::White, Color::Blue])
    }

    /// White → red.
    #[must_use]
    pub fn wh_rd() -> Self {
        Self::preset("WhRd", &[Color::White, Color::Red])
    }

    /// White → orange.
    #[must_use]
    pub fn wh_or() -> Self {
        Self::preset("WhOr", &[Color::White, Color::Orange])
    }

    /// Colormap name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Color stops, evenly spaced over `[0, 1]`.
    #[must_use]
    pub fn stops(&self) -> &[Rgb] {
        &self.stops
    }

    /// Number of quantization levels.
    #[must_use]
    pub const fn levels(&self) -> usize {
        self.levels
    }

    /// Color at position `t` in `[0, 1]` (clamped), snapped to the nearest level.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn sample(&self, t: f64) -> Rgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let last = (self.levels - 1) as f64;
        self.level((t * last).round() as usize)
    }

    /// The full lookup table, one entry per level.
    #[must_use]
    pub fn lut(&self) -> Vec<Rgb> {
        (0..self.levels).map(|i| self.level(i)).collect()
    }

    /// Reversed colormap, named with an `_r` suffix.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            name: format!("{}_r", self.name),
            stops: self.stops.iter().rev().copied().collect(),
            levels: self.levels,
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    fn level(&self, index: usize) -> Rgb {
        let x = index.min(self.levels - 1) as f64 / (self.levels - 1) as f64;
        let segments = self.stops.len() - 1;
        let scaled = x * segments as f64;
        let segment = (scaled.floor() as usize).min(segments - 1);
        let local = scaled - segment as f64;
        self.stops[segment].lerp(self.stops[segment + 1], local)
    }
}

/// Wire shape, validated on the way in.
#[derive(Serialize, Deserialize)]
struct RawColormap {
    name: String,
    stops: Vec<Rgb>,
    levels: usize,
}

impl From<Colormap> for RawColormap {
    fn from(cmap: Colormap) -> Self {
        Self {
            name: cmap.name,
            stops: cmap.stops,
            levels: cmap.levels,
        }
    }
}

impl TryFrom<RawColormap> for Colormap {
    type Error = Error;

    fn try_from(raw: RawColormap) -> Result<Self> {
        Self::from_list(raw.name, raw.stops, raw.levels)
    }
}
