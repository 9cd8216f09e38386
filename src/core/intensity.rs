//! Intensity bands over MET values.
//!
//! A band table is an ordered list of half-open `[min, max)` intervals. The
//! first interval containing a value wins and anything above every finite
//! upper bound lands in the last band of the table.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Named intensity band. Variant order is the canonical presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IntensityLevel {
    Light,
    Moderate,
    Vigorous,
    #[serde(rename = "Very Vigorous")]
    VeryVigorous,
}

impl IntensityLevel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Moderate => "Moderate",
            Self::Vigorous => "Vigorous",
            Self::VeryVigorous => "Very Vigorous",
        }
    }
}

impl fmt::Display for IntensityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which banding granularity a run uses. Fixed for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BandScheme {
    /// Light, Moderate, Vigorous, Very Vigorous
    #[default]
    Four,
    /// Light, Moderate, Vigorous (Vigorous is open-ended)
    Three,
}

impl BandScheme {
    pub fn table(self) -> BandTable {
        match self {
            Self::Four => BandTable::four_band(),
            Self::Three => BandTable::three_band(),
        }
    }
}

/// A single `[min, max)` interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntensityBand {
    pub level: IntensityLevel,
    pub min: f64,
    pub max: f64,
}

impl IntensityBand {
    pub fn contains(&self, met: f64) -> bool {
        self.min <= met && met < self.max
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BandTable {
    bands: Vec<IntensityBand>,
}

impl BandTable {
    pub fn four_band() -> Self {
        Self {
            bands: vec![
                band(IntensityLevel::Light, 0.0, 4.0),
                band(IntensityLevel::Moderate, 4.0, 7.0),
                band(IntensityLevel::Vigorous, 7.0, 11.0),
                band(IntensityLevel::VeryVigorous, 11.0, f64::INFINITY),
            ],
        }
    }

    pub fn three_band() -> Self {
        Self {
            bands: vec![
                band(IntensityLevel::Light, 0.0, 4.0),
                band(IntensityLevel::Moderate, 4.0, 7.0),
                band(IntensityLevel::Vigorous, 7.0, f64::INFINITY),
            ],
        }
    }

    /// Band for a MET value. Values past every upper bound fall into the
    /// last (catch-all) band.
    pub fn classify(&self, met: f64) -> IntensityLevel {
        self.bands
            .iter()
            .find(|b| b.contains(met))
            .or_else(|| self.bands.last())
            .map(|b| b.level)
            .unwrap_or(IntensityLevel::Light)
    }

    pub fn band(&self, level: IntensityLevel) -> Option<&IntensityBand> {
        self.bands.iter().find(|b| b.level == level)
    }
}

impl Default for BandTable {
    fn default() -> Self {
        Self::four_band()
    }
}

fn band(level: IntensityLevel, min: f64, max: f64) -> IntensityBand {
    IntensityBand { level, min, max }
}
