pub mod intensity;

pub use intensity::{BandScheme, BandTable, IntensityBand, IntensityLevel};

use serde::{Deserialize, Serialize};

/// One activity line as printed in the compendium.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Major heading as printed, e.g. "Conditioning Exercise"
    pub heading: String,
    /// Five-digit activity code. Only used to validate the line.
    pub code: String,
    pub met_value: f64,
    pub description: String,
}

impl RawRecord {
    pub fn new(
        heading: impl Into<String>,
        code: impl Into<String>,
        met_value: f64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            heading: heading.into(),
            code: code.into(),
            met_value,
            description: description.into(),
        }
    }
}

/// Main category, subcategory, activity type and intensity band of an activity.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaxonomyPath {
    pub level1: String,
    pub level2: String,
    pub level3: String,
    pub level4: IntensityLevel,
}

impl TaxonomyPath {
    pub fn new(
        level1: impl Into<String>,
        level2: impl Into<String>,
        level3: impl Into<String>,
        level4: IntensityLevel,
    ) -> Self {
        Self {
            level1: level1.into(),
            level2: level2.into(),
            level3: level3.into(),
            level4,
        }
    }

    /// Slash-joined key path, the same form the validator reports.
    pub fn display_path(&self) -> String {
        format!(
            "{}/{}/{}/{}",
            self.level1, self.level2, self.level3, self.level4
        )
    }
}

/// A record that made it through classification with a complete path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedRecord {
    pub path: TaxonomyPath,
    pub met_value: f64,
    pub description: String,
}

/// One entry of the exported hierarchy, one per unique taxonomy path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConsolidatedEntry {
    pub path: TaxonomyPath,
    /// Median of the contributing MET values, to one decimal
    pub met_value: f64,
    /// First three contributing descriptions joined by `" / "`
    pub examples: String,
    /// Number of records that were merged into this entry
    pub record_count: usize,
}
