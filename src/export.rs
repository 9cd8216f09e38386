//! Nested hierarchy export.
//!
//! Structure: Main Category → Subcategory → Activity → Intensity → entries
//!
//! ```json
//! {
//!   "Endurance Sports": {
//!     "Bicycling": {
//!       "Stationary Bike": {
//!         "Moderate": [
//!           { "met_value": 6.8, "examples": "50-100 watts / moderate effort" }
//!         ]
//!       }
//!     }
//!   }
//! }
//! ```

use crate::core::{ConsolidatedEntry, IntensityLevel};
use crate::errors::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Leaf payload under an intensity band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchyEntry {
    pub met_value: f64,
    pub examples: String,
}

pub type IntensityMap = IndexMap<IntensityLevel, Vec<HierarchyEntry>>;
pub type ActivityMap = IndexMap<String, IntensityMap>;
pub type SubcategoryMap = IndexMap<String, ActivityMap>;

/// Exactly four keyed levels above every entry list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hierarchy {
    categories: IndexMap<String, SubcategoryMap>,
}

impl Hierarchy {
    /// Build from consolidated entries, creating levels on first encounter.
    /// Bands under each activity end up in canonical intensity order.
    pub fn from_entries(entries: &[ConsolidatedEntry]) -> Self {
        let mut hierarchy = Self::default();
        for entry in entries {
            hierarchy.insert(entry);
        }
        hierarchy.sort_intensities();
        hierarchy
    }

    fn insert(&mut self, entry: &ConsolidatedEntry) {
        let path = &entry.path;
        self.categories
            .entry(path.level1.clone())
            .or_default()
            .entry(path.level2.clone())
            .or_default()
            .entry(path.level3.clone())
            .or_default()
            .entry(path.level4)
            .or_default()
            .push(HierarchyEntry {
                met_value: entry.met_value,
                examples: entry.examples.clone(),
            });
    }

    fn sort_intensities(&mut self) {
        for intensities in self
            .categories
            .values_mut()
            .flat_map(|subcategories| subcategories.values_mut())
            .flat_map(|activities| activities.values_mut())
        {
            intensities.sort_keys();
        }
    }

    pub fn categories(&self) -> &IndexMap<String, SubcategoryMap> {
        &self.categories
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Entries for one full path.
    pub fn get(
        &self,
        level1: &str,
        level2: &str,
        level3: &str,
        level4: IntensityLevel,
    ) -> Option<&[HierarchyEntry]> {
        self.categories
            .get(level1)?
            .get(level2)?
            .get(level3)?
            .get(&level4)
            .map(Vec::as_slice)
    }

    /// Every full path paired with its entries, in serialized order.
    pub fn paths(&self) -> Vec<(String, &[HierarchyEntry])> {
        let mut paths = Vec::new();
        for (l1, subcategories) in &self.categories {
            for (l2, activities) in subcategories {
                for (l3, intensities) in activities {
                    for (l4, entries) in intensities {
                        paths.push((format!("{}/{}/{}/{}", l1, l2, l3, l4), entries.as_slice()));
                    }
                }
            }
        }
        paths
    }

    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Build the hierarchy and persist it at `output_path`.
pub fn export_hierarchy(entries: &[ConsolidatedEntry], output_path: &Path) -> Result<Hierarchy> {
    let hierarchy = Hierarchy::from_entries(entries);
    crate::output::json::write_hierarchy(&hierarchy, output_path)?;
    tracing::info!("Exported to {}", output_path.display());
    Ok(hierarchy)
}
