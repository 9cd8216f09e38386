//! Aggregate figures over a finished run.

use crate::core::{ConsolidatedEntry, IntensityLevel};
use crate::export::Hierarchy;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HierarchySummary {
    pub total_entries: usize,
    /// Classified records merged into the entries
    pub source_records: usize,
    pub main_categories: usize,
    pub subcategories: usize,
    pub activity_types: usize,
    pub intensity_levels: usize,
    /// Lowest and highest consolidated MET value
    pub met_range: Option<(f64, f64)>,
    pub entries_by_category: BTreeMap<String, usize>,
}

impl HierarchySummary {
    /// Level counts are unique labels per level, not unique paths.
    pub fn from_entries(entries: &[ConsolidatedEntry]) -> Self {
        let mut level1 = BTreeSet::new();
        let mut level2 = BTreeSet::new();
        let mut level3 = BTreeSet::new();
        let mut level4: BTreeSet<IntensityLevel> = BTreeSet::new();
        let mut entries_by_category = BTreeMap::new();
        let mut met_range: Option<(f64, f64)> = None;

        for entry in entries {
            let path = &entry.path;
            level1.insert(path.level1.as_str());
            level2.insert(path.level2.as_str());
            level3.insert(path.level3.as_str());
            level4.insert(path.level4);
            *entries_by_category.entry(path.level1.clone()).or_insert(0) += 1;

            met_range = Some(match met_range {
                None => (entry.met_value, entry.met_value),
                Some((lo, hi)) => (lo.min(entry.met_value), hi.max(entry.met_value)),
            });
        }

        Self {
            total_entries: entries.len(),
            source_records: entries.iter().map(|e| e.record_count).sum(),
            main_categories: level1.len(),
            subcategories: level2.len(),
            activity_types: level3.len(),
            intensity_levels: level4.len(),
            met_range,
            entries_by_category,
        }
    }
}

/// Indented outline: categories, subcategories, then activities with their
/// bands in brackets.
pub fn render_tree(hierarchy: &Hierarchy) -> String {
    let mut out = String::new();
    for (l1, subcategories) in hierarchy.categories() {
        writeln!(out, "{}", l1).unwrap();
        for (l2, activities) in subcategories {
            writeln!(out, "  {}", l2).unwrap();
            for (l3, intensities) in activities {
                let bands: Vec<&str> = intensities.keys().map(|level| level.label()).collect();
                writeln!(out, "    {} [{}]", l3, bands.join(", ")).unwrap();
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TaxonomyPath;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn entry(
        l1: &str,
        l2: &str,
        l3: &str,
        l4: IntensityLevel,
        met: f64,
        records: usize,
    ) -> ConsolidatedEntry {
        ConsolidatedEntry {
            path: TaxonomyPath::new(l1, l2, l3, l4),
            met_value: met,
            examples: String::new(),
            record_count: records,
        }
    }

    fn sample() -> Vec<ConsolidatedEntry> {
        vec![
            entry("Endurance Sports", "Running", "Running", IntensityLevel::Vigorous, 9.0, 3),
            entry("Endurance Sports", "Running", "Running", IntensityLevel::Moderate, 6.0, 2),
            entry("Endurance Sports", "Walking", "Walking", IntensityLevel::Light, 2.8, 1),
            entry("Sports", "Racket Sports", "Tennis", IntensityLevel::Vigorous, 7.3, 1),
        ]
    }

    #[test]
    fn test_counts_unique_labels() {
        let summary = HierarchySummary::from_entries(&sample());

        assert_eq!(summary.total_entries, 4);
        assert_eq!(summary.source_records, 7);
        assert_eq!(summary.main_categories, 2);
        assert_eq!(summary.subcategories, 3);
        assert_eq!(summary.activity_types, 3);
        assert_eq!(summary.intensity_levels, 3);
        assert_eq!(summary.met_range, Some((2.8, 9.0)));
        assert_eq!(
            summary.entries_by_category,
            BTreeMap::from([("Endurance Sports".to_string(), 3), ("Sports".to_string(), 1)])
        );
    }

    #[test]
    fn test_empty_summary() {
        let summary = HierarchySummary::from_entries(&[]);
        assert_eq!(summary, HierarchySummary::default());
        assert_eq!(summary.met_range, None);
    }

    #[test]
    fn test_render_tree() {
        let hierarchy = Hierarchy::from_entries(&sample());

        let expected = indoc! {"
            Endurance Sports
              Running
                Running [Moderate, Vigorous]
              Walking
                Walking [Light]
            Sports
              Racket Sports
                Tennis [Vigorous]
        "};
        assert_eq!(render_tree(&hierarchy), expected);
    }
}
