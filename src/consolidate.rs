//! Merging of records that share a taxonomy path.
//!
//! Grouping is a full barrier: every classified record must be present before
//! any entry can be produced.

use crate::core::{BandTable, ClassifiedRecord, ConsolidatedEntry, TaxonomyPath};
use indexmap::IndexMap;
use std::cmp::Ordering;

/// Descriptions kept per entry.
pub const MAX_EXAMPLES: usize = 3;

pub const EXAMPLE_SEPARATOR: &str = " / ";

/// Statistical median; the mean of the middle pair for even counts.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Ties go to the even tenth, so 6.25 becomes 6.2.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

/// Round to a tenth without leaving the band the value was classified into.
///
/// A median of 6.97 rounds to 7.0, which would no longer be Moderate; in
/// that case the value is truncated to 6.9 instead.
pub fn round_within_band(value: f64, path: &TaxonomyPath, bands: &BandTable) -> f64 {
    let rounded = round_to_tenth(value);
    match bands.band(path.level4) {
        Some(band) if rounded >= band.max => (value * 10.0).floor() / 10.0,
        _ => rounded,
    }
}

/// Group by path in encounter order and collapse each group into one entry.
pub fn consolidate(records: Vec<ClassifiedRecord>, bands: &BandTable) -> Vec<ConsolidatedEntry> {
    let mut groups: IndexMap<TaxonomyPath, Vec<ClassifiedRecord>> = IndexMap::new();
    for record in records {
        groups.entry(record.path.clone()).or_default().push(record);
    }

    let mut entries: Vec<ConsolidatedEntry> = groups
        .into_iter()
        .filter_map(|(path, group)| build_entry(path, &group, bands))
        .collect();

    entries.sort_by(compare_entries);
    tracing::info!("Consolidated to {} unique activities", entries.len());
    entries
}

fn build_entry(
    path: TaxonomyPath,
    group: &[ClassifiedRecord],
    bands: &BandTable,
) -> Option<ConsolidatedEntry> {
    let values: Vec<f64> = group.iter().map(|r| r.met_value).collect();
    let met_value = round_within_band(median(&values)?, &path, bands);
    let examples = group
        .iter()
        .take(MAX_EXAMPLES)
        .map(|r| r.description.as_str())
        .collect::<Vec<_>>()
        .join(EXAMPLE_SEPARATOR);
    tracing::debug!(
        path = %path.display_path(),
        records = group.len(),
        met_value,
        "Merged records"
    );

    Some(ConsolidatedEntry {
        path,
        met_value,
        examples,
        record_count: group.len(),
    })
}

/// Main category, subcategory and activity ascending, then MET value
/// descending; the band decides only between otherwise equal entries.
fn compare_entries(a: &ConsolidatedEntry, b: &ConsolidatedEntry) -> Ordering {
    a.path
        .level1
        .cmp(&b.path.level1)
        .then_with(|| a.path.level2.cmp(&b.path.level2))
        .then_with(|| a.path.level3.cmp(&b.path.level3))
        .then_with(|| b.met_value.total_cmp(&a.met_value))
        .then_with(|| a.path.level4.cmp(&b.path.level4))
}
