//! Pure filtering of raw records.
//!
//! Drops rows that are below the MET floor, rows under non-exercise headings,
//! and casual walking. The compendium files brisk hiking and strolling to the
//! shops under the same "Walking" heading, so walking rows need either a
//! higher MET value or an exercise keyword to stay.

use crate::config::PipelineConfig;
use crate::core::RawRecord;
use serde::Serialize;

/// Why a record was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDecision {
    Keep,
    BelowFloor,
    ExcludedCategory,
    CasualWalking,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterStats {
    pub input: usize,
    pub below_floor: usize,
    pub excluded_category: usize,
    pub casual_walking: usize,
    pub kept: usize,
}

impl FilterStats {
    pub fn dropped(&self) -> usize {
        self.below_floor + self.excluded_category + self.casual_walking
    }
}

/// Decide the fate of one record. Rules apply in order: floor, excluded
/// heading, walking.
pub fn decide(record: &RawRecord, config: &PipelineConfig) -> FilterDecision {
    if record.met_value < config.min_met_value {
        return FilterDecision::BelowFloor;
    }
    if config.is_excluded(&record.heading) {
        return FilterDecision::ExcludedCategory;
    }
    if record.heading == config.walking.heading && !is_exercise_walking(record, config) {
        return FilterDecision::CasualWalking;
    }
    FilterDecision::Keep
}

fn is_exercise_walking(record: &RawRecord, config: &PipelineConfig) -> bool {
    if record.met_value >= config.walking.min_met_value {
        return true;
    }
    let description = record.description.to_lowercase();
    config
        .walking
        .exercise_keywords
        .iter()
        .any(|kw| description.contains(kw.as_str()))
}

/// Keep exercise records, preserving their order.
pub fn filter_activities(
    records: Vec<RawRecord>,
    config: &PipelineConfig,
) -> (Vec<RawRecord>, FilterStats) {
    let mut stats = FilterStats {
        input: records.len(),
        ..FilterStats::default()
    };

    let kept: Vec<RawRecord> = records
        .into_iter()
        .filter(|record| match decide(record, config) {
            FilterDecision::Keep => true,
            FilterDecision::BelowFloor => {
                stats.below_floor += 1;
                false
            }
            FilterDecision::ExcludedCategory => {
                stats.excluded_category += 1;
                false
            }
            FilterDecision::CasualWalking => {
                stats.casual_walking += 1;
                false
            }
        })
        .collect();

    stats.kept = kept.len();
    tracing::info!(
        input = stats.input,
        kept = stats.kept,
        "Filtered: {} → {} activities",
        stats.input,
        stats.kept
    );
    (kept, stats)
}
