//! Rule-based assignment of the four-level taxonomy path.
//!
//! Rules are tried in priority order and the first match wins; there is no
//! scoring. The intensity band comes from the MET value alone, through the
//! band table chosen for the run.

use crate::config::{CategoryRule, RuleSet};
use crate::core::{BandTable, ClassifiedRecord, RawRecord, TaxonomyPath};
use rayon::prelude::*;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassificationStats {
    pub input: usize,
    pub classified: usize,
    pub uncategorized: usize,
}

/// Evaluate one rule against a heading and an already-lowercased description.
///
/// Clauses are a conjunction; absent clauses hold vacuously.
pub fn rule_matches(rule: &CategoryRule, heading: &str, description: &str) -> bool {
    if let Some(required) = rule.heading.as_deref() {
        if required != heading {
            return false;
        }
    }
    if !rule
        .keywords_all
        .iter()
        .all(|kw| description.contains(kw.as_str()))
    {
        return false;
    }
    if let Some(any) = rule.keywords_any.as_ref() {
        if !any.iter().any(|kw| description.contains(kw.as_str())) {
            return false;
        }
    }
    !rule
        .keywords_none
        .iter()
        .any(|kw| description.contains(kw.as_str()))
}

/// One rule set plus one band table; both fixed for a whole run.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: RuleSet,
    bands: BandTable,
}

impl Classifier {
    pub fn new(rules: RuleSet, bands: BandTable) -> Self {
        Self { rules, bands }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn bands(&self) -> &BandTable {
        &self.bands
    }

    /// First rule matching the record, if any.
    pub fn find_rule(&self, record: &RawRecord) -> Option<&CategoryRule> {
        let description = record.description.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule_matches(rule, &record.heading, &description))
    }

    pub fn classify(&self, record: RawRecord) -> Option<ClassifiedRecord> {
        let rule = self.find_rule(&record)?;
        let path = TaxonomyPath::new(
            rule.level1.as_str(),
            rule.level2.as_str(),
            rule.level3.as_str(),
            self.bands.classify(record.met_value),
        );
        Some(ClassifiedRecord {
            path,
            met_value: record.met_value,
            description: record.description,
        })
    }

    /// Classify every record, dropping the ones no rule claims. Output order
    /// follows input order in both modes.
    pub fn classify_all(
        &self,
        records: Vec<RawRecord>,
        parallel: bool,
    ) -> (Vec<ClassifiedRecord>, ClassificationStats) {
        let input = records.len();

        let results: Vec<Option<ClassifiedRecord>> = if parallel {
            records
                .into_par_iter()
                .map(|record| self.classify(record))
                .collect()
        } else {
            records
                .into_iter()
                .map(|record| self.classify(record))
                .collect()
        };

        let classified: Vec<ClassifiedRecord> = results.into_iter().flatten().collect();
        let stats = ClassificationStats {
            input,
            classified: classified.len(),
            uncategorized: input - classified.len(),
        };

        if stats.uncategorized > 0 {
            tracing::warn!("Dropped {} uncategorized activities", stats.uncategorized);
        }
        tracing::info!("Assigned hierarchy to {} activities", stats.classified);
        (classified, stats)
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(RuleSet::default_rules(), BandTable::four_band())
    }
}
