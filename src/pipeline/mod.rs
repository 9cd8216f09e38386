//! End-to-end extraction-to-hierarchy run.
//!
//! Stages run in a fixed order: extract, filter, convert units, classify,
//! consolidate, export, validate. Filtering sees the source wording, so
//! walking keywords match imperial text such as "mph". Each stage consumes one complete collection
//! and produces the next. Only document-level and I/O failures abort the run;
//! everything else is counted in the returned [`PipelineReport`].

use crate::classify::{ClassificationStats, Classifier};
use crate::config::{PipelineConfig, RuleSet};
use crate::consolidate::consolidate;
use crate::core::RawRecord;
use crate::errors::Result;
use crate::export::{export_hierarchy, Hierarchy};
use crate::extract::{extract_document, ExtractionStats};
use crate::filter::{filter_activities, FilterStats};
use crate::io::PageSource;
use crate::summary::HierarchySummary;
use crate::transform::UnitConverter;
use crate::validate::{validate_file, validate_hierarchy, ValidationReport};
use std::path::Path;
use tracing::{info, info_span, warn};

/// Everything a caller needs to judge a run without reading console output.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub extraction: ExtractionStats,
    pub filter: FilterStats,
    pub classification: ClassificationStats,
    pub consolidated_entries: usize,
    pub summary: HierarchySummary,
    pub validation: ValidationReport,
    pub hierarchy: Hierarchy,
}

impl PipelineReport {
    pub fn is_valid(&self) -> bool {
        self.validation.is_valid
    }
}

/// Run every stage over `source` and write the hierarchy to `output`.
pub fn run_pipeline(
    source: &dyn PageSource,
    config: &PipelineConfig,
    rules: RuleSet,
    output: &Path,
) -> Result<PipelineReport> {
    let span = info_span!(
        "pipeline",
        source = %source.origin().display(),
        bands = ?config.band_scheme,
        parallel = config.parallel,
    );
    let _guard = span.enter();

    let (records, extraction) = {
        let _span = info_span!("extract").entered();
        extract_document(source)?
    };

    let (records, filter) = {
        let _span = info_span!("filter").entered();
        filter_activities(records, config)
    };

    let records = {
        let _span = info_span!("convert_units").entered();
        convert_units(records, config)
    };

    let classifier = Classifier::new(rules, config.band_scheme.table());
    let (classified, classification) = {
        let _span = info_span!("classify", rules = classifier.rules().len()).entered();
        classifier.classify_all(records, config.parallel)
    };

    let entries = {
        let _span = info_span!("consolidate").entered();
        consolidate(classified, classifier.bands())
    };

    let hierarchy = {
        let _span = info_span!("export", output = %output.display()).entered();
        export_hierarchy(&entries, output)?
    };

    let validation = {
        let _span = info_span!("validate").entered();
        let report = validate_hierarchy(&hierarchy)?;
        if report.is_valid {
            info!(paths = report.total_paths, "Hierarchy structure is valid");
        } else {
            warn!(
                violations = report.violations.len(),
                "Hierarchy structure has violations"
            );
        }
        report
    };

    Ok(PipelineReport {
        extraction,
        filter,
        classification,
        consolidated_entries: entries.len(),
        summary: HierarchySummary::from_entries(&entries),
        validation,
        hierarchy,
    })
}

/// Validate a previously exported file without re-running any stage.
pub fn validate_existing(path: &Path) -> Result<ValidationReport> {
    let _span = info_span!("validate_existing", path = %path.display()).entered();
    validate_file(path)
}

fn convert_units(records: Vec<RawRecord>, config: &PipelineConfig) -> Vec<RawRecord> {
    let converter = UnitConverter::new(config.conversion);
    records
        .into_iter()
        .map(|record| converter.convert_record(record))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::IntensityLevel;
    use crate::errors::Error;
    use crate::io::TextDocument;
    use indoc::indoc;
    use tempfile::TempDir;

    fn document(text: &str) -> TextDocument {
        TextDocument::new("compendium.txt", text)
    }

    #[test]
    fn test_pipeline_counts_every_stage() {
        let source = document(indoc! {"
            Major Heading Activity Code METs Description
            Running 12020 7.0 jogging, general
            Running 12150 9.0 running, 5 mph (12 min/mile)
            Inactivity 07010 1.0 lying quietly
            Walking 17150 2.0 walking, household
            Sports 15000 5.0 curling
            page footer
        "});
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("out.json");

        let report = run_pipeline(
            &source,
            &PipelineConfig::default(),
            RuleSet::default_rules(),
            &output,
        )
        .unwrap();

        assert_eq!(report.extraction.records, 5);
        assert_eq!(report.extraction.header_lines, 1);
        assert_eq!(report.extraction.unmatched_lines, 1);
        assert_eq!(report.filter.below_floor, 1);
        assert_eq!(report.filter.casual_walking, 1);
        assert_eq!(report.filter.kept, 3);
        assert_eq!(report.classification.uncategorized, 1);
        assert_eq!(report.consolidated_entries, 1);
        assert_eq!(report.summary.source_records, 2);
        assert!(report.is_valid());
        assert!(output.exists());

        let entries = report
            .hierarchy
            .get("Endurance Sports", "Running", "Running", IntensityLevel::Vigorous)
            .unwrap();
        assert_eq!(entries[0].met_value, 8.0);
        assert!(entries[0].examples.contains("8.0 km/h"));
        assert!(entries[0].examples.contains("7.5 min/km"));
    }

    #[test]
    fn test_filter_sees_text_before_unit_conversion() {
        let source = document("Walking 17200 2.0 walking, 2.0 mph, level\n");
        let temp_dir = TempDir::new().unwrap();
        let mut config = PipelineConfig::default();
        config.walking.exercise_keywords = vec!["mph".to_string()];

        let report = run_pipeline(
            &source,
            &config,
            RuleSet::default_rules(),
            &temp_dir.path().join("out.json"),
        )
        .unwrap();

        assert_eq!(report.filter.kept, 1);
        assert_eq!(report.filter.casual_walking, 0);
        let entries = report
            .hierarchy
            .get("Endurance Sports", "Walking", "Walking", IntensityLevel::Light)
            .unwrap();
        assert!(entries[0].examples.contains("3.2 km/h"));
    }

    #[test]
    fn test_document_with_nothing_kept_writes_empty_valid_tree() {
        let source = document("Sports 15000 5.0 curling\n");
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("out.json");

        let report = run_pipeline(
            &source,
            &PipelineConfig::default(),
            RuleSet::default_rules(),
            &output,
        )
        .unwrap();

        assert_eq!(report.classification.uncategorized, 1);
        assert_eq!(report.consolidated_entries, 0);
        assert!(report.is_valid());
        assert_eq!(report.validation.total_paths, 0);
        assert_eq!(std::fs::read_to_string(&output).unwrap().trim(), "{}");
    }

    #[test]
    fn test_three_band_scheme_has_no_very_vigorous() {
        let source = document("Running 12150 14.5 running, 14 mph\n");
        let temp_dir = TempDir::new().unwrap();
        let config = PipelineConfig::default()
            .with_band_scheme(crate::core::BandScheme::Three)
            .with_parallel(false);

        let report = run_pipeline(
            &source,
            &config,
            RuleSet::default_rules(),
            &temp_dir.path().join("out.json"),
        )
        .unwrap();

        assert_eq!(report.summary.intensity_levels, 1);
        assert!(report
            .hierarchy
            .get("Endurance Sports", "Running", "Running", IntensityLevel::Vigorous)
            .is_some());
    }

    #[test]
    fn test_document_without_activities_is_fatal() {
        let source = document("Major Heading Activity Code\nnothing to see\n");
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("out.json");

        let err = run_pipeline(
            &source,
            &PipelineConfig::default(),
            RuleSet::default_rules(),
            &output,
        )
        .unwrap_err();

        assert!(matches!(err, Error::NoActivities { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn test_validate_existing_reads_export() {
        let source = document("Bicycling 01010 7.5 bicycling, 10-11.9 mph, leisure\n");
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("nested").join("out.json");

        run_pipeline(
            &source,
            &PipelineConfig::default(),
            RuleSet::default_rules(),
            &output,
        )
        .unwrap();
        let report = validate_existing(&output).unwrap();

        assert!(report.is_valid);
        assert_eq!(report.total_paths, 1);
    }
}
