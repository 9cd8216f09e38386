use crate::pipeline::PipelineReport;
use crate::summary::{render_tree, HierarchySummary};
use crate::validate::ValidationReport;
use std::fmt::Write;

/// Violation lines shown before truncating.
pub const MAX_ERRORS_SHOWN: usize = 10;

pub fn format_validation(report: &ValidationReport, verbosity: u8) -> String {
    let mut out = String::new();
    if report.is_valid {
        writeln!(
            out,
            "[OK] Validation PASSED - All {} paths have exactly 4 levels",
            report.total_paths
        )
        .unwrap();
    } else {
        writeln!(
            out,
            "[ERROR] Validation FAILED - {} structural problem(s)",
            report.violations.len()
        )
        .unwrap();
        let errors = report.errors();
        for error in errors.iter().take(MAX_ERRORS_SHOWN) {
            writeln!(out, "    [ERROR] {}", error).unwrap();
        }
        if errors.len() > MAX_ERRORS_SHOWN {
            writeln!(out, "    ... and {} more", errors.len() - MAX_ERRORS_SHOWN).unwrap();
        }
    }

    if verbosity > 0 {
        writeln!(out, "\n  Depth distribution:").unwrap();
        for (depth, count) in &report.depth_distribution {
            writeln!(out, "    depth {}: {} path(s)", depth, count).unwrap();
        }
    }
    out
}

pub fn format_summary(summary: &HierarchySummary) -> String {
    let mut out = String::new();
    writeln!(out, "  Hierarchy Summary:").unwrap();
    writeln!(out, "    Total entries: {}", summary.total_entries).unwrap();
    writeln!(out, "    Source records: {}", summary.source_records).unwrap();
    writeln!(out, "    Main categories: {}", summary.main_categories).unwrap();
    writeln!(out, "    Subcategories: {}", summary.subcategories).unwrap();
    writeln!(out, "    Activity types: {}", summary.activity_types).unwrap();
    writeln!(out, "    Intensity levels: {}", summary.intensity_levels).unwrap();
    if let Some((min, max)) = summary.met_range {
        writeln!(out, "    MET range: {:.1} - {:.1}", min, max).unwrap();
    }
    if !summary.entries_by_category.is_empty() {
        writeln!(out, "\n  Entries by category:").unwrap();
        for (category, count) in &summary.entries_by_category {
            writeln!(out, "    {}: {}", category, count).unwrap();
        }
    }
    out
}

pub fn format_run(report: &PipelineReport, verbosity: u8) -> String {
    let mut out = String::new();
    let extraction = &report.extraction;
    let filter = &report.filter;
    let classification = &report.classification;

    writeln!(
        out,
        "[OK] Extracted {} activities from {} page(s)",
        extraction.records, extraction.pages
    )
    .unwrap();
    if verbosity > 0 {
        writeln!(
            out,
            "       └─ {} header, {} unmatched, {} invalid MET, {} empty page(s)",
            extraction.header_lines,
            extraction.unmatched_lines,
            extraction.invalid_met,
            extraction.empty_pages
        )
        .unwrap();
    }
    writeln!(
        out,
        "[OK] Kept {} exercise activities ({} dropped)",
        filter.kept,
        filter.dropped()
    )
    .unwrap();
    if verbosity > 0 {
        writeln!(
            out,
            "       └─ {} below MET floor, {} excluded category, {} casual walking",
            filter.below_floor, filter.excluded_category, filter.casual_walking
        )
        .unwrap();
    }
    writeln!(
        out,
        "[OK] Classified {} activities ({} uncategorized)",
        classification.classified, classification.uncategorized
    )
    .unwrap();
    writeln!(
        out,
        "[OK] Consolidated to {} unique entries",
        report.consolidated_entries
    )
    .unwrap();
    writeln!(out).unwrap();
    out.push_str(&format_summary(&report.summary));
    writeln!(out).unwrap();
    out.push_str(&format_validation(&report.validation, verbosity));

    if verbosity > 0 {
        writeln!(out, "\n  Hierarchy:").unwrap();
        for line in render_tree(&report.hierarchy).lines() {
            writeln!(out, "    {}", line).unwrap();
        }
    }
    out
}

pub fn print_run(report: &PipelineReport, verbosity: u8) {
    print!("{}", format_run(report, verbosity));
}

pub fn print_validation(report: &ValidationReport, verbosity: u8) {
    print!("{}", format_validation(report, verbosity));
}
