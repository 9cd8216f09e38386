//! Structural validation of an exported hierarchy.
//!
//! Walks the tree depth first. Every list reached is a leaf; its depth is the
//! number of keyed levels above it and must be exactly four. Problems are
//! collected into a [`ValidationReport`], never raised.

use crate::errors::Result;
use crate::export::Hierarchy;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// Required number of keyed levels above each entry list.
pub const EXPECTED_DEPTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// A list reached at the wrong depth
    WrongDepth,
    /// A scalar sitting where a mapping or list belongs
    NonListLeaf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathViolation {
    pub path: String,
    pub depth: usize,
    pub kind: ViolationKind,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    /// Leaves reached, including scalar leaves
    pub total_paths: usize,
    /// Depth → number of leaves at that depth
    pub depth_distribution: BTreeMap<usize, usize>,
    pub violations: Vec<PathViolation>,
}

impl ValidationReport {
    /// Human-readable violation lines.
    pub fn errors(&self) -> Vec<String> {
        self.violations
            .iter()
            .map(|v| match v.kind {
                ViolationKind::WrongDepth => format!("Path with depth {}: {}", v.depth, v.path),
                ViolationKind::NonListLeaf => {
                    format!("Non-list leaf at depth {}: {}", v.depth, v.path)
                }
            })
            .collect()
    }
}

/// Validate an untyped tree, e.g. a freshly loaded export. Empty mappings
/// hold no leaves, so `{}` is valid with zero paths.
pub fn validate_value(root: &Value) -> ValidationReport {
    let mut report = ValidationReport::default();
    walk(root, 0, "", &mut report);
    report.is_valid = report.violations.is_empty();
    report
}

/// Validate an in-memory hierarchy through the same walk as a loaded file.
pub fn validate_hierarchy(hierarchy: &Hierarchy) -> Result<ValidationReport> {
    Ok(validate_value(&hierarchy.to_value()?))
}

/// Load an exported file and validate it.
pub fn validate_file(path: &Path) -> Result<ValidationReport> {
    let value = crate::output::json::load_hierarchy(path)?;
    Ok(validate_value(&value))
}

fn walk(node: &Value, depth: usize, path: &str, report: &mut ValidationReport) {
    match node {
        Value::Array(_) => {
            record_leaf(depth, report);
            if depth != EXPECTED_DEPTH {
                report.violations.push(violation(path, depth, ViolationKind::WrongDepth));
            }
        }
        Value::Object(map) => {
            for (key, child) in map {
                let child_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{}/{}", path, key)
                };
                walk(child, depth + 1, &child_path, report);
            }
        }
        _ => {
            record_leaf(depth, report);
            report
                .violations
                .push(violation(path, depth, ViolationKind::NonListLeaf));
        }
    }
}

fn record_leaf(depth: usize, report: &mut ValidationReport) {
    report.total_paths += 1;
    *report.depth_distribution.entry(depth).or_insert(0) += 1;
}

fn violation(path: &str, depth: usize, kind: ViolationKind) -> PathViolation {
    PathViolation {
        path: path.to_string(),
        depth,
        kind,
    }
}
