//! Extraction-to-hierarchy pipeline for the Compendium of Physical Activities.
//!
//! Reads activity rows from a paginated document, converts imperial units,
//! drops non-exercise rows, classifies each row into a four-level taxonomy
//! (main category, subcategory, activity, intensity band), consolidates
//! duplicates and exports a validated nested JSON hierarchy.

pub mod classify;
pub mod cli;
pub mod commands;
pub mod config;
pub mod consolidate;
pub mod core;
pub mod errors;
pub mod export;
pub mod extract;
pub mod filter;
pub mod io;
pub mod output;
pub mod pipeline;
pub mod summary;
pub mod transform;
pub mod validate;

// Re-export commonly used types
pub use crate::core::{
    BandScheme, BandTable, ClassifiedRecord, ConsolidatedEntry, IntensityLevel, RawRecord,
    TaxonomyPath,
};

pub use crate::config::{CategoryRule, PipelineConfig, RuleSet};
pub use crate::errors::{Error, Result};
pub use crate::export::{Hierarchy, HierarchyEntry};
pub use crate::io::{open_source, PageSource, PdfDocument, TextDocument};
pub use crate::pipeline::{run_pipeline, validate_existing, PipelineReport};
pub use crate::validate::{validate_hierarchy, validate_value, ValidationReport};
