//! Persistence and console rendering of pipeline results.

pub mod json;
pub mod terminal;

pub use json::{load_hierarchy, write_hierarchy};
pub use terminal::{format_run, format_validation, print_run, print_validation};
