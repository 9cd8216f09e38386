// Core configuration types
mod core;
mod loader;
pub mod rules;

pub use self::core::{ConversionFactors, PipelineConfig, WalkingConfig};
pub use loader::{load_rules, load_settings, parse_and_validate_settings};
pub use rules::{CategoryRule, RuleSet};
