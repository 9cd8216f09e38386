//! Command implementations behind the `metmap` binary.
//!
//! - **run**: extract, classify and export a hierarchy, then validate it
//! - **validate**: check an existing export without re-running the pipeline

pub mod run;
pub mod validate;

pub use run::{run_pipeline_command, RunConfig};
pub use validate::{validate_output, ValidateConfig};

use crate::cli::Cli;

/// Dispatch on the parsed command line.
pub fn execute(cli: &Cli) -> anyhow::Result<()> {
    if cli.validate_only {
        validate_output(&ValidateConfig::from(cli))
    } else {
        run_pipeline_command(&RunConfig::from(cli))
    }
}
