use crate::cli::Cli;
use crate::output::terminal;
use crate::pipeline::validate_existing;
use anyhow::Result;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ValidateConfig {
    pub output: PathBuf,
    pub verbosity: u8,
}

impl From<&Cli> for ValidateConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            output: cli.output.clone(),
            verbosity: cli.verbosity,
        }
    }
}

pub fn validate_output(config: &ValidateConfig) -> Result<()> {
    if config.verbosity > 0 {
        eprintln!("Loading {} for validation", config.output.display());
    }
    let report = validate_existing(&config.output)?;
    terminal::print_validation(&report, config.verbosity);

    if report.is_valid {
        Ok(())
    } else {
        anyhow::bail!("Validation failed")
    }
}
