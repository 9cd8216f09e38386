use crate::cli::Cli;
use crate::config::{load_rules, load_settings, PipelineConfig};
use crate::core::BandScheme;
use crate::io::open_source;
use crate::output::terminal;
use crate::pipeline::run_pipeline;
use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub rules: Option<PathBuf>,
    pub settings: Option<PathBuf>,
    pub bands: Option<BandScheme>,
    pub no_parallel: bool,
    pub verbosity: u8,
}

impl From<&Cli> for RunConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            input: cli.input.clone(),
            output: cli.output.clone(),
            rules: cli.config.clone(),
            settings: cli.settings.clone(),
            bands: cli.bands.map(BandScheme::from),
            no_parallel: cli.no_parallel,
            verbosity: cli.verbosity,
        }
    }
}

/// Settings file first, then command-line overrides.
pub fn resolve_settings(config: &RunConfig) -> Result<PipelineConfig> {
    let mut settings = load_settings(config.settings.as_deref())?;
    if let Some(scheme) = config.bands {
        settings = settings.with_band_scheme(scheme);
    }
    if config.no_parallel {
        settings = settings.with_parallel(false);
    }
    Ok(settings)
}

pub fn run_pipeline_command(config: &RunConfig) -> Result<()> {
    let settings = resolve_settings(config)?;
    let rules = load_rules(config.rules.as_deref())?;

    if config.verbosity > 0 {
        eprintln!("Input: {}", config.input.display());
        eprintln!("Output: {}", config.output.display());
    }

    let source = open_source(&config.input)?;
    let report = run_pipeline(source.as_ref(), &settings, rules, &config.output)
        .with_context(|| format!("Failed to process {}", config.input.display()))?;

    // Structural problems are already in the printed report.
    terminal::print_run(&report, config.verbosity);
    println!("\n[OK] Wrote {}", config.output.display());
    Ok(())
}
