use crate::core::BandScheme;
use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

pub const DEFAULT_INPUT: &str = "data/raw/compendium-2024.pdf";
pub const DEFAULT_OUTPUT: &str = "data/processed/activity-hierarchy.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BandsArg {
    /// Light, Moderate, Vigorous, Very Vigorous
    Four,
    /// Light, Moderate, Vigorous
    Three,
}

impl From<BandsArg> for BandScheme {
    fn from(arg: BandsArg) -> Self {
        match arg {
            BandsArg::Four => BandScheme::Four,
            BandsArg::Three => BandScheme::Three,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "metmap")]
#[command(about = "Build a 4-level activity hierarchy from the Compendium of Physical Activities", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Source document (PDF, or form-feed separated .txt)
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Where to write the hierarchy JSON
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Category rules (YAML); built-in rules when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Pipeline settings (TOML)
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Intensity banding; overrides the settings file
    #[arg(long, value_enum)]
    pub bands: Option<BandsArg>,

    /// Only validate an existing output file
    #[arg(long)]
    pub validate_only: bool,

    /// Classify sequentially
    #[arg(long = "no-parallel")]
    pub no_parallel: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbosity: u8,
}

impl Cli {
    /// Default log filter directive for the chosen verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
