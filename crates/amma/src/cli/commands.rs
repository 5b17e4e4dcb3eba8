//! CLI argument definitions.

use clap::Parser;
use std::path::PathBuf;

/// AMMA - turns a patient's medical files into a narration script and an
/// optional explainer video
#[derive(Parser, Debug)]
#[command(name = "amma")]
#[command(about = "Generate a patient-education video script and optional video", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file to use instead of the default lookup
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}
