//! AMMA CLI binary.
//!
//! Asks for a patient email, writes a narration script from the patient's
//! files, and optionally turns it into a video saved for the doctor.

use amma::report::{self, banner};
use amma::{AmmaConfig, VideoScriptPipeline, connect_services};
use clap::Parser;
use std::process::ExitCode;

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    use cli::{Cli, Prompter, run_session};

    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    if let Err(e) = amma::telemetry::init_console_telemetry(cli.verbose) {
        eprintln!("Failed to initialize logging: {e}");
    }

    banner("AMMA VIDEO SCRIPT GENERATOR");
    println!("Generates patient-education video scripts and videos");
    println!();

    let config = match AmmaConfig::load_from(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            report::print_config_error(&e);
            return ExitCode::FAILURE;
        }
    };

    let services = match connect_services(&config) {
        Ok(services) => services,
        Err(e) if e.is_missing_prerequisite() => {
            report::print_missing_prerequisite(&e);
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("Failed to start: {e}");
            return ExitCode::FAILURE;
        }
    };
    let pipeline = VideoScriptPipeline::from_services(services, &config);

    let mut prompter = match Prompter::stdin() {
        Ok(prompter) => prompter,
        Err(e) => {
            eprintln!("Failed to read input: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Ctrl-C drops the in-flight session; the input thread is left behind
    tokio::select! {
        code = run_session(&pipeline, &mut prompter) => code,
        _ = tokio::signal::ctrl_c() => {
            println!("\n\nCancelled by user");
            ExitCode::SUCCESS
        }
    }
}
