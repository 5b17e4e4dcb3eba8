//! Lists what the persistence service holds.
//!
//! With no argument, counts users and lists every patient file. With a
//! patient email, lists only that patient's files.

use amma::report::banner;
use amma::{AmmaConfig, AmmaResult, FileRecord, PatientFileStore, connect_store};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

/// Inspect patient files stored in the database
#[derive(Parser, Debug)]
#[command(name = "amma-check-files")]
#[command(version)]
struct Args {
    /// Only list files for this patient
    patient_email: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file to use instead of the default lookup
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    if let Err(e) = amma::telemetry::init_console_telemetry(args.verbose) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let config = match AmmaConfig::load_from(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            amma::report::print_config_error(&e);
            return ExitCode::FAILURE;
        }
    };

    match check(&args, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_missing_prerequisite() => {
            amma::report::print_missing_prerequisite(&e);
            ExitCode::FAILURE
        }
        Err(e) => {
            error!(error = %e, "File check failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn check(args: &Args, config: &AmmaConfig) -> AmmaResult<()> {
    let store = connect_store(config)?;
    println!("Connected to {}", config.database.url);
    println!();

    let files = match args.patient_email.as_deref() {
        Some(patient_email) => {
            let files = store.files_for_patient(patient_email).await?;
            println!("Files for {patient_email}: {}", files.len());
            files
        }
        None => {
            let users = store.count_users().await?;
            println!("Total users in database: {users}");
            let files = store.all_files().await?;
            println!("Total files in database: {}", files.len());
            files
        }
    };
    println!();

    if files.is_empty() {
        println!("No files have been uploaded yet.");
        println!();
        println!("To test the generator:");
        println!("  1. Log in as a doctor on the web app");
        println!("  2. Add a patient");
        println!("  3. Upload some files for that patient");
        println!("  4. Run amma with that patient's email");
        return Ok(());
    }

    banner("FILES IN DATABASE:");
    for file in &files {
        print_file(file);
    }
    Ok(())
}

fn print_file(file: &FileRecord) {
    let show = |value: Option<&str>| value.unwrap_or("None").to_string();
    println!("  Patient: {}", file.patient_email);
    println!("  File: {}", show(file.file_name.as_deref()));
    println!(
        "  Type: {}",
        file.file_type
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "None".to_string())
    );
    println!("  Doctor: {}", show(file.doctor_email.as_deref()));
    println!("  Date: {}", show(file.created_at.as_deref()));
    println!("  URL: {}", show(file.file_url.as_deref()));
    println!("{:-<60}", "");
}
