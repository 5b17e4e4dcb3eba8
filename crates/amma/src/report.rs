//! Console output for the binaries.
//!
//! Logs go to stderr through `tracing`; everything here is the
//! operator-facing report on stdout.

use amma_error::{AmmaError, AmmaErrorKind, VideoFailureCategory};
use amma_narrative::VideoOutcome;

const WIDTH: usize = 60;

/// A line of `=`.
pub fn rule() -> String {
    "=".repeat(WIDTH)
}

/// Print `title` between two rules.
pub fn banner(title: &str) {
    println!("{}", rule());
    println!("{title}");
    println!("{}", rule());
}

/// Print why a video job produced nothing, with remediation steps.
pub fn print_video_failure(reason: &str, category: VideoFailureCategory) {
    println!();
    banner("VIDEO GENERATION FAILED");
    println!("Error: {reason}");
    println!();
    println!("{category}");
    println!("{:-<60}", "");
    for line in category.remediation() {
        println!("  {line}");
    }
    println!();
}

/// Print the result of the video step.
pub fn print_video_outcome(outcome: &VideoOutcome) {
    match outcome {
        VideoOutcome::Completed {
            job_id,
            url,
            attempts,
            recorded,
        } => {
            println!();
            println!("Video generated (job {job_id}, {attempts} status checks)");
            println!("Video URL: {url}");
            if *recorded {
                println!("Video URL saved to database");
            }
        }
        VideoOutcome::Failed {
            reason, category, ..
        } => print_video_failure(reason, *category),
        VideoOutcome::TimedOut { job_id, attempts } => {
            println!();
            banner("VIDEO GENERATION TIMED OUT");
            println!("Job {job_id} was still rendering after {attempts} status checks.");
            println!("It may still finish; no record was written.");
            println!();
        }
    }
}

fn error_message(err: &AmmaError) -> String {
    match err.kind() {
        AmmaErrorKind::Config(config) => config.message.clone(),
        other => other.to_string(),
    }
}

/// Lines explaining a missing prerequisite and how to provide it.
pub fn missing_prerequisite_lines(err: &AmmaError) -> Vec<String> {
    vec![
        format!("Error: {}", error_message(err)),
        String::new(),
        "Set the required credentials, for example:".to_string(),
        "  export OPENAI_API_KEY='sk-your-key-here'".to_string(),
        "  export SUPABASE_KEY='your-service-key'".to_string(),
        "A .env file in the working directory is also read.".to_string(),
    ]
}

/// Lines explaining a configuration file that could not be loaded.
pub fn config_error_lines(err: &AmmaError) -> Vec<String> {
    vec![
        format!("Failed to load configuration: {}", error_message(err)),
        "Check the configuration file passed with --config, ./amma.toml, or ~/.config/amma/amma.toml.".to_string(),
    ]
}

/// Print a missing prerequisite and how to provide it.
pub fn print_missing_prerequisite(err: &AmmaError) {
    for line in missing_prerequisite_lines(err) {
        eprintln!("{line}");
    }
}

/// Print why the configuration could not be loaded.
pub fn print_config_error(err: &AmmaError) {
    for line in config_error_lines(err) {
        eprintln!("{line}");
    }
}

/// Print a fatal agent error with troubleshooting steps.
pub fn print_agent_failure(err: &AmmaError) {
    eprintln!();
    eprintln!("Error running agent: {err}");
    eprintln!();
    eprintln!("Troubleshooting:");
    eprintln!("1. Check OPENAI_API_KEY is valid");
    eprintln!("2. Ensure you have an internet connection");
    eprintln!("3. Verify the database has a patient_files table");
}
