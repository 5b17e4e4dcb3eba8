//! Command-line interface module.
//!
//! This module provides the CLI arguments, the interactive prompts, and the
//! session flow for the amma binary.

mod commands;
mod prompts;
mod session;

pub use commands::Cli;
pub use prompts::{Prompter, SessionRequest, collect_request};
pub use session::run_session;
