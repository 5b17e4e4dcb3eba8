//! AMMA - medical video script generator.
//!
//! Reads every file stored for a patient, has a tool-calling language model
//! write a short plain-language narration script about the diagnosis, and
//! can turn that script into an explainer video whose link is saved back
//! for the patient's doctor.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use amma::{AmmaConfig, VideoScriptPipeline, connect_services};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AmmaConfig::load()?;
//!     let pipeline = VideoScriptPipeline::from_services(connect_services(&config)?, &config);
//!
//!     let run = pipeline.run("pat@example.com", true, Some("doc@example.com")).await?;
//!     println!("{}", run.script);
//!     if let Some(url) = run.video_url() {
//!         println!("Video: {url}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Cargo Features
//!
//! - `pdf` (default) - read PDF documents with `lopdf`
//! - `api` - enable tests that call hosted services
//!
//! # Architecture
//!
//! - `amma_error` - error types
//! - `amma_core` - records, job model, conversation types, configuration
//! - `amma_interface` - service traits and the tool registry
//! - `amma_database` - Supabase (PostgREST) client
//! - `amma_models` - OpenAI chat and video clients
//! - `amma_narrative` - retriever, script agent, video driver, pipeline
//!
//! This crate re-exports everything for convenience.

pub use amma_core::*;
pub use amma_database::SupabaseClient;
pub use amma_error::*;
pub use amma_interface::*;
pub use amma_models::{OpenAIClient, OpenAIVideoClient};
pub use amma_narrative::*;

pub mod report;
mod services;
pub mod telemetry;

pub use services::{connect_services, connect_store, connect_video};
