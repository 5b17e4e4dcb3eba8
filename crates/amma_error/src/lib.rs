//! Error types for the AMMA workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! [`AmmaError`] aggregates every crate error so `?` works across crate
//! boundaries.
//!
//! # Examples
//!
//! ```
//! use amma_error::{AmmaResult, ConfigError};
//!
//! fn require_key() -> AmmaResult<String> {
//!     Err(ConfigError::new("OPENAI_API_KEY not set"))?
//! }
//!
//! let err = require_key().unwrap_err();
//! assert!(err.is_missing_prerequisite());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod agent;
mod config;
mod database;
mod document;
mod error;
mod http;
mod video;

pub use agent::{AgentError, AgentErrorKind};
pub use config::ConfigError;
pub use database::{DatabaseError, DatabaseErrorKind};
pub use document::{DocumentError, DocumentErrorKind};
pub use error::{AmmaError, AmmaErrorKind, AmmaResult};
pub use http::HttpError;
pub use video::{VideoError, VideoErrorKind, VideoFailureCategory};
