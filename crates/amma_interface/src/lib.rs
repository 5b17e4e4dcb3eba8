//! Trait definitions for the services AMMA orchestrates.
//!
//! Every hosted collaborator (persistence, document download, PDF text
//! extraction, chat model, video generation) sits behind a trait so the
//! pipeline can be driven by real clients or by test doubles.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod tools;
mod traits;

pub use tools::{AgentTool, ToolRegistry};
pub use traits::{
    ChatDriver, DocumentSource, ExtractedDocument, PatientFileStore, TextExtractor,
    VideoGenerator,
};
