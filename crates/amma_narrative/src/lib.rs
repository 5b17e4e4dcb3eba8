//! Patient-education narration and video workflow for AMMA.
//!
//! The workflow runs once per invocation:
//!
//! 1. [`FileRetriever`] gathers a patient's files, inlining PDF text.
//! 2. [`ScriptGenerator`] hands that retrieval to a tool-calling agent
//!    ([`ScriptAgent`]) which writes a narration script.
//! 3. [`VideoJobDriver`] optionally condenses the script into a prompt,
//!    submits a video job, polls it, and has [`ResultRecorder`] link the
//!    result to the doctor.
//!
//! [`VideoScriptPipeline`] wires the stages together from long-lived
//! service handles.
//!
//! # Features
//!
//! - `pdf` (default): PDF text extraction via `lopdf`. Without it, documents
//!   are reported as unreadable inline.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod agent;
mod download;
mod pdf;
mod pipeline;
mod prompt;
mod recorder;
mod retriever;
mod script;
mod tool;
mod video;

pub use agent::{AgentRun, DEFAULT_MAX_TURNS, ScriptAgent};
pub use download::HttpDocumentSource;
pub use pdf::PdfTextExtractor;
pub use pipeline::{PipelineServices, ScriptRun, VideoScriptPipeline};
pub use prompt::{FALLBACK_VIDEO_PROMPT, derive_video_prompt};
pub use recorder::ResultRecorder;
pub use retriever::{FileRetriever, no_files_message};
pub use script::{SCRIPT_AGENT_NAME, SCRIPT_INSTRUCTIONS, ScriptGenerator, script_request};
pub use tool::{PATIENT_FILES_TOOL, PatientFilesTool};
pub use video::{VideoJobDriver, VideoOutcome, VideoSettings};
