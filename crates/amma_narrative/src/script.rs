//! Narration script generation.

use crate::{FileRetriever, PatientFilesTool, ScriptAgent};
use amma_core::AgentConfig;
use amma_error::AmmaResult;
use amma_interface::{ChatDriver, ToolRegistry};
use std::sync::Arc;
use tracing::{info, instrument};

/// Name of the script-writing agent.
pub const SCRIPT_AGENT_NAME: &str = "Medical Video Script Generator";

/// Standing instructions for the script-writing agent.
pub const SCRIPT_INSTRUCTIONS: &str = "You are a medical video script writer for AI-generated animated videos.

When given a patient email:
1. Use the get_patient_files tool to fetch their medical files
2. Read ALL the file contents provided
3. IMMEDIATELY generate a video script

Your script MUST:
- Explain the patient's diagnosis in SIMPLE, everyday language (like explaining to a 5th grader)
- Include visual descriptions for each scene (what animations should show)
- Break complex medical terms into easy-to-understand concepts
- Be encouraging and positive in tone
- Be 1-2 minutes long when spoken (about 150-300 words)

Format your script as:
SCENE 1: [Description]
Visual: [What to animate]
Narration: [What to say]

SCENE 2: [Description]
Visual: [What to animate]
Narration: [What to say]

... and so on

Do NOT ask questions. Do NOT ask for confirmation.
Just read the files and generate the complete video script immediately.

Make it personal, simple, and visual.";

/// The user turn that starts a script run.
pub fn script_request(patient_email: &str) -> String {
    format!(
        "Fetch and analyze all files for patient {patient_email}. Generate a complete video script that explains their diagnosis in simple, visual terms. Do not ask questions, just create the script."
    )
}

/// Writes a narration script from a patient's files.
#[derive(Debug)]
pub struct ScriptGenerator {
    agent: ScriptAgent,
}

impl ScriptGenerator {
    /// Creates a generator whose agent can call the retriever.
    pub fn new(
        driver: Arc<dyn ChatDriver>,
        retriever: Arc<FileRetriever>,
        config: &AgentConfig,
    ) -> Self {
        let mut tools = ToolRegistry::new();
        tools.register(Arc::new(PatientFilesTool::new(retriever)));

        let agent = ScriptAgent::new(SCRIPT_AGENT_NAME, SCRIPT_INSTRUCTIONS, driver, tools)
            .with_max_turns(config.max_turns)
            .with_temperature(config.temperature);

        Self { agent }
    }

    /// Generate the script for `patient_email`.
    ///
    /// # Errors
    ///
    /// Propagates every agent error; none of them are recoverable.
    #[instrument(skip(self))]
    pub async fn generate(&self, patient_email: &str) -> AmmaResult<String> {
        let run = self.agent.run(&script_request(patient_email)).await?;
        info!(turns = run.turns, tool_calls = run.tool_calls, "Script generated");
        Ok(run.final_output)
    }
}
