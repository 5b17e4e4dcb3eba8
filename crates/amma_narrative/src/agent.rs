//! Tool-calling agent loop.

use amma_core::{FinishReason, GenerateRequest, Message, ToolCall};
use amma_error::{AgentError, AgentErrorKind, AmmaErrorKind, AmmaResult};
use amma_interface::{ChatDriver, ToolRegistry};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Default turn ceiling.
pub const DEFAULT_MAX_TURNS: usize = 10;

/// Result of a finished agent run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentRun {
    /// Text of the final reply
    pub final_output: String,
    /// Model turns taken, including the final one
    pub turns: usize,
    /// Tool calls executed across all turns
    pub tool_calls: usize,
    /// Why the model stopped on the final turn
    pub finish_reason: FinishReason,
}

/// A chat model plus standing instructions and a set of tools.
///
/// Each turn sends the whole conversation and the tool definitions. A
/// reply with tool calls has them executed in order and the results
/// appended; a reply without tool calls ends the run.
pub struct ScriptAgent {
    name: String,
    instructions: String,
    driver: Arc<dyn ChatDriver>,
    tools: ToolRegistry,
    max_turns: usize,
    temperature: Option<f32>,
}

impl ScriptAgent {
    /// Creates an agent with the default turn ceiling.
    pub fn new(
        name: impl Into<String>,
        instructions: impl Into<String>,
        driver: Arc<dyn ChatDriver>,
        tools: ToolRegistry,
    ) -> Self {
        Self {
            name: name.into(),
            instructions: instructions.into(),
            driver,
            tools,
            max_turns: DEFAULT_MAX_TURNS,
            temperature: None,
        }
    }

    /// Sets the turn ceiling.
    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    /// Agent name, used in logs.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the agent on one user input.
    ///
    /// # Errors
    ///
    /// Any chat model error, or [`AgentErrorKind::MaxTurnsExceeded`] when
    /// the model is still calling tools after the last allowed turn. Tool
    /// failures are not errors; they go back to the model as text.
    #[instrument(skip(self, input), fields(agent = %self.name, model = %self.driver.model_name()))]
    pub async fn run(&self, input: &str) -> AmmaResult<AgentRun> {
        let definitions = self.tools.definitions();
        let mut messages = vec![Message::system(&self.instructions), Message::user(input)];
        let mut tool_calls = 0;

        for turn in 1..=self.max_turns {
            let request = GenerateRequest {
                messages: messages.clone(),
                model: None,
                temperature: self.temperature,
                max_tokens: None,
            };

            debug!(turn, messages = messages.len(), "Requesting agent turn");
            let response = self
                .driver
                .generate_with_tools(&request, &definitions)
                .await?;

            if response.message.tool_calls.is_empty() {
                let finish_reason = response.finish_reason;
                if finish_reason != FinishReason::Stop {
                    warn!(?finish_reason, "Final reply did not end normally; output may be incomplete");
                }
                let final_output = response.message.content.unwrap_or_default();
                info!(turn, tool_calls, chars = final_output.len(), "Agent finished");
                return Ok(AgentRun {
                    final_output,
                    turns: turn,
                    tool_calls,
                    finish_reason,
                });
            }

            let calls = response.message.tool_calls.clone();
            messages.push(response.message);

            for call in calls {
                let output = self.call_tool(&call).await;
                tool_calls += 1;
                messages.push(Message::tool_result(call.id, output));
            }
        }

        warn!(max_turns = self.max_turns, "Agent ran out of turns");
        Err(AgentError::new(AgentErrorKind::MaxTurnsExceeded(self.max_turns)).into())
    }

    async fn call_tool(&self, call: &ToolCall) -> String {
        info!(tool = %call.name, "Calling tool");
        match self.tools.execute(&call.name, call.arguments.clone()).await {
            Ok(output) => output,
            Err(e) => {
                warn!(tool = %call.name, error = %e, "Tool call failed");
                match e.kind() {
                    AmmaErrorKind::Agent(agent) => format!("Error: {}", agent.kind),
                    other => format!("Error: {other}"),
                }
            }
        }
    }
}

impl std::fmt::Debug for ScriptAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptAgent")
            .field("name", &self.name)
            .field("provider", &self.driver.provider_name())
            .field("tools", &self.tools)
            .field("max_turns", &self.max_turns)
            .finish()
    }
}
