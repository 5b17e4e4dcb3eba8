//! Conversions between AMMA core types and the chat API wire types.

use super::dto::{
    ChatCompletionResponse, ChatFunction, ChatFunctionCall, ChatMessage, ChatTool, ChatToolCall,
    function_kind,
};
use amma_core::{FinishReason, GenerateResponse, Message, Role, ToolCall, ToolDefinition};
use amma_error::{AgentError, AgentErrorKind};
use serde_json::Value;
use tracing::debug;

impl From<&Message> for ChatMessage {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role.to_string(),
            content: message.content.clone(),
            tool_calls: message.tool_calls.iter().map(ChatToolCall::from).collect(),
            tool_call_id: message.tool_call_id.clone(),
        }
    }
}

impl From<&ToolCall> for ChatToolCall {
    fn from(call: &ToolCall) -> Self {
        let arguments = match &call.arguments {
            Value::String(raw) => raw.clone(),
            other => other.to_string(),
        };
        Self {
            id: call.id.clone(),
            kind: function_kind(),
            function: ChatFunctionCall {
                name: call.name.clone(),
                arguments,
            },
        }
    }
}

impl From<&ToolDefinition> for ChatTool {
    fn from(tool: &ToolDefinition) -> Self {
        Self {
            kind: function_kind(),
            function: ChatFunction {
                name: tool.name.clone(),
                description: tool.description.clone(),
                parameters: tool.parameters.clone(),
            },
        }
    }
}

impl From<ChatToolCall> for ToolCall {
    fn from(call: ChatToolCall) -> Self {
        // Malformed argument JSON is passed through as a string for the tool to reject.
        let arguments = serde_json::from_str(&call.function.arguments)
            .unwrap_or(Value::String(call.function.arguments));
        Self {
            id: call.id,
            name: call.function.name,
            arguments,
        }
    }
}

fn finish_reason(raw: Option<&str>) -> FinishReason {
    match raw {
        Some("stop") => FinishReason::Stop,
        Some("length") => FinishReason::Length,
        Some("tool_calls") | Some("function_call") => FinishReason::ToolCalls,
        Some("content_filter") => FinishReason::ContentFilter,
        _ => FinishReason::Other,
    }
}

/// Take the first choice of a completion as the assistant's reply.
pub(crate) fn into_generate_response(
    response: ChatCompletionResponse,
) -> Result<GenerateResponse, AgentError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| AgentError::new(AgentErrorKind::EmptyResponse))?;

    let tool_calls: Vec<ToolCall> = choice
        .message
        .tool_calls
        .into_iter()
        .map(ToolCall::from)
        .collect();
    debug!(tool_calls = tool_calls.len(), "Converted chat choice");

    Ok(GenerateResponse {
        message: Message {
            role: Role::Assistant,
            content: choice.message.content,
            tool_calls,
            tool_call_id: None,
        },
        finish_reason: finish_reason(choice.finish_reason.as_deref()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tool_call_arguments_are_reencoded_as_strings() {
        let call = ToolCall {
            id: "call_1".to_string(),
            name: "get_patient_files".to_string(),
            arguments: json!({"patient_email": "pat@example.com"}),
        };

        let wire = ChatToolCall::from(&call);

        assert_eq!(wire.kind, "function");
        assert_eq!(wire.function.arguments, r#"{"patient_email":"pat@example.com"}"#);
    }

    #[test]
    fn assistant_tool_turn_serializes_null_content() {
        let message = Message::assistant(
            None,
            vec![ToolCall {
                id: "call_1".to_string(),
                name: "get_patient_files".to_string(),
                arguments: json!({}),
            }],
        );

        let value = serde_json::to_value(ChatMessage::from(&message)).unwrap();

        assert_eq!(value["role"], "assistant");
        assert!(value["content"].is_null());
        assert_eq!(value["tool_calls"][0]["function"]["name"], "get_patient_files");
    }

    #[test]
    fn response_with_tool_calls_parses_arguments() {
        let response: ChatCompletionResponse = serde_json::from_value(json!({
            "id": "chatcmpl-1",
            "choices": [{
                "index": 0,
                "finish_reason": "tool_calls",
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_9",
                        "type": "function",
                        "function": {
                            "name": "get_patient_files",
                            "arguments": "{\"patient_email\":\"pat@example.com\"}"
                        }
                    }]
                }
            }]
        }))
        .unwrap();

        let converted = into_generate_response(response).unwrap();

        assert_eq!(converted.finish_reason, FinishReason::ToolCalls);
        assert_eq!(converted.message.tool_calls[0].id, "call_9");
        assert_eq!(
            converted.message.tool_calls[0].arguments["patient_email"],
            "pat@example.com"
        );
    }

    #[test]
    fn malformed_arguments_survive_as_string() {
        let call = ToolCall::from(ChatToolCall {
            id: "call_2".to_string(),
            kind: function_kind(),
            function: ChatFunctionCall {
                name: "get_patient_files".to_string(),
                arguments: "{not json".to_string(),
            },
        });

        assert_eq!(call.arguments, Value::String("{not json".to_string()));
    }

    #[test]
    fn empty_choices_is_an_error() {
        let response = ChatCompletionResponse {
            id: None,
            choices: Vec::new(),
        };

        let err = into_generate_response(response).unwrap_err();
        assert_eq!(err.kind, AgentErrorKind::EmptyResponse);
    }

    #[test]
    fn api_error_body_is_unpacked() {
        let (code, message) = super::super::dto::parse_api_error(
            r#"{"error":{"message":"You exceeded your current quota","type":"insufficient_quota","code":"insufficient_quota"}}"#,
        );
        assert_eq!(code.as_deref(), Some("insufficient_quota"));
        assert!(message.contains("quota"));

        let (code, message) = super::super::dto::parse_api_error("upstream timeout");
        assert_eq!(code, None);
        assert_eq!(message, "upstream timeout");
    }
}
