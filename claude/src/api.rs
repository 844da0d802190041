//! Wire types for the Messages API.

use crate::{Request, ToolChoice};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct ApiRequest {
    model: String,
    max_tokens: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<ApiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<crate::Tool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<ApiToolChoice>,
}

impl ApiRequest {
    pub(crate) fn from_request(request: &Request, model: &str) -> Self {
        let messages = request
            .messages
            .iter()
            .map(|m| ApiMessage {
                role: "user",
                content: vec![ApiText {
                    r#type: "text",
                    text: m.text.clone(),
                }],
            })
            .collect();

        let tool_choice = request.tool_choice.as_ref().map(|tc| match tc {
            ToolChoice::Any => ApiToolChoice {
                r#type: "any",
                name: None,
            },
            ToolChoice::Tool { name } => ApiToolChoice {
                r#type: "tool",
                name: Some(name.clone()),
            },
        });

        ApiRequest {
            model: model.to_string(),
            max_tokens: request.max_tokens,
            system: request.system.clone(),
            messages,
            temperature: request.temperature,
            tools: request.tools.clone(),
            tool_choice,
        }
    }
}

#[derive(Debug, Serialize)]
struct ApiMessage {
    role: &'static str,
    content: Vec<ApiText>,
}

#[derive(Debug, Serialize)]
struct ApiText {
    r#type: &'static str,
    text: String,
}

#[derive(Debug, Serialize)]
struct ApiToolChoice {
    r#type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse {
    pub(crate) id: String,
    pub(crate) model: String,
    pub(crate) content: Vec<ApiContent>,
    pub(crate) stop_reason: String,
    pub(crate) usage: ApiUsage,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum ApiContent {
    Text {
        text: String,
    },
    ToolUse {
        id: String,
        name: String,
        input: serde_json::Value,
    },
    /// Thinking, redacted thinking and any block type added later.
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiUsage {
    pub(crate) input_tokens: usize,
    pub(crate) output_tokens: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Message, Tool};
    use serde_json::json;

    #[test]
    fn test_forced_tool_choice_serializes() {
        let request = Request::new(vec![Message::user("attack Hype")])
            .with_tools(vec![Tool {
                name: "identify_target".into(),
                description: "Find the target".into(),
                input_schema: json!({"type": "object", "properties": {}, "required": []}),
            }])
            .with_tool_choice(ToolChoice::tool("identify_target"));

        let body = serde_json::to_value(ApiRequest::from_request(&request, "m")).unwrap();
        assert_eq!(body["model"], "m");
        assert_eq!(body["tool_choice"]["type"], "tool");
        assert_eq!(body["tool_choice"]["name"], "identify_target");
        assert_eq!(body["tools"][0]["name"], "identify_target");
        assert_eq!(body["messages"][0]["content"][0]["type"], "text");
        assert!(body.get("system").is_none());
    }

    #[test]
    fn test_response_deserializes_tool_use() {
        let raw = json!({
            "id": "msg_01",
            "model": "claude-sonnet-4-20250514",
            "content": [
                {"type": "thinking", "thinking": "sling it", "signature": "sig"},
                {"type": "tool_use", "id": "tu_01", "name": "use_simple_sling", "input": {}}
            ],
            "stop_reason": "tool_use",
            "usage": {"input_tokens": 12, "output_tokens": 3}
        });
        let parsed: ApiResponse = serde_json::from_value(raw).unwrap();
        let response: crate::Response = parsed.into();
        assert_eq!(response.stop_reason, crate::StopReason::ToolUse);
        assert_eq!(response.content.len(), 1);
        assert_eq!(response.id, "msg_01");
        assert_eq!(
            response.usage,
            crate::Usage {
                input_tokens: 12,
                output_tokens: 3
            }
        );
        assert_eq!(response.tool_uses()[0].name, "use_simple_sling");
    }
}
