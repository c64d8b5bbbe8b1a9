//! Anthropic Messages API 实现

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::client::read_json;
use super::format::build_anthropic_endpoint;
use super::types::{ChatMessage, ChatOptions, Completion, LlmError};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 2000;

/// Anthropic 请求载荷
#[derive(Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    messages: Vec<&'a ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
}

#[derive(Deserialize, Debug)]
struct AnthropicResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    stop_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

/// 调用 Anthropic API
///
/// system 消息被合并到顶层 `system` 字段，结果为所有 text 块的拼接。
pub async fn complete_anthropic(
    client: &Client,
    api_key: &str,
    base_url: &str,
    messages: &[ChatMessage],
    model: &str,
    options: &ChatOptions,
) -> Result<Completion, LlmError> {
    let endpoint = build_anthropic_endpoint(base_url);

    let system_parts: Vec<&str> = messages
        .iter()
        .filter(|m| m.role == "system")
        .map(|m| m.content.as_str())
        .collect();
    let system = (!system_parts.is_empty()).then(|| system_parts.join("\n\n"));

    let payload = AnthropicRequest {
        model,
        messages: messages.iter().filter(|m| m.role != "system").collect(),
        system,
        max_tokens: options.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        temperature: options.temperature,
    };

    debug!("Anthropic API request: endpoint={}, model={}", endpoint, model);

    let response = client
        .post(&endpoint)
        .header("x-api-key", api_key)
        .header("Authorization", format!("Bearer {}", api_key))
        .header("anthropic-version", ANTHROPIC_VERSION)
        .json(&payload)
        .send()
        .await?;

    let parsed: AnthropicResponse = read_json(response, "Anthropic").await?;

    let content = parsed
        .content
        .into_iter()
        .filter(|block| block.block_type == "text")
        .filter_map(|block| block.text)
        .collect::<String>();

    Ok(Completion {
        content,
        finish_reason: parsed.stop_reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::spawn_server;
    use axum::{http::HeaderMap, http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_request_shape_and_text_blocks() {
        let router = Router::new().route(
            "/v1/messages",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                assert_eq!(headers["x-api-key"], "sk-test");
                assert_eq!(headers["anthropic-version"], ANTHROPIC_VERSION);
                assert_eq!(body["model"], "claude-sonnet-4-20250514");
                assert_eq!(body["max_tokens"], 2000);
                assert_eq!(body["system"], "be brief");
                assert_eq!(body["messages"].as_array().unwrap().len(), 1);
                assert_eq!(body["messages"][0]["role"], "user");
                Json(json!({
                    "content": [
                        { "type": "text", "text": "# Title\n" },
                        { "type": "tool_use", "id": "x" },
                        { "type": "text", "text": "body" }
                    ],
                    "stop_reason": "end_turn"
                }))
            }),
        );
        let url = spawn_server(router).await;

        let messages = vec![ChatMessage::system("be brief"), ChatMessage::user("doc this")];
        let completion = complete_anthropic(
            &Client::new(),
            "sk-test",
            &url,
            &messages,
            "claude-sonnet-4-20250514",
            &ChatOptions::default(),
        )
        .await
        .unwrap();

        assert_eq!(completion.content, "# Title\nbody");
        assert_eq!(completion.finish_reason.as_deref(), Some("end_turn"));
    }

    #[tokio::test]
    async fn test_error_status_is_api_error() {
        let router = Router::new().route(
            "/v1/messages",
            post(|| async { (StatusCode::TOO_MANY_REQUESTS, "rate limited") }),
        );
        let url = spawn_server(router).await;

        let err = complete_anthropic(
            &Client::new(),
            "sk-test",
            &url,
            &[ChatMessage::user("hi")],
            "claude-sonnet-4-20250514",
            &ChatOptions::default(),
        )
        .await
        .unwrap_err();

        match err {
            LlmError::ApiError { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "rate limited");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
