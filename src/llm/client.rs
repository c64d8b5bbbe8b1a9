//! 统一 LLM 客户端

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{error, info};

use super::anthropic::complete_anthropic;
use super::format::{detect_api_format, ApiFormat};
use super::openai::complete_openai;
use super::types::{ChatMessage, ChatOptions, Completion, LlmError};

/// 统一 LLM 客户端
///
/// 支持 OpenAI 和 Anthropic API 格式，根据模型名称自动选择
#[derive(Debug, Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl LlmClient {
    /// 创建新的 LLM 客户端
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(LlmError::ConfigError("API Key is required".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .connect_timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(5)
            .build()?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.into(),
        })
    }

    /// 发送一次完整请求并等待结果（自动检测 API 格式）
    pub async fn complete(
        &self,
        messages: &[ChatMessage],
        model: &str,
        options: &ChatOptions,
    ) -> Result<Completion, LlmError> {
        let api_format = detect_api_format(model);
        info!("LLM request: model={}, api_format={:?}", model, api_format);

        let completion = match api_format {
            ApiFormat::Anthropic => {
                complete_anthropic(&self.client, &self.api_key, &self.base_url, messages, model, options)
                    .await?
            }
            ApiFormat::OpenAi => {
                complete_openai(&self.client, &self.api_key, &self.base_url, messages, model, options)
                    .await?
            }
        };

        if completion.content.is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok(completion)
    }
}

/// 检查状态码并解析 JSON 响应体
pub(super) async fn read_json<T: DeserializeOwned>(
    response: Response,
    provider: &str,
) -> Result<T, LlmError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let preview: String = body.chars().take(500).collect();
        error!("{} API error: status={}, body={}", provider, status.as_u16(), preview);
        return Err(LlmError::ApiError {
            status: status.as_u16(),
            message: body,
        });
    }

    Ok(serde_json::from_str(&body)?)
}
