//! LLM 服务封装
//!
//! 封装 LlmClient，与服务端配置集成

use tracing::warn;

use crate::config::AppConfig;
use crate::llm::{ChatMessage, ChatOptions, Completion, LlmClient, LlmError};

/// LLM 服务
///
/// 未配置 API Key 时仍可创建，调用时返回 `ConfigError`。
#[derive(Debug)]
pub struct LlmService {
    client: Option<LlmClient>,
    model: String,
    options: ChatOptions,
}

impl LlmService {
    pub fn new(config: &AppConfig) -> Self {
        let client = if config.api_key.is_empty() {
            None
        } else {
            match LlmClient::new(&config.api_key, &config.base_url) {
                Ok(client) => Some(client),
                Err(e) => {
                    warn!("Failed to create LLM client: {}", e);
                    None
                }
            }
        };

        Self {
            client,
            model: config.model.clone(),
            options: ChatOptions {
                temperature: config.temperature,
                max_tokens: Some(config.max_tokens),
            },
        }
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// 发送消息并返回完整结果
    pub async fn complete(&self, messages: &[ChatMessage]) -> Result<Completion, LlmError> {
        let client = self.client.as_ref().ok_or_else(|| {
            LlmError::ConfigError(
                "API Key not configured. Set ANTHROPIC_API_KEY or api_key in config.json.".to_string(),
            )
        })?;

        client.complete(messages, &self.model, &self.options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_service_reports_config_error() {
        let service = LlmService::new(&AppConfig::default());
        assert!(!service.is_configured());
        assert_eq!(service.model(), "claude-sonnet-4-20250514");

        let err = service.complete(&[ChatMessage::user("hi")]).await.unwrap_err();
        assert!(matches!(err, LlmError::ConfigError(_)));
    }
}
