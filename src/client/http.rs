//! 基于 HTTP 的文档服务客户端

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use super::{DocService, ServiceError};
use crate::models::{ErrorResponse, GenerateDocsRequest, GenerateDocsResponse};

/// 默认服务地址
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8000";

const GENERATE_DOCS_PATH: &str = "/generate-docs";

/// 错误消息中保留的响应体最大字符数
const MAX_ERROR_BODY_CHARS: usize = 500;

/// HTTP 文档服务客户端
#[derive(Debug, Clone)]
pub struct HttpDocService {
    client: Client,
    endpoint: String,
}

impl HttpDocService {
    /// 使用默认超时创建客户端（总计 120 秒，连接 30 秒）
    pub fn new(service_url: &str) -> Result<Self, ServiceError> {
        Self::with_timeouts(service_url, Duration::from_secs(120), Duration::from_secs(30))
    }

    pub fn with_timeouts(
        service_url: &str,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| ServiceError::TransportFailure(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: build_generate_docs_endpoint(service_url),
        })
    }

    /// 实际请求的端点
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl DocService for HttpDocService {
    async fn generate_docs(&self, request: &GenerateDocsRequest) -> Result<String, ServiceError> {
        debug!(
            "Doc service request: endpoint={}, language={}, doc_type={}, code_len={}",
            self.endpoint,
            request.language,
            request.doc_type,
            request.code.len()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| ServiceError::TransportFailure(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ServiceError::TransportFailure(e.to_string()))?;

        if !status.is_success() {
            warn!("Doc service error: status={}", status.as_u16());
            let message = match error_detail(&body) {
                Some(detail) => format!("HTTP {}: {}", status.as_u16(), detail),
                None => format!("HTTP {}", status.as_u16()),
            };
            return Err(ServiceError::ServiceFailure(message));
        }

        let parsed: GenerateDocsResponse = serde_json::from_str(&body)
            .map_err(|e| ServiceError::ServiceFailure(format!("unexpected response body: {}", e)))?;

        Ok(parsed.documentation)
    }
}

/// 拼接 `/generate-docs` 端点，容忍末尾斜杠或已包含路径的地址
fn build_generate_docs_endpoint(service_url: &str) -> String {
    let url = service_url.trim().trim_end_matches('/');
    if url.ends_with(GENERATE_DOCS_PATH) {
        url.to_string()
    } else {
        format!("{}{}", url, GENERATE_DOCS_PATH)
    }
}

/// 从错误响应体中提取说明：优先 `detail` 字段，否则取截断后的原文
fn error_detail(body: &str) -> Option<String> {
    if let Ok(err) = serde_json::from_str::<ErrorResponse>(body) {
        return Some(err.detail);
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{spawn_server, unused_local_url};
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::json;

    fn sample_request() -> GenerateDocsRequest {
        GenerateDocsRequest {
            code: "print(1)".to_string(),
            language: "python".to_string(),
            doc_type: "function".to_string(),
        }
    }

    #[test]
    fn test_build_endpoint() {
        assert_eq!(
            build_generate_docs_endpoint("http://localhost:8000"),
            "http://localhost:8000/generate-docs"
        );
        assert_eq!(
            build_generate_docs_endpoint("http://localhost:8000/"),
            "http://localhost:8000/generate-docs"
        );
        assert_eq!(
            build_generate_docs_endpoint("http://host/generate-docs"),
            "http://host/generate-docs"
        );

        let service = HttpDocService::new(DEFAULT_SERVICE_URL).unwrap();
        assert_eq!(service.endpoint(), "http://localhost:8000/generate-docs");
    }

    #[test]
    fn test_error_detail() {
        assert_eq!(error_detail(r#"{"detail":"no key"}"#), Some("no key".to_string()));
        assert_eq!(error_detail("Bad Gateway"), Some("Bad Gateway".to_string()));
        assert_eq!(error_detail("  "), None);
    }

    #[tokio::test]
    async fn test_success_returns_documentation_verbatim() {
        let router = Router::new().route(
            "/generate-docs",
            post(|Json(req): Json<GenerateDocsRequest>| async move {
                assert_eq!(req, sample_request());
                Json(json!({ "documentation": "  # Docs\n\n" }))
            }),
        );
        let url = spawn_server(router).await;

        let service = HttpDocService::new(&url).unwrap();
        let docs = service.generate_docs(&sample_request()).await.unwrap();
        assert_eq!(docs, "  # Docs\n\n");
    }

    #[tokio::test]
    async fn test_non_success_status_is_service_failure() {
        let router = Router::new().route(
            "/generate-docs",
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": "model overloaded" })),
                )
            }),
        );
        let url = spawn_server(router).await;

        let err = HttpDocService::new(&url)
            .unwrap()
            .generate_docs(&sample_request())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ServiceError::ServiceFailure("HTTP 500: model overloaded".to_string())
        );
    }

    #[tokio::test]
    async fn test_missing_field_is_service_failure() {
        let router = Router::new().route(
            "/generate-docs",
            post(|| async { Json(json!({ "docs": "wrong field" })) }),
        );
        let url = spawn_server(router).await;

        let err = HttpDocService::new(&url)
            .unwrap()
            .generate_docs(&sample_request())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::ServiceFailure(_)));
        assert!(!err.to_string().is_empty());
    }

    #[tokio::test]
    async fn test_non_json_body_is_service_failure() {
        let router = Router::new().route("/generate-docs", post(|| async { "plain text" }));
        let url = spawn_server(router).await;

        let err = HttpDocService::new(&url)
            .unwrap()
            .generate_docs(&sample_request())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::ServiceFailure(_)));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_failure() {
        let url = unused_local_url().await;

        let err = HttpDocService::new(&url)
            .unwrap()
            .generate_docs(&sample_request())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::TransportFailure(_)));
    }
}
