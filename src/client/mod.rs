//! 文档服务客户端
//!
//! `DocService` 是请求控制器与远端文档服务之间的唯一接缝，
//! `HttpDocService` 是基于 reqwest 的实现。

mod http;

pub use http::{HttpDocService, DEFAULT_SERVICE_URL};

use async_trait::async_trait;
use thiserror::Error;

use crate::models::GenerateDocsRequest;

/// 文档服务错误
///
/// 两类错误最终都表现为 `RequestState::Failed`，仅消息文本不同。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// 网络请求本身未能完成（连接失败、超时等）
    #[error("Could not reach documentation service: {0}")]
    TransportFailure(String),

    /// 服务返回了失败状态，或响应体无法解析
    #[error("Failed to generate documentation: {0}")]
    ServiceFailure(String),
}

/// 文档生成服务
#[async_trait]
pub trait DocService: Send + Sync {
    /// 发送一次文档生成请求，返回服务给出的文档文本
    async fn generate_docs(&self, request: &GenerateDocsRequest) -> Result<String, ServiceError>;
}

