//! 文档生成接口的请求/响应模型
//!
//! 客户端与服务端共用同一份定义。

use serde::{Deserialize, Serialize};

use crate::session::Configuration;

/// 文档生成请求
///
/// `language` 与 `doc_type` 在线上是普通字符串，服务端对未知文档类型回退到通用 prompt。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateDocsRequest {
    pub code: String,
    pub language: String,
    pub doc_type: String,
}

impl From<&Configuration> for GenerateDocsRequest {
    fn from(config: &Configuration) -> Self {
        Self {
            code: config.source_code.clone(),
            language: config.source_language.as_str().to_string(),
            doc_type: config.doc_type.as_str().to_string(),
        }
    }
}

/// 文档生成响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateDocsResponse {
    pub documentation: String,
}

/// 错误响应体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}
