//! API 格式检测和 URL 构建工具

use serde::{Deserialize, Serialize};

/// API 格式枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiFormat {
    /// OpenAI Chat Completions API
    OpenAi,
    /// Anthropic Messages API
    Anthropic,
}

/// 根据模型名称检测 API 格式
///
/// 模型名包含 "claude" 则使用 Anthropic 格式，否则使用 OpenAI 格式
pub fn detect_api_format(model: &str) -> ApiFormat {
    if model.to_lowercase().contains("claude") {
        ApiFormat::Anthropic
    } else {
        ApiFormat::OpenAi
    }
}

/// 规范化 base_url：去掉末尾斜杠，合并协议之后的重复斜杠
pub fn fix_base_url(base_url: &str) -> String {
    let url = base_url.trim().trim_end_matches('/');
    match url.split_once("://") {
        Some((scheme, rest)) => {
            let mut path = rest.to_string();
            while path.contains("//") {
                path = path.replace("//", "/");
            }
            format!("{}://{}", scheme, path)
        }
        None => url.to_string(),
    }
}

/// 在 base_url 后拼接 `/v1/...` 路径，已带有 `/v1` 或完整路径时不重复拼接
fn build_versioned_endpoint(base_url: &str, path: &str) -> String {
    let url = fix_base_url(base_url);
    if url.ends_with(path) {
        url
    } else if url.ends_with("/v1") {
        format!("{}{}", url, path)
    } else {
        format!("{}/v1{}", url, path)
    }
}

/// 构建 OpenAI Chat Completions 端点
pub fn build_openai_endpoint(base_url: &str) -> String {
    build_versioned_endpoint(base_url, "/chat/completions")
}

/// 构建 Anthropic Messages 端点
pub fn build_anthropic_endpoint(base_url: &str) -> String {
    build_versioned_endpoint(base_url, "/messages")
}
