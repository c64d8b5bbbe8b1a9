//! 服务端配置管理
//!
//! 启动时从可执行文件同级目录的 `config.json` 加载，再用环境变量覆盖，
//! 之后以全局单例只读提供。

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::warn;

use crate::error::AppError;

/// 获取配置文件路径
fn get_config_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("config.json")
}

/// 服务端配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// LLM API 密钥
    #[serde(default)]
    pub api_key: String,

    /// LLM API 基础 URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// 模型名称
    #[serde(default = "default_model")]
    pub model: String,

    /// 温度参数，不设置则使用模型默认值
    #[serde(default)]
    pub temperature: Option<f64>,

    /// 最大 token 数
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 允许跨域访问的前端来源
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

fn default_base_url() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:5173".to_string()]
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            model: default_model(),
            temperature: None,
            max_tokens: default_max_tokens(),
            host: default_host(),
            port: default_port(),
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl AppConfig {
    /// 用环境变量覆盖配置项
    ///
    /// 支持 `ANTHROPIC_API_KEY`、`DOCGEN_BASE_URL`、`DOCGEN_MODEL`、`DOCGEN_PORT`。
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api_key) = lookup("ANTHROPIC_API_KEY").filter(|v| !v.is_empty()) {
            self.api_key = api_key;
        }
        if let Some(base_url) = lookup("DOCGEN_BASE_URL").filter(|v| !v.is_empty()) {
            self.base_url = base_url;
        }
        if let Some(model) = lookup("DOCGEN_MODEL").filter(|v| !v.is_empty()) {
            self.model = model;
        }
        if let Some(port) = lookup("DOCGEN_PORT") {
            match port.parse() {
                Ok(port) => self.port = port,
                Err(_) => warn!("Ignoring invalid DOCGEN_PORT: {}", port),
            }
        }
    }

    /// 监听地址
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("无效的监听地址 {}:{}: {}", self.host, self.port, e)))
    }
}

/// 全局配置单例
static CONFIG: Lazy<AppConfig> = Lazy::new(|| {
    let mut config = load_config_from_file().unwrap_or_default();
    config.apply_env_overrides(|key| std::env::var(key).ok());
    config
});

/// 从文件加载配置
fn load_config_from_file() -> Option<AppConfig> {
    let path = get_config_path();
    if !path.exists() {
        return None;
    }
    let content = fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!("Failed to parse {}: {}", path.display(), e);
            None
        }
    }
}

/// 获取当前配置（克隆）
pub fn get_config() -> AppConfig {
    CONFIG.clone()
}
