//! 应用状态管理
//!
//! 定义在请求处理器之间共享的状态。

use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::{LlmService, PromptService};

/// 应用共享状态
#[derive(Debug)]
pub struct AppState {
    /// 启动时的配置快照
    pub config: AppConfig,
    /// LLM 服务
    pub llm: LlmService,
    /// Prompt 服务
    pub prompts: PromptService,
}

impl AppState {
    /// 根据配置创建应用状态
    pub fn new(config: AppConfig) -> Self {
        Self {
            llm: LlmService::new(&config),
            prompts: PromptService::new(),
            config,
        }
    }
}

/// 创建可共享的应用状态
pub fn create_shared_state(config: AppConfig) -> Arc<AppState> {
    Arc::new(AppState::new(config))
}
