//! 服务层模块

mod llm_service;
mod prompt_service;

pub use llm_service::LlmService;
pub use prompt_service::PromptService;
