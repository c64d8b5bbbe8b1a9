//! 客户端会话
//!
//! 一个 `Session` 持有一份配置存储和一个请求控制器，由展示层显式持有，
//! 多个会话之间互不影响。

mod config_store;
mod controller;
mod error;
mod options;
mod request_state;

pub use config_store::{ConfigStore, Configuration};
pub use controller::{GenerateOutcome, ReentryPolicy, RequestController, CANCELLED_MESSAGE};
pub use error::{SessionError, SessionResult};
pub use options::{DocType, SourceLanguage};
pub use request_state::RequestState;

use std::sync::Arc;

use crate::client::{DocService, HttpDocService, ServiceError};

/// 客户端会话
#[derive(Debug)]
pub struct Session {
    config: ConfigStore,
    controller: RequestController,
}

impl Session {
    pub fn new(service: Arc<dyn DocService>) -> Self {
        Self::with_policy(service, ReentryPolicy::default())
    }

    pub fn with_policy(service: Arc<dyn DocService>, policy: ReentryPolicy) -> Self {
        Self {
            config: ConfigStore::new(),
            controller: RequestController::with_policy(service, policy),
        }
    }

    /// 连接到指定地址的 HTTP 文档服务
    pub fn connect(service_url: &str) -> Result<Self, ServiceError> {
        let service = HttpDocService::new(service_url)?;
        Ok(Self::new(Arc::new(service)))
    }

    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    pub fn controller(&self) -> &RequestController {
        &self.controller
    }

    pub fn state(&self) -> RequestState {
        self.controller.state()
    }

    /// 生成按钮是否可用
    pub fn can_trigger(&self) -> bool {
        self.controller.can_trigger(&self.config.snapshot())
    }

    /// 读取当前配置快照并发起生成
    pub async fn generate(&self) -> SessionResult<GenerateOutcome> {
        let snapshot = self.config.snapshot();
        self.controller.generate(&snapshot).await
    }
}
