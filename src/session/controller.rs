//! 请求控制器
//!
//! 管理单个文档生成请求的生命周期：
//!
//! ```text
//! Idle --generate()--> InFlight --ok--> Succeeded
//!                               --err--> Failed
//! Succeeded / Failed --generate()--> InFlight
//! ```
//!
//! 每次被接受的请求都会递增代数计数器；响应返回时若代数已变化，说明有更新的请求
//! 已经开始，该响应被丢弃。计数器递增与状态切换在同一把锁（watch 通道内部锁）中完成，
//! 因此无论两个响应以何种顺序返回，最终状态都只反映最新一次请求。

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, info, warn};

use super::config_store::Configuration;
use super::error::{SessionError, SessionResult};
use super::request_state::RequestState;
use crate::client::DocService;
use crate::models::GenerateDocsRequest;

/// 请求进行中再次调用 `generate` 时的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReentryPolicy {
    /// 接受新请求，旧请求的响应被丢弃
    #[default]
    Supersede,
    /// 拒绝新请求，返回 `AlreadyInFlight`
    Reject,
}

/// 一次 `generate` 调用的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// 结果已写入请求状态
    Applied(RequestState),
    /// 等待期间有更新的请求开始，本次结果被丢弃
    Superseded,
}

/// 请求控制器
pub struct RequestController {
    service: Arc<dyn DocService>,
    policy: ReentryPolicy,
    state: watch::Sender<RequestState>,
    generation: AtomicU64,
}

impl RequestController {
    pub fn new(service: Arc<dyn DocService>) -> Self {
        Self::with_policy(service, ReentryPolicy::default())
    }

    pub fn with_policy(service: Arc<dyn DocService>, policy: ReentryPolicy) -> Self {
        let (state, _rx) = watch::channel(RequestState::Idle);
        Self {
            service,
            policy,
            state,
            generation: AtomicU64::new(0),
        }
    }

    pub fn policy(&self) -> ReentryPolicy {
        self.policy
    }

    /// 当前请求状态（快照）
    pub fn state(&self) -> RequestState {
        self.state.borrow().clone()
    }

    /// 订阅状态变更
    pub fn subscribe(&self) -> watch::Receiver<RequestState> {
        self.state.subscribe()
    }

    pub fn changes(&self) -> WatchStream<RequestState> {
        WatchStream::new(self.subscribe())
    }

    /// 是否允许触发生成：没有进行中的请求，且源码非空
    pub fn can_trigger(&self, config: &Configuration) -> bool {
        !self.state.borrow().is_in_flight() && config.has_source_code()
    }

    /// 基于配置快照发起一次文档生成
    ///
    /// 源码为空时直接返回 `EmptyInput`，状态不变，也不会发出网络请求。
    /// 服务端或网络错误不会作为 `Err` 返回，而是写入 `RequestState::Failed`。
    pub async fn generate(&self, snapshot: &Configuration) -> SessionResult<GenerateOutcome> {
        if !snapshot.has_source_code() {
            debug!("Generate skipped: empty source code");
            return Err(SessionError::EmptyInput);
        }

        let attempt = self.begin_attempt()?;
        info!(
            "Generating documentation: attempt={}, language={}, doc_type={}",
            attempt, snapshot.source_language, snapshot.doc_type
        );

        let request = GenerateDocsRequest::from(snapshot);
        let guard = AttemptGuard {
            controller: self,
            attempt,
        };
        let result = self.service.generate_docs(&request).await;
        std::mem::forget(guard);

        let next = match result {
            Ok(documentation) => RequestState::Succeeded { documentation },
            Err(e) => {
                warn!("Documentation request failed: attempt={}, error={}", attempt, e);
                RequestState::Failed {
                    error: e.to_string(),
                }
            }
        };

        if self.finish_attempt(attempt, &next) {
            info!("Documentation request finished: attempt={}", attempt);
            Ok(GenerateOutcome::Applied(next))
        } else {
            debug!("Discarding stale response: attempt={}", attempt);
            Ok(GenerateOutcome::Superseded)
        }
    }

    /// 切换到 InFlight 并分配新的代数
    fn begin_attempt(&self) -> SessionResult<u64> {
        let mut attempt = None;
        self.state.send_if_modified(|state| {
            if self.policy == ReentryPolicy::Reject && state.is_in_flight() {
                return false;
            }
            attempt = Some(self.generation.fetch_add(1, Ordering::SeqCst) + 1);
            *state = RequestState::InFlight;
            true
        });
        attempt.ok_or(SessionError::AlreadyInFlight)
    }

    /// 仅当代数未变化时写入终态
    fn finish_attempt(&self, attempt: u64, next: &RequestState) -> bool {
        self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != attempt {
                return false;
            }
            *state = next.clone();
            true
        })
    }
}

/// 请求被取消时写入的错误信息
pub const CANCELLED_MESSAGE: &str = "Request cancelled";

/// `generate` 的 future 在等待服务响应期间被丢弃时，将本次请求标记为失败，
/// 避免状态停留在 InFlight
struct AttemptGuard<'a> {
    controller: &'a RequestController,
    attempt: u64,
}

impl Drop for AttemptGuard<'_> {
    fn drop(&mut self) {
        let attempt = self.attempt;
        let failed = RequestState::Failed {
            error: CANCELLED_MESSAGE.to_string(),
        };
        if self.controller.finish_attempt(attempt, &failed) {
            warn!("Documentation request cancelled: attempt={}", attempt);
        }
    }
}

impl std::fmt::Debug for RequestController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestController")
            .field("policy", &self.policy)
            .field("state", &*self.state.borrow())
            .field("generation", &self.generation.load(Ordering::SeqCst))
            .finish()
    }
}
