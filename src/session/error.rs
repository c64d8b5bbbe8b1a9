//! 会话层错误类型

use thiserror::Error;

/// 会话错误
///
/// 全部在本地处理，不会触发网络请求。消息直接展示给用户。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// 源码为空或仅含空白
    #[error("Please enter some code first!")]
    EmptyInput,

    /// 选项值不在枚举集合内
    #[error("Invalid {field}: {value:?}")]
    InvalidOption { field: &'static str, value: String },

    /// 已有请求在进行中（仅 `ReentryPolicy::Reject` 下出现）
    #[error("A documentation request is already in progress")]
    AlreadyInFlight,
}

/// 便捷类型别名
pub type SessionResult<T> = Result<T, SessionError>;
