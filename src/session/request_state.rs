//! 请求状态

use serde::Serialize;

/// 文档生成请求状态
///
/// 由请求控制器独占修改，展示层只读。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RequestState {
    /// 尚未发起请求
    #[default]
    Idle,
    /// 请求进行中
    InFlight,
    /// 生成成功，文本原样保存
    Succeeded { documentation: String },
    /// 生成失败
    Failed { error: String },
}

impl RequestState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, RequestState::InFlight)
    }

    /// 是否处于某次请求的终态
    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestState::Succeeded { .. } | RequestState::Failed { .. })
    }

    pub fn documentation(&self) -> Option<&str> {
        match self {
            RequestState::Succeeded { documentation } => Some(documentation),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RequestState::Failed { error } => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let ok = RequestState::Succeeded {
            documentation: "X".to_string(),
        };
        assert_eq!(ok.documentation(), Some("X"));
        assert_eq!(ok.error(), None);
        assert!(ok.is_terminal());

        let failed = RequestState::Failed {
            error: "boom".to_string(),
        };
        assert_eq!(failed.error(), Some("boom"));
        assert!(!failed.is_in_flight());

        assert!(RequestState::InFlight.is_in_flight());
        assert!(!RequestState::Idle.is_terminal());
    }

    #[test]
    fn test_serialize_tagged() {
        let json = serde_json::to_value(RequestState::Failed {
            error: "e".to_string(),
        })
        .unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["error"], "e");
    }
}
