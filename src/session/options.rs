//! 可选项枚举：源码语言与文档类型
//!
//! 线上格式为小写字符串（`python`、`readme` 等），与文档服务的请求体保持一致。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::SessionError;

/// 源码语言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceLanguage {
    #[default]
    Python,
    Javascript,
    Java,
    Cpp,
}

impl SourceLanguage {
    /// 全部可选语言（按界面展示顺序）
    pub const ALL: [SourceLanguage; 4] = [
        SourceLanguage::Python,
        SourceLanguage::Javascript,
        SourceLanguage::Java,
        SourceLanguage::Cpp,
    ];

    /// 线上标识
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceLanguage::Python => "python",
            SourceLanguage::Javascript => "javascript",
            SourceLanguage::Java => "java",
            SourceLanguage::Cpp => "cpp",
        }
    }

    /// 展示名称
    pub fn label(&self) -> &'static str {
        match self {
            SourceLanguage::Python => "Python",
            SourceLanguage::Javascript => "JavaScript",
            SourceLanguage::Java => "Java",
            SourceLanguage::Cpp => "C++",
        }
    }
}

impl fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceLanguage {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.as_str() == s)
            .ok_or_else(|| SessionError::InvalidOption {
                field: "source_language",
                value: s.to_string(),
            })
    }
}

/// 文档类型
///
/// 每种类型对应服务端的一种 prompt 风格。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocType {
    /// 结构化函数文档
    #[default]
    Function,
    /// 基于角色的 README
    Readme,
    /// 逐步讲解
    Explanation,
    /// 少样本架构文档
    Architecture,
}

impl DocType {
    pub const ALL: [DocType; 4] = [
        DocType::Function,
        DocType::Readme,
        DocType::Explanation,
        DocType::Architecture,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocType::Function => "function",
            DocType::Readme => "readme",
            DocType::Explanation => "explanation",
            DocType::Architecture => "architecture",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DocType::Function => "Function Docs (Structured)",
            DocType::Readme => "README (Role-Based)",
            DocType::Explanation => "Explanation (Chain-of-Thought)",
            DocType::Architecture => "Architecture (Few-Shot)",
        }
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocType {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|doc_type| doc_type.as_str() == s)
            .ok_or_else(|| SessionError::InvalidOption {
                field: "doc_type",
                value: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(SourceLanguage::default(), SourceLanguage::Python);
        assert_eq!(DocType::default(), DocType::Function);
    }

    #[test]
    fn test_parse_known_values() {
        for lang in SourceLanguage::ALL {
            assert_eq!(lang.as_str().parse::<SourceLanguage>(), Ok(lang));
        }
        for doc_type in DocType::ALL {
            assert_eq!(doc_type.as_str().parse::<DocType>(), Ok(doc_type));
        }
    }

    #[test]
    fn test_parse_rejects_unknown_values() {
        assert_eq!(
            "rust".parse::<SourceLanguage>(),
            Err(SessionError::InvalidOption {
                field: "source_language",
                value: "rust".to_string(),
            })
        );
        // 大小写敏感，与线上标识严格一致
        assert!("Python".parse::<SourceLanguage>().is_err());
        assert!("tutorial".parse::<DocType>().is_err());
        assert!("".parse::<DocType>().is_err());
    }

    #[test]
    fn test_serde_uses_wire_names() {
        assert_eq!(serde_json::to_string(&SourceLanguage::Cpp).unwrap(), "\"cpp\"");
        assert_eq!(
            serde_json::from_str::<DocType>("\"architecture\"").unwrap(),
            DocType::Architecture
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(SourceLanguage::Cpp.label(), "C++");
        assert_eq!(DocType::Readme.label(), "README (Role-Based)");
    }
}
