//! 配置存储
//!
//! 保存用户当前选择的源码、语言与文档类型。变更通过 watch 通道广播，
//! 展示层只是订阅者之一。

use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tracing::debug;

use super::error::SessionResult;
use super::options::{DocType, SourceLanguage};

/// 当前配置
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Configuration {
    /// 源码文本，可以为空
    pub source_code: String,
    /// 源码语言
    pub source_language: SourceLanguage,
    /// 文档类型
    pub doc_type: DocType,
}

impl Configuration {
    /// 源码去除空白后是否非空
    pub fn has_source_code(&self) -> bool {
        !self.source_code.trim().is_empty()
    }
}

/// 配置存储
///
/// 值相同的写入不会通知订阅者。
#[derive(Debug)]
pub struct ConfigStore {
    tx: watch::Sender<Configuration>,
}

impl ConfigStore {
    /// 以默认值创建
    pub fn new() -> Self {
        Self::with_config(Configuration::default())
    }

    pub fn with_config(config: Configuration) -> Self {
        let (tx, _rx) = watch::channel(config);
        Self { tx }
    }

    /// 获取当前配置的快照
    pub fn snapshot(&self) -> Configuration {
        self.tx.borrow().clone()
    }

    /// 替换源码（不做任何校验）
    pub fn set_source_code(&self, text: impl Into<String>) {
        let text = text.into();
        self.tx.send_if_modified(|config| {
            if config.source_code == text {
                return false;
            }
            config.source_code = text;
            true
        });
    }

    /// 按线上标识设置语言，未知值返回 `InvalidOption` 且不修改当前值
    pub fn set_source_language(&self, value: &str) -> SessionResult<()> {
        let language = value.parse::<SourceLanguage>()?;
        self.select_source_language(language);
        Ok(())
    }

    /// 按枚举设置语言
    pub fn select_source_language(&self, language: SourceLanguage) {
        let changed = self.tx.send_if_modified(|config| {
            if config.source_language == language {
                return false;
            }
            config.source_language = language;
            true
        });
        if changed {
            debug!("Source language changed: {}", language);
        }
    }

    /// 按线上标识设置文档类型
    pub fn set_doc_type(&self, value: &str) -> SessionResult<()> {
        let doc_type = value.parse::<DocType>()?;
        self.select_doc_type(doc_type);
        Ok(())
    }

    pub fn select_doc_type(&self, doc_type: DocType) {
        let changed = self.tx.send_if_modified(|config| {
            if config.doc_type == doc_type {
                return false;
            }
            config.doc_type = doc_type;
            true
        });
        if changed {
            debug!("Doc type changed: {}", doc_type);
        }
    }

    /// 订阅配置变更
    pub fn subscribe(&self) -> watch::Receiver<Configuration> {
        self.tx.subscribe()
    }

    /// 配置快照流（首项为当前值）
    pub fn changes(&self) -> WatchStream<Configuration> {
        WatchStream::new(self.subscribe())
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionError;
    use futures::StreamExt;

    #[test]
    fn test_defaults() {
        let store = ConfigStore::new();
        let config = store.snapshot();
        assert_eq!(config.source_code, "");
        assert_eq!(config.source_language, SourceLanguage::Python);
        assert_eq!(config.doc_type, DocType::Function);
    }

    #[test]
    fn test_every_option_pair_reads_back() {
        let store = ConfigStore::new();
        for lang in SourceLanguage::ALL {
            for doc_type in DocType::ALL {
                store.set_source_language(lang.as_str()).unwrap();
                store.set_doc_type(doc_type.as_str()).unwrap();

                let config = store.snapshot();
                assert_eq!(config.source_language, lang);
                assert_eq!(config.doc_type, doc_type);
            }
        }
    }

    #[test]
    fn test_invalid_option_keeps_previous_value() {
        let store = ConfigStore::new();
        store.set_source_language("java").unwrap();

        let err = store.set_source_language("cobol").unwrap_err();
        assert!(matches!(err, SessionError::InvalidOption { field: "source_language", .. }));
        assert_eq!(store.snapshot().source_language, SourceLanguage::Java);

        let err = store.set_doc_type("poem").unwrap_err();
        assert!(matches!(err, SessionError::InvalidOption { field: "doc_type", .. }));
        assert_eq!(store.snapshot().doc_type, DocType::Function);
    }

    #[test]
    fn test_source_code_accepts_anything() {
        let store = ConfigStore::new();
        store.set_source_code("   ");
        assert_eq!(store.snapshot().source_code, "   ");
        assert!(!store.snapshot().has_source_code());

        let big = "x = 1\n".repeat(100_000);
        store.set_source_code(big.clone());
        assert_eq!(store.snapshot().source_code, big);
        assert!(store.snapshot().has_source_code());
    }

    #[test]
    fn test_repeated_set_notifies_once() {
        let store = ConfigStore::new();
        let mut rx = store.subscribe();

        store.set_source_language("cpp").unwrap();
        assert!(rx.has_changed().unwrap());
        let after_once = rx.borrow_and_update().clone();

        store.set_source_language("cpp").unwrap();
        assert!(!rx.has_changed().unwrap());
        assert_eq!(store.snapshot(), after_once);
    }

    #[tokio::test]
    async fn test_changes_stream_yields_snapshots() {
        let store = ConfigStore::new();
        let mut changes = store.changes();

        let first = changes.next().await.unwrap();
        assert_eq!(first, Configuration::default());

        store.set_source_code("fn main() {}");
        let next = changes.next().await.unwrap();
        assert_eq!(next.source_code, "fn main() {}");
    }
}
