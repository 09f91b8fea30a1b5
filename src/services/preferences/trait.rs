use crate::config::Config;
use crate::error::Result;
use std::fmt;
use std::sync::Arc;

use super::defaults::DefaultsStore;
use super::memory::MemoryPreferenceStore;

/// Значение для записи в хранилище настроек
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefValue {
    Bool(bool),
    String(String),
}

impl PrefValue {
    /// Текст в том виде, в каком его печатает `defaults read`
    pub fn as_defaults_text(&self) -> String {
        match self {
            PrefValue::Bool(true) => "1".to_string(),
            PrefValue::Bool(false) => "0".to_string(),
            PrefValue::String(s) => s.clone(),
        }
    }
}

impl fmt::Display for PrefValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefValue::Bool(b) => write!(f, "{}", b),
            PrefValue::String(s) => write!(f, "\"{}\"", s),
        }
    }
}

/// Key-value хранилище настроек, разбитое на домены
#[async_trait::async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Читается ли корень домена. Ошибки запуска утилиты трактуются как `false`.
    async fn domain_exists(&self, domain: &str) -> bool;

    /// Прочитать ключ; `Ok(None)` если ключа нет
    async fn get(&self, domain: &str, key: &str) -> Result<Option<String>>;

    async fn set(&self, domain: &str, key: &str, value: PrefValue) -> Result<()>;
}

/// Factory function to create a preference store based on the dry_run flag
pub fn create_preference_store(config: &Config, dry_run: bool) -> Arc<dyn PreferenceStore> {
    if dry_run {
        Arc::new(MemoryPreferenceStore::new().with_domain(&config.app.standard.domain))
    } else {
        Arc::new(DefaultsStore::new())
    }
}
