use crate::error::Result;
use dashmap::DashMap;
use std::collections::HashMap;
use tracing::info;

use super::r#trait::{PrefValue, PreferenceStore};

/// Хранилище настроек в памяти: dry-run режим и тесты
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    domains: DashMap<String, HashMap<String, PrefValue>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Создать пустой, но читаемый домен
    pub fn with_domain(self, domain: &str) -> Self {
        self.domains.entry(domain.to_string()).or_default();
        self
    }

    #[cfg(test)]
    pub fn with_value(self, domain: &str, key: &str, value: PrefValue) -> Self {
        self.domains
            .entry(domain.to_string())
            .or_default()
            .insert(key.to_string(), value);
        self
    }

    pub fn value(&self, domain: &str, key: &str) -> Option<PrefValue> {
        self.domains
            .get(domain)
            .and_then(|keys| keys.get(key).cloned())
    }
}

#[async_trait::async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn domain_exists(&self, domain: &str) -> bool {
        self.domains.contains_key(domain)
    }

    async fn get(&self, domain: &str, key: &str) -> Result<Option<String>> {
        Ok(self.value(domain, key).map(|v| v.as_defaults_text()))
    }

    async fn set(&self, domain: &str, key: &str, value: PrefValue) -> Result<()> {
        info!("[DRY RUN] {}:{} = {}", domain, key, value);
        // Как и `defaults write`, запись создаёт домен при необходимости
        self.domains
            .entry(domain.to_string())
            .or_default()
            .insert(key.to_string(), value);
        Ok(())
    }
}
