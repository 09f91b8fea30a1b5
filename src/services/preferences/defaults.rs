use crate::error::{AppError, Result};
use crate::utils::process::{self, stderr_text, stdout_text, tool_name};
use std::path::PathBuf;
use tracing::{debug, warn};

use super::r#trait::{PrefValue, PreferenceStore};

const DEFAULTS: &str = "defaults";

/// Хранилище настроек через утилиту `defaults`
pub struct DefaultsStore {
    program: PathBuf,
}

impl DefaultsStore {
    pub fn new() -> Self {
        Self::with_program(DEFAULTS)
    }

    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn write_args<'a>(domain: &'a str, key: &'a str, value: &'a PrefValue) -> [&'a str; 5] {
        match value {
            PrefValue::Bool(true) => ["write", domain, key, "-bool", "true"],
            PrefValue::Bool(false) => ["write", domain, key, "-bool", "false"],
            PrefValue::String(s) => ["write", domain, key, "-string", s.as_str()],
        }
    }
}

impl Default for DefaultsStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl PreferenceStore for DefaultsStore {
    async fn domain_exists(&self, domain: &str) -> bool {
        match process::run(&self.program, &["read", domain]) {
            Ok(output) if output.status.success() => true,
            Ok(output) => {
                debug!("Домен {} не читается: {}", domain, stderr_text(&output).trim());
                false
            }
            Err(e) => {
                warn!("Не удалось проверить домен {}: {}", domain, e);
                false
            }
        }
    }

    async fn get(&self, domain: &str, key: &str) -> Result<Option<String>> {
        let output = process::run(&self.program, &["read", domain, key])?;

        if !output.status.success() {
            // "The domain/default pair of (...) does not exist"
            debug!("Ключ {}:{} отсутствует: {}", domain, key, stderr_text(&output).trim());
            return Ok(None);
        }

        let value = stdout_text(&output);
        Ok(Some(value.trim_end_matches('\n').to_string()))
    }

    async fn set(&self, domain: &str, key: &str, value: PrefValue) -> Result<()> {
        let output = process::run(&self.program, &Self::write_args(domain, key, &value))?;

        if !output.status.success() {
            return Err(AppError::external_tool(
                tool_name(self.program.as_os_str()),
                stderr_text(&output),
            ));
        }

        debug!("Записано {}:{} = {}", domain, key, value);
        Ok(())
    }
}
