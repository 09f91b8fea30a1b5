use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::services::identity::AppVariant;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub logging: LoggingConfig,
    pub helper: HelperConfig,
    pub app: AppConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// Настройки вспомогательной утилиты перечисления аудиоустройств
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HelperConfig {
    pub binary_name: String,
    /// Путь к поставляемому бинарнику; по умолчанию `assets/<binary_name>` рядом с исполняемым файлом
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_path: Option<PathBuf>,
    pub install_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub name: String,
    pub url_scheme: String,
    pub download_url: String,
    pub standard: VariantConfig,
    pub store_managed: VariantConfig,
}

/// Один из вариантов поставки приложения (обычный или через Setapp)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VariantConfig {
    pub domain: String,
    pub bundle_id: String,
    pub bundle_paths: Vec<PathBuf>,
}

impl HelperConfig {
    pub fn source_path(&self) -> PathBuf {
        if let Some(path) = &self.source_path {
            return path.clone();
        }

        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."));
        exe_dir.join("assets").join(&self.binary_name)
    }
}

impl AppConfig {
    pub fn variant(&self, variant: AppVariant) -> &VariantConfig {
        match variant {
            AppVariant::Standard => &self.standard,
            AppVariant::StoreManaged => &self.store_managed,
        }
    }

    /// URL активации приложения, например `superwhisper://`
    pub fn activation_url(&self) -> String {
        format!("{}://", self.url_scheme)
    }
}

fn default_install_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map(|d| d.data_dir().join("sw-mic").join("bin"))
        .unwrap_or_else(|| PathBuf::from(".sw-mic").join("bin"))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                level: "warn".to_string(),
            },
            helper: HelperConfig {
                binary_name: "audio-devices".to_string(),
                source_path: None,
                install_dir: default_install_dir(),
            },
            app: AppConfig {
                name: "superwhisper".to_string(),
                url_scheme: "superwhisper".to_string(),
                download_url: "https://superwhisper.com".to_string(),
                standard: VariantConfig {
                    domain: "com.superduper.superwhisper".to_string(),
                    bundle_id: "com.superduper.superwhisper".to_string(),
                    bundle_paths: vec![PathBuf::from("/Applications/superwhisper.app")],
                },
                store_managed: VariantConfig {
                    domain: "com.superduper.superwhisper-setapp".to_string(),
                    bundle_id: "com.superduper.superwhisper-setapp".to_string(),
                    bundle_paths: vec![PathBuf::from("/Applications/Setapp/superwhisper.app")],
                },
            },
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();

        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("SWMIC_").split("__"));

        let config: Config = figment
            .extract()
            .with_context(|| format!("Не удалось загрузить конфигурацию из {:?}", config_path))?;

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("Неверный уровень логирования: {}", self.logging.level),
        }

        if self.helper.binary_name.is_empty() {
            anyhow::bail!("helper.binary_name не может быть пустым");
        }

        if self.app.name.is_empty() {
            anyhow::bail!("app.name не может быть пустым");
        }

        if self.app.url_scheme.is_empty() || self.app.url_scheme.contains(':') {
            anyhow::bail!(
                "app.url_scheme должен быть именем схемы без ':' (получено '{}')",
                self.app.url_scheme
            );
        }

        for variant in AppVariant::ALL {
            let v = self.app.variant(variant);
            if v.domain.is_empty() || v.bundle_id.is_empty() {
                anyhow::bail!("Пустой домен или bundle id для варианта {}", variant);
            }
        }

        if self.app.standard.domain == self.app.store_managed.domain {
            anyhow::bail!(
                "Домены вариантов совпадают: {}",
                self.app.standard.domain
            );
        }

        Ok(())
    }
}
