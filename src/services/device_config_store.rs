//! Чтение и запись выбора микрофона в настройках superwhisper.
//!
//! На диске выбор хранится двумя независимыми ключами. Запись не атомарна:
//! если процесс прервётся между `useDefaultAudioDevice = false` и записью
//! `selectedDeviceID`, следующее чтение увидит `use_default = false` со
//! старым или отсутствующим UID. Такое состояние не исправляется, чтение
//! возвращает его как `device_id: None`.

use crate::config::AppConfig;
use crate::devices::{AudioDevice, DeviceConfig};
use crate::error::{AppError, Result};
use crate::services::identity::{resolve_identity, AppVariant};
use crate::services::preferences::{PrefValue, PreferenceStore};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const USE_DEFAULT_KEY: &str = "useDefaultAudioDevice";
pub const SELECTED_DEVICE_KEY: &str = "selectedDeviceID";

pub struct DeviceConfigStore {
    prefs: Arc<dyn PreferenceStore>,
    app: AppConfig,
}

impl DeviceConfigStore {
    pub fn new(prefs: Arc<dyn PreferenceStore>, app: AppConfig) -> Self {
        Self { prefs, app }
    }

    /// Определить активный вариант приложения по читаемости доменов настроек
    pub async fn resolve_variant(&self) -> Option<AppVariant> {
        let standard = self.prefs.domain_exists(&self.app.standard.domain).await;
        let store_managed = if standard {
            false
        } else {
            self.prefs.domain_exists(&self.app.store_managed.domain).await
        };

        resolve_identity(|| standard, || store_managed)
    }

    /// Прочитать выбор вместе с вариантом, чей домен был прочитан.
    ///
    /// `None` вместо варианта означает, что ни один домен не найден.
    pub async fn read_current_device_config(&self) -> Result<(Option<AppVariant>, DeviceConfig)> {
        let Some(variant) = self.resolve_variant().await else {
            // Приложение могло ещё ни разу не запускаться
            debug!("Домен настроек не найден, используем системное устройство");
            return Ok((None, DeviceConfig::system_default()));
        };

        let config = self.read_variant_config(variant).await?;
        Ok((Some(variant), config))
    }

    async fn read_variant_config(&self, variant: AppVariant) -> Result<DeviceConfig> {
        let domain = &self.app.variant(variant).domain;

        let use_default = match self.prefs.get(domain, USE_DEFAULT_KEY).await? {
            Some(raw) => parse_defaults_bool(&raw).unwrap_or_else(|| {
                warn!("Неожиданное значение {} = '{}', считаем true", USE_DEFAULT_KEY, raw);
                true
            }),
            None => true,
        };

        if use_default {
            return Ok(DeviceConfig::system_default());
        }

        let device_id = self
            .prefs
            .get(domain, SELECTED_DEVICE_KEY)
            .await?
            .filter(|uid| !uid.is_empty());

        let config = DeviceConfig {
            device_id,
            use_default: false,
        };

        if config.is_inconsistent() {
            warn!(
                "{} = false, но {} отсутствует в домене {}",
                USE_DEFAULT_KEY, SELECTED_DEVICE_KEY, domain
            );
        }

        Ok(config)
    }

    /// Записать выбор. `None` означает системное устройство по умолчанию;
    /// `selectedDeviceID` в этом случае не трогается.
    pub async fn write_device_config(&self, device: Option<&AudioDevice>) -> Result<()> {
        let variant = self.resolve_variant().await.ok_or_else(|| {
            AppError::PreferenceStoreNotFound(format!(
                "{}, {}",
                self.app.standard.domain, self.app.store_managed.domain
            ))
        })?;

        let domain = &self.app.variant(variant).domain;

        match device {
            None => {
                self.prefs
                    .set(domain, USE_DEFAULT_KEY, PrefValue::Bool(true))
                    .await?;
                info!("superwhisper ({}) переключён на системное устройство", variant);
            }
            Some(device) => {
                self.prefs
                    .set(domain, USE_DEFAULT_KEY, PrefValue::Bool(false))
                    .await?;
                self.prefs
                    .set(domain, SELECTED_DEVICE_KEY, PrefValue::String(device.uid.clone()))
                    .await?;
                info!("superwhisper ({}) переключён на {}", variant, device);
            }
        }

        Ok(())
    }
}

/// Разбор булева значения из вывода `defaults read`
fn parse_defaults_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}
