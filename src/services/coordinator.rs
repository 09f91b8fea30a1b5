use crate::config::AppConfig;
use crate::devices::{AudioDevice, DeviceConfig};
use crate::error::{AppError, Result};
use crate::services::app_control::AppController;
use crate::services::device_config_store::DeviceConfigStore;
use crate::services::enumerator::DeviceEnumerator;
use crate::services::identity::AppVariant;
use crate::services::restart::{build_restart_plan, execute_plan, RestartAction, StepRunner};
use crate::services::selection::{build_selection, SelectionEntry};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Снимок состояния для отображения
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSnapshot {
    pub devices: Vec<AudioDevice>,
    pub default_device: AudioDevice,
    pub config: DeviceConfig,
    pub variant: Option<AppVariant>,
}

impl DeviceSnapshot {
    pub fn entries(&self) -> Vec<SelectionEntry> {
        build_selection(&self.devices, Some(&self.default_device), &self.config)
    }
}

#[derive(Debug, Clone)]
pub enum LoadState {
    /// Приложение не найдено: вместо устройств показывается ссылка на установку
    NotInstalled { download_url: String },
    Ready(DeviceSnapshot),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LaunchMethod {
    Url(AppVariant),
    ByName,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelaunchStatus {
    Relaunched(LaunchMethod),
    /// Настройки записаны, но ни один способ запуска не сработал
    NotConfirmed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyOutcome {
    pub relaunch: RelaunchStatus,
}

impl ApplyOutcome {
    /// Предупреждение `RestartFailed`, если перезапуск не подтверждён
    pub fn warning(&self) -> Option<AppError> {
        match &self.relaunch {
            RelaunchStatus::Relaunched(_) => None,
            RelaunchStatus::NotConfirmed(reason) => Some(AppError::RestartFailed(reason.clone())),
        }
    }
}

/// Координатор выбора микрофона для superwhisper
pub struct DeviceSelector {
    enumerator: Box<dyn DeviceEnumerator>,
    config_store: DeviceConfigStore,
    app: Arc<dyn AppController>,
    app_config: AppConfig,
}

impl DeviceSelector {
    pub fn new(
        enumerator: Box<dyn DeviceEnumerator>,
        config_store: DeviceConfigStore,
        app: Arc<dyn AppController>,
        app_config: AppConfig,
    ) -> Self {
        Self {
            enumerator,
            config_store,
            app,
            app_config,
        }
    }

    pub fn is_installed(&self) -> bool {
        self.app.is_installed()
    }

    pub async fn load(&self) -> Result<LoadState> {
        if !self.is_installed() {
            info!("superwhisper не установлен");
            return Ok(LoadState::NotInstalled {
                download_url: self.app_config.download_url.clone(),
            });
        }

        let devices = self.enumerator.list_input_devices().await?;
        let default_device = self.enumerator.get_default_input_device().await?;
        let (variant, config) = self.config_store.read_current_device_config().await?;

        Ok(LoadState::Ready(DeviceSnapshot {
            devices,
            default_device,
            config,
            variant,
        }))
    }

    /// Найти устройство по UID в свежем списке
    pub async fn find_device(&self, uid: &str) -> Result<AudioDevice> {
        let devices = self.enumerator.list_input_devices().await?;
        match devices.into_iter().find(|d| d.uid == uid) {
            Some(device) => Ok(device),
            None => AppError::device_not_found(uid),
        }
    }

    pub async fn default_input_device(&self) -> Result<AudioDevice> {
        self.enumerator.get_default_input_device().await
    }

    pub async fn current_config(&self) -> Result<(Option<AppVariant>, DeviceConfig)> {
        self.config_store.read_current_device_config().await
    }

    /// Записать выбор и перезапустить superwhisper.
    ///
    /// Ошибка возвращается только если не удалась запись. После успешного
    /// вызова список устройств и настройки нужно перечитать.
    pub async fn apply_selection_and_restart(
        &self,
        device: Option<&AudioDevice>,
    ) -> Result<ApplyOutcome> {
        let plan = build_restart_plan(&self.app_config);
        let runner = SelectionSteps {
            config_store: &self.config_store,
            app: self.app.as_ref(),
            device,
        };

        let report = execute_plan(&plan, &runner).await?;

        let relaunch = match report.fallback_winner {
            Some(RestartAction::OpenUrl { variant, .. }) => {
                RelaunchStatus::Relaunched(LaunchMethod::Url(variant))
            }
            Some(_) => RelaunchStatus::Relaunched(LaunchMethod::ByName),
            None => {
                let reason = report.fallback_errors.join("; ");
                warn!(
                    "Настройки записаны, но superwhisper не перезапущен ({} цепочек исчерпано): {}",
                    report.exhausted_chains, reason
                );
                RelaunchStatus::NotConfirmed(reason)
            }
        };

        Ok(ApplyOutcome { relaunch })
    }
}

struct SelectionSteps<'a> {
    config_store: &'a DeviceConfigStore,
    app: &'a dyn AppController,
    device: Option<&'a AudioDevice>,
}

#[async_trait::async_trait]
impl<'a> StepRunner for SelectionSteps<'a> {
    async fn run(&self, action: &RestartAction) -> Result<()> {
        match action {
            RestartAction::WriteConfig => self.config_store.write_device_config(self.device).await,
            RestartAction::Quit => self.app.quit().await,
            RestartAction::Settle(delay) => {
                tokio::time::sleep(*delay).await;
                Ok(())
            }
            RestartAction::OpenUrl { bundle_id, url, .. } => self.app.open_url(bundle_id, url).await,
            RestartAction::LaunchByName => self.app.launch_by_name().await,
        }
    }
}
