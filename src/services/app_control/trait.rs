use crate::config::Config;
use crate::error::Result;
use std::sync::Arc;

use super::dry_run::RecordingAppController;
use super::macos::MacAppController;

/// Управление процессом superwhisper
#[async_trait::async_trait]
pub trait AppController: Send + Sync {
    /// Установлен ли хотя бы один из вариантов приложения
    fn is_installed(&self) -> bool;

    /// Попросить приложение завершиться, если оно запущено
    async fn quit(&self) -> Result<()>;

    /// Открыть URL в приложении с указанным bundle id
    async fn open_url(&self, bundle_id: &str, url: &str) -> Result<()>;

    /// Запустить приложение по имени
    async fn launch_by_name(&self) -> Result<()>;
}

/// Factory function to create an app controller based on the dry_run flag
pub fn create_app_controller(config: &Config, dry_run: bool) -> Arc<dyn AppController> {
    if dry_run {
        Arc::new(RecordingAppController::new())
    } else {
        Arc::new(MacAppController::new(config.app.clone()))
    }
}
