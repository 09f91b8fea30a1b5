use crate::app_error;
use crate::error::Result;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

use super::r#trait::AppController;

/// Вызов, зафиксированный `RecordingAppController`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCall {
    Quit { was_running: bool },
    OpenUrl { bundle_id: String, url: String },
    LaunchByName,
}

/// Контроллер без побочных эффектов: пишет вызовы в журнал.
///
/// Используется в dry-run режиме; отказы конкретных bundle id и запуска по имени
/// настраиваются для проверки цепочки перезапуска.
pub struct RecordingAppController {
    installed: bool,
    running: AtomicBool,
    failing_bundle_ids: HashSet<String>,
    fail_launch_by_name: bool,
    calls: Mutex<Vec<AppCall>>,
}

impl RecordingAppController {
    pub fn new() -> Self {
        Self {
            installed: true,
            running: AtomicBool::new(true),
            failing_bundle_ids: HashSet::new(),
            fail_launch_by_name: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    #[cfg(test)]
    pub fn not_installed(mut self) -> Self {
        self.installed = false;
        self
    }

    #[cfg(test)]
    pub fn not_running(self) -> Self {
        self.running.store(false, Ordering::SeqCst);
        self
    }

    #[cfg(test)]
    pub fn failing_bundle(mut self, bundle_id: &str) -> Self {
        self.failing_bundle_ids.insert(bundle_id.to_string());
        self
    }

    #[cfg(test)]
    pub fn failing_launch_by_name(mut self) -> Self {
        self.fail_launch_by_name = true;
        self
    }

    #[cfg(test)]
    pub fn calls(&self) -> Vec<AppCall> {
        self.calls.lock().clone()
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    fn record(&self, call: AppCall) {
        info!("[DRY RUN] {:?}", call);
        self.calls.lock().push(call);
    }
}

impl Default for RecordingAppController {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl AppController for RecordingAppController {
    fn is_installed(&self) -> bool {
        self.installed
    }

    async fn quit(&self) -> Result<()> {
        let was_running = self.running.swap(false, Ordering::SeqCst);
        self.record(AppCall::Quit { was_running });

        if was_running {
            Ok(())
        } else {
            Err(app_error!(internal, "superwhisper не запущен"))
        }
    }

    async fn open_url(&self, bundle_id: &str, url: &str) -> Result<()> {
        self.record(AppCall::OpenUrl {
            bundle_id: bundle_id.to_string(),
            url: url.to_string(),
        });

        if self.failing_bundle_ids.contains(bundle_id) {
            return Err(app_error!(internal, "приложение {} не найдено", bundle_id));
        }

        self.running.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn launch_by_name(&self) -> Result<()> {
        self.record(AppCall::LaunchByName);

        if self.fail_launch_by_name {
            return Err(app_error!(internal, "запуск по имени не удался"));
        }

        self.running.store(true, Ordering::SeqCst);
        Ok(())
    }
}
