use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::services::identity::AppVariant;
use crate::utils::process::{self, stderr_text, tool_name};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::r#trait::AppController;

/// Управление приложением через `osascript` и `open`
pub struct MacAppController {
    app: AppConfig,
    osascript: PathBuf,
    open: PathBuf,
}

impl MacAppController {
    pub fn new(app: AppConfig) -> Self {
        Self::with_tools(app, "osascript", "open")
    }

    pub fn with_tools(app: AppConfig, osascript: impl Into<PathBuf>, open: impl Into<PathBuf>) -> Self {
        Self {
            app,
            osascript: osascript.into(),
            open: open.into(),
        }
    }

    fn quit_script(&self) -> String {
        format!(
            "if application \"{name}\" is running then tell application \"{name}\" to quit",
            name = self.app.name
        )
    }

    fn run_checked(program: &Path, args: &[&str]) -> Result<()> {
        let output = process::run(program, args)?;
        if output.status.success() {
            Ok(())
        } else {
            Err(AppError::external_tool(
                tool_name(program.as_os_str()),
                stderr_text(&output),
            ))
        }
    }
}

#[async_trait::async_trait]
impl AppController for MacAppController {
    fn is_installed(&self) -> bool {
        AppVariant::ALL.iter().any(|&variant| {
            self.app
                .variant(variant)
                .bundle_paths
                .iter()
                .any(|path| {
                    let exists = path.exists();
                    debug!("Проверка {:?} ({}): {}", path, variant, exists);
                    exists
                })
        })
    }

    async fn quit(&self) -> Result<()> {
        Self::run_checked(&self.osascript, &["-e", &self.quit_script()])
    }

    async fn open_url(&self, bundle_id: &str, url: &str) -> Result<()> {
        Self::run_checked(&self.open, &["-b", bundle_id, url])
    }

    async fn launch_by_name(&self) -> Result<()> {
        Self::run_checked(&self.open, &["-a", &self.app.name])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_quit_script_only_targets_running_app() {
        let controller = MacAppController::new(Config::default().app);
        assert_eq!(
            controller.quit_script(),
            "if application \"superwhisper\" is running then tell application \"superwhisper\" to quit"
        );
    }

    #[test]
    fn test_is_installed_checks_both_variants() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = Config::default().app;
        app.standard.bundle_paths = vec![dir.path().join("superwhisper.app")];
        app.store_managed.bundle_paths = vec![dir.path().join("Setapp").join("superwhisper.app")];

        let controller = MacAppController::new(app.clone());
        assert!(!controller.is_installed());

        std::fs::create_dir_all(dir.path().join("Setapp").join("superwhisper.app")).unwrap();
        assert!(controller.is_installed());
    }

    #[cfg(unix)]
    mod with_fake_tools {
        use super::*;
        use crate::utils::fake_tool;

        #[tokio::test]
        async fn test_open_argument_vectors() {
            let dir = tempfile::tempdir().unwrap();
            let (open, log) = fake_tool::logging_script(dir.path(), "open", "");
            let controller = MacAppController::with_tools(Config::default().app, "osascript", open);

            controller
                .open_url("com.superduper.superwhisper", "superwhisper://")
                .await
                .unwrap();
            controller.launch_by_name().await.unwrap();

            assert_eq!(
                fake_tool::calls(&log),
                vec![
                    "-b com.superduper.superwhisper superwhisper://",
                    "-a superwhisper",
                ]
            );
        }

        #[tokio::test]
        async fn test_quit_runs_script() {
            let dir = tempfile::tempdir().unwrap();
            let (osascript, log) = fake_tool::logging_script(dir.path(), "osascript", "");
            let controller = MacAppController::with_tools(Config::default().app, osascript, "open");

            controller.quit().await.unwrap();

            assert_eq!(
                fake_tool::calls(&log),
                vec![format!("-e {}", controller.quit_script())]
            );
        }

        #[tokio::test]
        async fn test_open_failure_is_external_tool_error() {
            let dir = tempfile::tempdir().unwrap();
            let open = fake_tool::script(
                dir.path(),
                "open",
                "echo 'Unable to find application with bundle identifier' >&2; exit 1",
            );
            let controller = MacAppController::with_tools(Config::default().app, "osascript", open);

            let err = controller
                .open_url("com.superduper.superwhisper-setapp", "superwhisper://")
                .await
                .unwrap_err();
            match err {
                AppError::ExternalTool { tool, message } => {
                    assert_eq!(tool, "open");
                    assert_eq!(message, "Unable to find application with bundle identifier\n");
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }
}
