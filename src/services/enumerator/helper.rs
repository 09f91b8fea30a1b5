use crate::devices::AudioDevice;
use crate::error::{AppError, Result};
use crate::utils::process::{self, stderr_text, stdout_text, tool_name};
use crate::utils::HelperInstaller;
use tracing::debug;

use super::normalize_input_devices;
use super::r#trait::DeviceEnumerator;

const LIST_INPUTS_ARGS: [&str; 3] = ["list", "--input", "--json"];
const DEFAULT_INPUT_ARGS: [&str; 3] = ["input", "get", "--json"];

/// Перечисление устройств через поставляемую утилиту `audio-devices`
pub struct HelperEnumerator {
    installer: HelperInstaller,
}

impl HelperEnumerator {
    pub fn new(installer: HelperInstaller) -> Self {
        Self { installer }
    }

    /// Запустить утилиту и вернуть stdout. Любой вывод в stderr считается ошибкой.
    fn run_helper(&self, args: &[&str]) -> Result<String> {
        let path = self.installer.ensure_installed()?;
        let tool = tool_name(path.as_os_str());

        let output = process::run(&path, args)?;

        let stderr = stderr_text(&output);
        if !stderr.is_empty() {
            return Err(AppError::external_tool(tool, stderr));
        }

        if !output.status.success() {
            return Err(AppError::external_tool(
                &tool,
                format!("{} завершился со статусом {}", tool, output.status),
            ));
        }

        Ok(stdout_text(&output))
    }
}

#[async_trait::async_trait]
impl DeviceEnumerator for HelperEnumerator {
    async fn list_input_devices(&self) -> Result<Vec<AudioDevice>> {
        let stdout = self.run_helper(&LIST_INPUTS_ARGS)?;
        let devices: Vec<AudioDevice> = serde_json::from_str(&stdout)?;
        let devices = normalize_input_devices(devices);

        debug!("Найдено {} входных устройств", devices.len());
        Ok(devices)
    }

    async fn get_default_input_device(&self) -> Result<AudioDevice> {
        let stdout = self.run_helper(&DEFAULT_INPUT_ARGS)?;
        let device: AudioDevice = serde_json::from_str(&stdout)?;

        debug!("Системный микрофон по умолчанию: {}", device);
        Ok(device)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::devices::TransportType;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    /// Поставить фиктивную утилиту, которая отвечает по аргументу $1
    fn fake_helper(script_body: &str) -> (TempDir, HelperEnumerator) {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("bundled");
        fs::write(&source, format!("#!/bin/sh\n{}\n", script_body)).unwrap();

        let installer = HelperInstaller::new(&source, dir.path().join("bin"), "audio-devices");
        (dir, HelperEnumerator::new(installer))
    }

    fn installed(dir: &Path) -> bool {
        dir.join("bin").join("audio-devices").exists()
    }

    #[tokio::test]
    async fn test_lists_input_devices() {
        let (dir, enumerator) = fake_helper(
            r#"if [ "$1" = "list" ]; then
cat <<'JSON'
[
  {"name": "Mic1", "uid": "A", "isInput": true, "isOutput": false, "transportType": "usb"},
  {"name": "Mic2", "uid": "B", "isInput": true, "isOutput": false, "transportType": "bluetooth"},
  {"name": "Dup", "uid": "A", "isInput": true, "isOutput": false, "transportType": "usb"}
]
JSON
fi"#,
        );

        let devices = enumerator.list_input_devices().await.unwrap();
        assert!(installed(dir.path()));
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].uid, "A");
        assert_eq!(devices[1].transport_type, TransportType::Bluetooth);
    }

    #[tokio::test]
    async fn test_default_input_device() {
        let (_dir, enumerator) = fake_helper(
            r#"if [ "$1" = "input" ] && [ "$2" = "get" ]; then
echo '{"name": "MacBook Pro Microphone", "uid": "BuiltInMicrophoneDevice", "isInput": true, "transportType": "builtin"}'
fi"#,
        );

        let device = enumerator.get_default_input_device().await.unwrap();
        assert_eq!(device.uid, "BuiltInMicrophoneDevice");
        assert_eq!(device.transport_type, TransportType::BuiltIn);
    }

    #[tokio::test]
    async fn test_stderr_is_surfaced_verbatim() {
        let (_dir, enumerator) = fake_helper("echo '[]'; echo 'kAudioHardwareBadObjectError' >&2");

        let err = enumerator.list_input_devices().await.unwrap_err();
        match err {
            AppError::ExternalTool { tool, message } => {
                assert_eq!(tool, "audio-devices");
                assert_eq!(message, "kAudioHardwareBadObjectError\n");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_json_is_parse_error() {
        let (_dir, enumerator) = fake_helper("echo 'not json'");

        let err = enumerator.list_input_devices().await.unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }

    #[tokio::test]
    async fn test_missing_helper_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let installer = HelperInstaller::new(dir.path().join("absent"), dir.path(), "audio-devices");
        let enumerator = HelperEnumerator::new(installer);

        let err = enumerator.get_default_input_device().await.unwrap_err();
        assert!(matches!(err, AppError::HelperUnavailable(_)));
    }

    #[tokio::test]
    async fn test_nonzero_exit_without_stderr_is_error() {
        let (_dir, enumerator) = fake_helper("echo '[]'; exit 3");

        let err = enumerator.list_input_devices().await.unwrap_err();
        assert!(matches!(err, AppError::ExternalTool { ref tool, .. } if tool == "audio-devices"));
    }

    #[tokio::test]
    async fn test_half_installed_helper_is_repaired() {
        use std::os::unix::fs::PermissionsExt;

        let (dir, enumerator) = fake_helper("echo '[]'");
        let target = dir.path().join("bin").join("audio-devices");
        fs::create_dir_all(target.parent().unwrap()).unwrap();
        fs::copy(dir.path().join("bundled"), &target).unwrap();
        fs::set_permissions(&target, fs::Permissions::from_mode(0o644)).unwrap();

        assert!(enumerator.list_input_devices().await.unwrap().is_empty());
        assert!(enumerator.list_input_devices().await.unwrap().is_empty());
    }
}
