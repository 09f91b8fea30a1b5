use serde::{Deserialize, Serialize};
use std::fmt;

/// Сохранённый в superwhisper выбор микрофона.
///
/// При `use_default == true` значение `device_id` не используется.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceConfig {
    pub device_id: Option<String>,
    pub use_default: bool,
}

impl DeviceConfig {
    pub fn system_default() -> Self {
        Self {
            device_id: None,
            use_default: true,
        }
    }

    #[cfg(test)]
    pub fn device(uid: impl Into<String>) -> Self {
        Self {
            device_id: Some(uid.into()),
            use_default: false,
        }
    }

    /// UID выбранного устройства с учётом флага `use_default`
    pub fn selected_device_id(&self) -> Option<&str> {
        if self.use_default {
            None
        } else {
            self.device_id.as_deref()
        }
    }

    /// `useDefaultAudioDevice = false`, но `selectedDeviceID` отсутствует
    pub fn is_inconsistent(&self) -> bool {
        !self.use_default && self.device_id.is_none()
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self::system_default()
    }
}

impl fmt::Display for DeviceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.use_default, self.device_id.as_deref()) {
            (true, _) => write!(f, "системное устройство по умолчанию"),
            (false, Some(uid)) => write!(f, "устройство {}", uid),
            (false, None) => write!(f, "устройство не задано"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_use_default_hides_device_id() {
        let config = DeviceConfig {
            device_id: Some("stale".to_string()),
            use_default: true,
        };
        assert_eq!(config.selected_device_id(), None);
        assert!(!config.is_inconsistent());
    }

    #[test]
    fn test_inconsistent_state() {
        let config = DeviceConfig {
            device_id: None,
            use_default: false,
        };
        assert!(config.is_inconsistent());
        assert_eq!(config.selected_device_id(), None);
        assert_eq!(DeviceConfig::device("B").selected_device_id(), Some("B"));
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_string(&DeviceConfig::device("B")).unwrap();
        assert_eq!(json, r#"{"deviceId":"B","useDefault":false}"#);
    }
}
