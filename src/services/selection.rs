use crate::devices::{AudioDevice, DeviceConfig, TransportType};
use serde::Serialize;
use tracing::warn;

pub const SYSTEM_DEFAULT_TITLE: &str = "System Default";

/// Строка списка выбора микрофона
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionEntry {
    pub title: String,
    /// `None` для пункта "System Default"
    pub uid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport_type: Option<TransportType>,
    pub selected: bool,
}

impl SelectionEntry {
    #[cfg(test)]
    pub fn is_system_default(&self) -> bool {
        self.uid.is_none()
    }
}

/// Построить список: "System Default" первым, затем устройства.
///
/// Отмечен ровно тот пункт, который совпадает с настройками; при
/// `use_default = false` без UID не отмечено ничего.
pub fn build_selection(
    devices: &[AudioDevice],
    default_device: Option<&AudioDevice>,
    config: &DeviceConfig,
) -> Vec<SelectionEntry> {
    if config.is_inconsistent() {
        warn!("Настройки superwhisper несогласованы: устройство не выбрано");
    }

    let selected_uid = config.selected_device_id();

    let mut entries = Vec::with_capacity(devices.len() + 1);
    entries.push(SelectionEntry {
        title: SYSTEM_DEFAULT_TITLE.to_string(),
        uid: None,
        subtitle: default_device.map(|d| d.name.clone()),
        transport_type: None,
        selected: config.use_default,
    });

    entries.extend(devices.iter().map(|device| SelectionEntry {
        title: device.name.clone(),
        uid: Some(device.uid.clone()),
        subtitle: None,
        transport_type: Some(device.transport_type),
        selected: selected_uid == Some(device.uid.as_str()),
    }));

    entries
}
