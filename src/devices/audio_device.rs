use serde::{Deserialize, Serialize};
use std::fmt;

/// Тип подключения аудиоустройства
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportType {
    BuiltIn,
    Aggregate,
    Virtual,
    Pci,
    Usb,
    FireWire,
    Bluetooth,
    BluetoothLe,
    Hdmi,
    DisplayPort,
    AirPlay,
    Avb,
    Thunderbolt,
    #[default]
    #[serde(other)]
    Unknown,
}

impl fmt::Display for TransportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransportType::BuiltIn => "Built-in",
            TransportType::Aggregate => "Aggregate",
            TransportType::Virtual => "Virtual",
            TransportType::Pci => "PCI",
            TransportType::Usb => "USB",
            TransportType::FireWire => "FireWire",
            TransportType::Bluetooth => "Bluetooth",
            TransportType::BluetoothLe => "Bluetooth LE",
            TransportType::Hdmi => "HDMI",
            TransportType::DisplayPort => "DisplayPort",
            TransportType::AirPlay => "AirPlay",
            TransportType::Avb => "AVB",
            TransportType::Thunderbolt => "Thunderbolt",
            TransportType::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

/// Аудиоустройство в том виде, в каком его отдаёт утилита перечисления.
///
/// Идентичность определяется только `uid`; числовой `id` CoreAudio
/// может меняться между перезагрузками.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioDevice {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub name: String,
    pub uid: String,
    #[serde(default)]
    pub is_input: bool,
    #[serde(default)]
    pub is_output: bool,
    #[serde(default)]
    pub transport_type: TransportType,
}

impl AudioDevice {
    pub fn new(uid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            uid: uid.into(),
            is_input: false,
            is_output: false,
            transport_type: TransportType::Unknown,
        }
    }

    pub fn input(mut self) -> Self {
        self.is_input = true;
        self
    }

    pub fn with_transport(mut self, transport_type: TransportType) -> Self {
        self.transport_type = transport_type;
        self
    }
}

impl fmt::Display for AudioDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" [{}] ({})", self.name, self.uid, self.transport_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_helper_json() {
        let json = r#"{
            "id": 73,
            "name": "AirPods Pro",
            "uid": "A1-B2-C3:input",
            "isInput": true,
            "isOutput": false,
            "transportType": "bluetooth"
        }"#;

        let device: AudioDevice = serde_json::from_str(json).unwrap();
        assert_eq!(device.id, Some(73));
        assert_eq!(device.uid, "A1-B2-C3:input");
        assert!(device.is_input);
        assert!(!device.is_output);
        assert_eq!(device.transport_type, TransportType::Bluetooth);
    }

    #[test]
    fn test_unknown_transport_falls_back() {
        let json = r#"{"name": "Loopback", "uid": "LB", "isInput": true, "transportType": "carrier-pigeon"}"#;
        let device: AudioDevice = serde_json::from_str(json).unwrap();
        assert_eq!(device.transport_type, TransportType::Unknown);

        let json = r#"{"name": "Loopback", "uid": "LB"}"#;
        let device: AudioDevice = serde_json::from_str(json).unwrap();
        assert_eq!(device.transport_type, TransportType::Unknown);
        assert!(!device.is_input);
    }

    #[test]
    fn test_multiword_transport_names() {
        let parsed: Vec<TransportType> =
            serde_json::from_str(r#"["builtin", "bluetoothle", "displayport", "airplay"]"#).unwrap();
        assert_eq!(
            parsed,
            vec![
                TransportType::BuiltIn,
                TransportType::BluetoothLe,
                TransportType::DisplayPort,
                TransportType::AirPlay,
            ]
        );
    }

    #[test]
    fn test_display() {
        let device = AudioDevice::new("usb-1", "Shure MV7").with_transport(TransportType::Usb);
        assert_eq!(device.to_string(), "\"Shure MV7\" [usb-1] (USB)");
    }
}
