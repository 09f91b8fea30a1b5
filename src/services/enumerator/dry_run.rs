use crate::devices::{AudioDevice, TransportType};
use crate::error::Result;
use once_cell::sync::Lazy;
use tracing::info;

use super::normalize_input_devices;
use super::r#trait::DeviceEnumerator;

static FAKE_DEVICES: Lazy<Vec<AudioDevice>> = Lazy::new(|| {
    vec![
        AudioDevice::new("BuiltInMicrophoneDevice", "MacBook Pro Microphone")
            .input()
            .with_transport(TransportType::BuiltIn),
        AudioDevice::new("AppleUSBAudioEngine:Shure Inc:Shure MV7:1", "Shure MV7")
            .input()
            .with_transport(TransportType::Usb),
        AudioDevice::new("9C-FC-28-11-22-33:input", "AirPods Pro")
            .input()
            .with_transport(TransportType::Bluetooth),
        AudioDevice::new("BlackHole2ch_UID", "BlackHole 2ch")
            .input()
            .with_transport(TransportType::Virtual),
    ]
});

pub struct DryRunEnumerator;

impl DryRunEnumerator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl DeviceEnumerator for DryRunEnumerator {
    async fn list_input_devices(&self) -> Result<Vec<AudioDevice>> {
        info!("Dry-run режим - эмулируем {} устройств", FAKE_DEVICES.len());
        Ok(normalize_input_devices(FAKE_DEVICES.clone()))
    }

    async fn get_default_input_device(&self) -> Result<AudioDevice> {
        Ok(FAKE_DEVICES[0].clone())
    }
}
