//! DeviceEnumerator service: responsibility and boundaries
//!
//! This module is responsible ONLY for listing audio input devices and the
//! system default input. It does not know about superwhisper or its
//! preferences; selection decisions are made by `DeviceSelector`.

mod dry_run;
mod helper;
mod r#trait;

pub use self::r#trait::{create_device_enumerator, DeviceEnumerator};

use crate::debug_if_enabled;
use crate::devices::AudioDevice;
use std::collections::HashSet;

/// Оставить только входные устройства с непустым уникальным UID.
///
/// При дубликатах сохраняется первое вхождение.
pub(crate) fn normalize_input_devices(devices: Vec<AudioDevice>) -> Vec<AudioDevice> {
    let mut seen = HashSet::new();

    devices
        .into_iter()
        .filter(|device| {
            if !device.is_input {
                return false;
            }
            if device.uid.is_empty() {
                debug_if_enabled!("Пропущено устройство без UID: {}", device.name);
                return false;
            }
            if !seen.insert(device.uid.clone()) {
                debug_if_enabled!("Пропущен дубликат UID: {}", device.uid);
                return false;
            }
            true
        })
        .collect()
}
