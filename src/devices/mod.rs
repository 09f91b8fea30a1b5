pub mod audio_device;
pub mod device_config;

pub use audio_device::{AudioDevice, TransportType};
pub use device_config::DeviceConfig;
