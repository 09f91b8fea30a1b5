use crate::config::Config;
use crate::devices::AudioDevice;
use crate::error::Result;
use crate::utils::HelperInstaller;

use super::dry_run::DryRunEnumerator;
use super::helper::HelperEnumerator;

/// Trait for audio input enumerators that can run in different modes
#[async_trait::async_trait]
pub trait DeviceEnumerator: Send + Sync {
    /// List input devices with unique, non-empty UIDs
    async fn list_input_devices(&self) -> Result<Vec<AudioDevice>>;

    /// Current system default input device
    async fn get_default_input_device(&self) -> Result<AudioDevice>;
}

/// Factory function to create an appropriate enumerator based on the dry_run flag
pub fn create_device_enumerator(config: &Config, dry_run: bool) -> Box<dyn DeviceEnumerator> {
    if dry_run {
        Box::new(DryRunEnumerator::new())
    } else {
        Box::new(HelperEnumerator::new(HelperInstaller::from_config(&config.helper)))
    }
}
