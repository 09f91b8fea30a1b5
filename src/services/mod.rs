pub mod app_control;
pub mod coordinator;
pub mod device_config_store;
pub mod enumerator;
pub mod identity;
pub mod preferences;
pub mod restart;
pub mod selection;

pub use app_control::create_app_controller;
pub use coordinator::{DeviceSelector, LoadState};
pub use device_config_store::DeviceConfigStore;
pub use enumerator::create_device_enumerator;
pub use preferences::create_preference_store;
