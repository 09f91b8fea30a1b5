//! Доступ к хранилищу настроек macOS (`defaults`) через небольшой порт.
//!
//! Логика чтения/записи выбора микрофона живёт в `device_config_store` и
//! работает с любым `PreferenceStore`, включая хранилище в памяти.

mod defaults;
mod memory;
mod r#trait;

pub use self::memory::MemoryPreferenceStore;
pub use self::r#trait::{create_preference_store, PrefValue, PreferenceStore};
