pub mod helper_install;
pub mod process;

#[cfg(all(test, unix))]
pub mod fake_tool;

pub use helper_install::HelperInstaller;

// ✅ Макросы условного логирования для оптимизации производительности
#[macro_export]
macro_rules! debug_if_enabled {
    ($($arg:tt)*) => {
        if tracing::enabled!(tracing::Level::DEBUG) {
            tracing::debug!($($arg)*);
        }
    };
}
