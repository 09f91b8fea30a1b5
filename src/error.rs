use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Ошибка конфигурации: {0}")]
    Config(#[from] anyhow::Error),

    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),

    #[error("Некорректный JSON от внешней утилиты: {0}")]
    Parse(#[from] serde_json::Error),

    /// Внешняя утилита сообщила об ошибке; `message` передаётся без изменений
    #[error("{message}")]
    ExternalTool { tool: String, message: String },

    #[error("Утилита перечисления устройств недоступна: {0}")]
    HelperUnavailable(String),

    #[error("Домен настроек superwhisper не найден (проверены: {0})")]
    PreferenceStoreNotFound(String),

    #[error("superwhisper не установлен")]
    ApplicationNotInstalled,

    #[error("Не удалось перезапустить superwhisper: {0}")]
    RestartFailed(String),

    #[error("Устройство не найдено: {0}")]
    DeviceNotFound(String),

    #[error("Внутренняя ошибка: {0}")]
    Internal(String),
}

impl AppError {
    pub fn external_tool(tool: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::ExternalTool {
            tool: tool.into(),
            message: message.into(),
        }
    }

    pub fn device_not_found<T>(msg: impl Into<String>) -> Result<T> {
        Err(AppError::DeviceNotFound(msg.into()))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

// Удобные макросы для создания ошибок
#[macro_export]
macro_rules! app_error {
    (helper_unavailable, $($arg:tt)*) => {
        $crate::error::AppError::HelperUnavailable(format!($($arg)*))
    };
    (device_not_found, $($arg:tt)*) => {
        $crate::error::AppError::DeviceNotFound(format!($($arg)*))
    };
    (restart_failed, $($arg:tt)*) => {
        $crate::error::AppError::RestartFailed(format!($($arg)*))
    };
    (internal, $($arg:tt)*) => {
        $crate::error::AppError::Internal(format!($($arg)*))
    };
}
