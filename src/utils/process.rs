use crate::debug_if_enabled;
use crate::error::{AppError, Result};
use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Output};

/// Запустить внешнюю команду и дождаться её завершения.
///
/// Ошибкой считается только невозможность запуска; код выхода и stderr
/// разбирает вызывающая сторона.
pub fn run<P, S>(program: P, args: &[S]) -> Result<Output>
where
    P: AsRef<OsStr>,
    S: AsRef<OsStr>,
{
    let program = program.as_ref();
    let tool = tool_name(program);

    debug_if_enabled!(
        "Запуск {} {:?}",
        tool,
        args.iter().map(|a| a.as_ref().to_string_lossy()).collect::<Vec<_>>()
    );

    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| AppError::external_tool(&tool, format!("{} не запускается: {}", tool, e)))?;

    debug_if_enabled!("{} завершился со статусом {}", tool, output.status);
    Ok(output)
}

/// Имя утилиты для сообщений: последний компонент пути
pub fn tool_name(program: &OsStr) -> String {
    Path::new(program)
        .file_name()
        .unwrap_or(program)
        .to_string_lossy()
        .into_owned()
}

pub fn stderr_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

pub fn stdout_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}
