//! Исполняемые shell-скрипты, подменяющие внешние утилиты в тестах.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Записать `#!/bin/sh` скрипт с правами 0o755 и вернуть путь к нему
pub fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Скрипт, дописывающий свои аргументы строкой в `<name>.log` и затем выполняющий `body`
pub fn logging_script(dir: &Path, name: &str, body: &str) -> (PathBuf, PathBuf) {
    let log = dir.join(format!("{}.log", name));
    let path = script(dir, name, &format!("echo \"$*\" >> '{}'\n{}", log.display(), body));
    (path, log)
}

/// Строки журнала вызовов; пустой список, если скрипт не запускался
pub fn calls(log: &Path) -> Vec<String> {
    fs::read_to_string(log)
        .map(|text| text.lines().map(str::to_string).collect())
        .unwrap_or_default()
}
