use crate::app_error;
use crate::config::HelperConfig;
use crate::error::Result;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// Установка поставляемой утилиты перечисления устройств в каталог с правом записи.
///
/// Файл копируется во временный файл рядом с целью, получает права 0o755 и
/// только потом переименовывается в `target`. Поэтому по пути `target` никогда
/// не лежит недописанная или неисполняемая копия, а два процесса, одновременно
/// выполняющие первую установку, просто по очереди заменят файл одинаковыми байтами.
#[derive(Debug, Clone)]
pub struct HelperInstaller {
    source: PathBuf,
    install_dir: PathBuf,
    target: PathBuf,
}

impl HelperInstaller {
    pub fn new(source: impl Into<PathBuf>, install_dir: impl AsRef<Path>, binary_name: &str) -> Self {
        let install_dir = install_dir.as_ref().to_path_buf();
        Self {
            source: source.into(),
            target: install_dir.join(binary_name),
            install_dir,
        }
    }

    pub fn from_config(config: &HelperConfig) -> Self {
        Self::new(config.source_path(), &config.install_dir, &config.binary_name)
    }

    #[cfg(test)]
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Убедиться, что утилита установлена и исполняема, и вернуть путь к ней
    pub fn ensure_installed(&self) -> Result<PathBuf> {
        if Self::is_executable(&self.target) {
            debug!("Утилита уже установлена: {:?}", self.target);
            return Ok(self.target.clone());
        }

        if self.target.exists() {
            warn!("Утилита {:?} не исполняема, переустанавливаем", self.target);
        }

        if !self.source.is_file() {
            return Err(app_error!(
                helper_unavailable,
                "поставляемый бинарник не найден: {:?}",
                self.source
            ));
        }

        info!("Установка утилиты {:?} -> {:?}", self.source, self.target);

        fs::create_dir_all(&self.install_dir).map_err(|e| {
            app_error!(helper_unavailable, "не удалось создать {:?}: {}", self.install_dir, e)
        })?;

        let mut staged = NamedTempFile::new_in(&self.install_dir).map_err(|e| {
            app_error!(helper_unavailable, "не удалось создать файл в {:?}: {}", self.install_dir, e)
        })?;

        let mut source = fs::File::open(&self.source).map_err(|e| {
            app_error!(helper_unavailable, "не удалось открыть {:?}: {}", self.source, e)
        })?;
        io::copy(&mut source, staged.as_file_mut()).map_err(|e| {
            app_error!(helper_unavailable, "не удалось скопировать {:?}: {}", self.source, e)
        })?;

        Self::make_executable(staged.path())?;

        // Дескриптор на запись закрывается сразу, иначе запуск вернёт ETXTBSY
        drop(staged.persist(&self.target).map_err(|e| {
            app_error!(helper_unavailable, "не удалось установить {:?}: {}", self.target, e)
        })?);

        Ok(self.target.clone())
    }

    #[cfg(unix)]
    fn is_executable(path: &Path) -> bool {
        use std::os::unix::fs::PermissionsExt;

        fs::metadata(path)
            .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }

    #[cfg(not(unix))]
    fn is_executable(path: &Path) -> bool {
        path.is_file()
    }

    #[cfg(unix)]
    fn make_executable(path: &Path) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).map_err(|e| {
            app_error!(helper_unavailable, "не удалось выдать права на {:?}: {}", path, e)
        })
    }

    #[cfg(not(unix))]
    fn make_executable(_path: &Path) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn test_installs_once() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("bundled-helper");
        fs::write(&source, b"#!/bin/sh\necho '[]'\n").unwrap();

        let installer = HelperInstaller::new(&source, dir.path().join("bin"), "audio-devices");
        let installed = installer.ensure_installed().unwrap();
        assert_eq!(installed, dir.path().join("bin").join("audio-devices"));
        assert_eq!(fs::read(&installed).unwrap(), fs::read(&source).unwrap());

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&installed).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o755);
        }

        // Повторная установка не перезаписывает уже существующий файл
        fs::write(&source, b"changed").unwrap();
        installer.ensure_installed().unwrap();
        assert_ne!(fs::read(&installed).unwrap(), b"changed");
    }

    #[test]
    fn test_missing_source_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let installer = HelperInstaller::new(dir.path().join("absent"), dir.path(), "audio-devices");

        let err = installer.ensure_installed().unwrap_err();
        assert!(matches!(err, AppError::HelperUnavailable(_)));
        assert!(!installer.target().exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_executable_target_is_reinstalled() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("bundled-helper");
        fs::write(&source, b"#!/bin/sh\necho '[]'\n").unwrap();

        // Копия без chmod, как после прерванной установки
        let bin = dir.path().join("bin");
        fs::create_dir_all(&bin).unwrap();
        let target = bin.join("audio-devices");
        fs::write(&target, b"#!/bin/sh\n").unwrap();
        fs::set_permissions(&target, fs::Permissions::from_mode(0o644)).unwrap();

        let installer = HelperInstaller::new(&source, &bin, "audio-devices");
        let installed = installer.ensure_installed().unwrap();

        assert_eq!(installed, target);
        assert_eq!(fs::read(&target).unwrap(), fs::read(&source).unwrap());
        let mode = fs::metadata(&target).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);

        // В каталоге не остаётся временных файлов
        let names: Vec<_> = fs::read_dir(&bin).unwrap().map(|e| e.unwrap().file_name()).collect();
        assert_eq!(names, vec![std::ffi::OsString::from("audio-devices")]);
    }
}
