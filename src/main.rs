use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};
mod config;
mod devices;
mod error;
mod output;
mod services;
mod utils;

use config::Config;
use error::AppError;
use output::Printer;
use services::{
    create_app_controller,
    create_device_enumerator,
    create_preference_store,
    DeviceConfigStore,
    DeviceSelector,
    LoadState,
};

#[derive(Parser, Debug)]
#[command(name = "sw-mic")]
#[command(about = "Выбор микрофона для superwhisper с перезапуском приложения")]
struct Args {
    /// Путь к файлу конфигурации
    #[arg(short, long, default_value = "sw-mic.toml", global = true)]
    config: String,

    /// Режим сухого запуска (без реальных действий)
    #[arg(long, global = true)]
    dry_run: bool,

    /// Уровень логирования (по умолчанию из конфигурации)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Вывод в формате JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Список микрофонов с отметкой выбранного в superwhisper
    List,
    /// Текущие настройки микрофона superwhisper
    Current,
    /// Системный микрофон по умолчанию
    DefaultDevice,
    /// Выбрать микрофон по UID и перезапустить superwhisper
    Set {
        uid: String,
    },
    /// Вернуть системный микрофон по умолчанию и перезапустить superwhisper
    UseDefault,
}

impl Command {
    /// Команды, работающие с настройками superwhisper
    fn needs_app(&self) -> bool {
        matches!(self, Command::Current | Command::Set { .. } | Command::UseDefault)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Загрузка конфигурации
    let config = Config::load(&args.config)?;

    // Инициализация системы логирования
    init_tracing(args.log_level.as_deref().unwrap_or(&config.logging.level))?;

    info!("Запуск sw-mic v{}", env!("CARGO_PKG_VERSION"));

    if args.dry_run {
        warn!("Режим сухого запуска - реальные действия отключены");
    }

    let prefs = create_preference_store(&config, args.dry_run);
    let selector = DeviceSelector::new(
        create_device_enumerator(&config, args.dry_run),
        DeviceConfigStore::new(prefs, config.app.clone()),
        create_app_controller(&config, args.dry_run),
        config.app.clone(),
    );
    let printer = Printer::new(args.json);

    let command = args.command.clone().unwrap_or(Command::List);
    if command.needs_app() && !selector.is_installed() {
        printer.not_installed(&config.app.download_url)?;
        return Err(AppError::ApplicationNotInstalled.into());
    }

    match command {
        Command::List => match selector.load().await {
            Ok(LoadState::Ready(snapshot)) => printer.snapshot(&snapshot)?,
            Ok(LoadState::NotInstalled { download_url }) => {
                printer.not_installed(&download_url)?;
                return Err(AppError::ApplicationNotInstalled.into());
            }
            Err(e) => return Err(load_failure(e)),
        },
        Command::Current => {
            let (variant, device_config) = selector.current_config().await.map_err(load_failure)?;
            printer.config(variant, &device_config)?;
        }
        Command::DefaultDevice => {
            let device = selector.default_input_device().await.map_err(load_failure)?;
            printer.device(&device)?;
        }
        Command::Set { uid } => {
            let device = selector.find_device(&uid).await.map_err(load_failure)?;
            let outcome = selector
                .apply_selection_and_restart(Some(&device))
                .await
                .map_err(apply_failure)?;
            printer.applied(&device.name, &outcome)?;
        }
        Command::UseDefault => {
            let outcome = selector
                .apply_selection_and_restart(None)
                .await
                .map_err(apply_failure)?;
            printer.applied("System Default", &outcome)?;
        }
    }

    Ok(())
}

/// Ошибка начальной загрузки с подсказкой по исправлению
fn load_failure(e: AppError) -> anyhow::Error {
    error!("Не удалось получить данные: {}", e);
    let hint = match &e {
        AppError::HelperUnavailable(_) => "проверьте helper.source_path в конфигурации",
        _ => "повторите попытку",
    };
    anyhow::Error::new(e).context(format!("загрузка не удалась ({})", hint))
}

fn apply_failure(e: AppError) -> anyhow::Error {
    error!("Не удалось применить выбор: {}", e);
    anyhow::Error::new(e).context("выбор микрофона не применён")
}

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))?;

    // stdout остаётся для результата команды
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
        .init();

    Ok(())
}
