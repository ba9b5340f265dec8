//! Library - terminal library management system

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use library_system::{
    config::{AppConfig, ConfigOverrides, LoggingConfig},
    db,
    repository::Repository,
    services::Services,
    tui, AppError,
};

#[derive(Parser, Debug)]
#[command(name = "library", version, about = "Terminal library management system")]
struct Cli {
    /// Ignore the saved session and start at the login screen
    #[arg(short = 'n', long)]
    new_session: bool,

    /// Use an existing database file instead of the default one
    #[arg(short, long, value_name = "FILE")]
    database: Option<PathBuf>,

    /// Read configuration from FILE
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Some(path) = &cli.database {
        if let Err(message) = check_database_file(path) {
            eprintln!("{}", message);
            return ExitCode::FAILURE;
        }
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            let storage = e.downcast_ref::<AppError>().is_some_and(AppError::is_storage);
            if storage {
                eprintln!("[ERROR] Database engine error. {}", e);
            } else {
                eprintln!("[ERROR] Unknown error. {:#}", e);
            }
            ExitCode::FAILURE
        }
    }
}

/// An explicit database must already exist as a regular file
fn check_database_file(path: &Path) -> Result<(), String> {
    match std::fs::metadata(path) {
        Err(_) => Err(format!("Error: Database file {} doesn't exist!", path.display())),
        Ok(meta) if !meta.is_file() => Err(format!(
            "Error: Can't open database file {} : Not regular file",
            path.display()
        )),
        Ok(_) => Ok(()),
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let overrides = ConfigOverrides {
        data_dir: None,
        config_file: cli.config,
        database: cli.database,
    };
    let config = AppConfig::load(&overrides).context("Failed to load configuration")?;

    std::fs::create_dir_all(&config.data_dir)
        .with_context(|| format!("Failed to create data directory {}", config.data_dir.display()))?;

    let _guard = init_tracing(&config.logging)?;
    tracing::info!("Starting library v{}", env!("CARGO_PKG_VERSION"));

    let pool = db::connect(&config.database).await?;
    let services = Services::new(Repository::new(pool.clone()), &config);
    services.auth.ensure_root().await?;

    let restored = if cli.new_session {
        services.sessions.discard_file().await?;
        None
    } else {
        services.sessions.restore().await?
    };

    tui::run(services, &config.ui, restored).await?;

    pool.close().await;
    tracing::info!("Library closed");
    Ok(())
}

/// Log to a daily file; the terminal belongs to the interface
fn init_tracing(config: &LoggingConfig) -> anyhow::Result<WorkerGuard> {
    std::fs::create_dir_all(&config.directory)
        .with_context(|| format!("Failed to create log directory {}", config.directory.display()))?;

    let appender = tracing_appender::rolling::daily(&config.directory, "library.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("library={0},library_system={0},sqlx=warn", config.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .init();

    Ok(guard)
}
