//! Configuration management for the library system

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    pub file: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub directory: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UsersConfig {
    /// Password given to the `root` account when it is seeded
    pub root_password: String,
    /// Drop a user's borrows and favourites when their role changes
    pub clear_relations_on_role_change: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UiConfig {
    pub toast_seconds: u64,
    pub tick_rate_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
    pub users: UsersConfig,
    pub ui: UiConfig,
}

/// Values taken from the command line, applied last
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub data_dir: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
    pub database: Option<PathBuf>,
}

impl AppConfig {
    /// Platform data directory, e.g. `~/.local/share/library-system`
    pub fn default_data_dir() -> PathBuf {
        directories::ProjectDirs::from("", "", "library-system")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("./library-system"))
    }

    /// Load configuration from defaults, file, environment and overrides
    pub fn load(overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        let data_dir = overrides
            .data_dir
            .clone()
            .or_else(|| env::var_os("LIBRARY_DATA_DIR").map(PathBuf::from))
            .unwrap_or_else(Self::default_data_dir);

        // An explicit --config must exist; the implicit one is optional
        let config_file = match &overrides.config_file {
            Some(path) => File::from(path.as_path()).required(true),
            None => File::from(data_dir.join("config.toml")).required(false),
        };

        let config = Self::defaults(&data_dir)?
            .add_source(config_file)
            .add_source(
                Environment::with_prefix("LIBRARY")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option(
                "database.path",
                overrides.database.as_deref().map(path_value),
            )?
            .build()?;

        config.try_deserialize()
    }

    fn defaults(
        data_dir: &Path,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("data_dir", path_value(data_dir))?
            .set_default("database.path", path_value(&data_dir.join("library.db")))?
            .set_default("database.max_connections", 4)?
            .set_default("session.file", path_value(&data_dir.join("session.txt")))?
            .set_default("logging.level", "info")?
            .set_default("logging.directory", path_value(&data_dir.join("logs")))?
            .set_default("users.root_password", "root")?
            .set_default("users.clear_relations_on_role_change", true)?
            .set_default("ui.toast_seconds", 2)?
            .set_default("ui.tick_rate_ms", 250)
    }
}

fn path_value(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
