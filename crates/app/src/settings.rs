//! Handles settings for the application. Configuration is written in
//! `settings.toml`, with `OUTLAY__`-prefixed environment variables taking
//! precedence.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Where the server keeps its data.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    /// In-memory database, gone on exit. Useful for local experiments.
    Memory,
    /// SQLite file at the given path, created when missing.
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    pub database: Database,
}

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("settings"))
            .add_source(Environment::with_prefix("OUTLAY").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}
