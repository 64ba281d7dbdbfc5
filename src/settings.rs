//! Layered application settings
//!
//! Values come from (lowest to highest priority) built-in defaults, an
//! optional TOML file, `BANK__`-prefixed environment variables and finally the
//! command-line flags. See `settings.toml` for an example file.

use crate::cli::CliArgs;
use crate::core::PriceList;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Login {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Launch the system browser on the login page at startup
    #[serde(default = "default_open_browser")]
    pub open_browser: bool,
}

impl Default for Login {
    fn default() -> Self {
        Login {
            bind: default_bind(),
            port: default_port(),
            open_browser: default_open_browser(),
        }
    }
}

impl Login {
    /// Socket address the login page listens on
    pub fn address(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.bind, self.port).parse()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// Path of the JSON snapshot file
    #[serde(default = "default_database")]
    pub database: PathBuf,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub login: Login,
    #[serde(default)]
    pub pricing: PriceList,
}

fn default_database() -> PathBuf {
    PathBuf::from("database.json")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_bind() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_open_browser() -> bool {
    true
}

impl Settings {
    /// Read settings from `path` (if it exists) and the environment
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("BANK").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// Apply command-line overrides
    pub fn with_overrides(mut self, args: &CliArgs) -> Self {
        if let Some(database) = &args.database {
            self.database = database.clone();
        }
        if let Some(port) = args.port {
            self.login.port = port;
        }
        if let Some(level) = &args.log_level {
            self.log_level = level.clone();
        }
        self
    }
}
