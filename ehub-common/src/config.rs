//! Bootstrap configuration and path resolution
//!
//! Settings sources, highest priority first:
//! 1. Command-line arguments
//! 2. TOML configuration file (optional)
//! 3. Compiled defaults
//!
//! A missing TOML file is not an error: compiled defaults apply and a
//! warning is logged once tracing is up. The models directory defaults to a
//! location next to the deployed executable, falling back to the working
//! directory.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default config file name, looked up next to the executable then in the
/// working directory
pub const CONFIG_FILE: &str = "ehub.toml";

/// Default HTTP port of the prediction service
pub const DEFAULT_PORT: u16 = 8000;

/// Default bind address of the prediction service
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Bootstrap configuration loaded from TOML
///
/// Cannot change while running; restart to pick up edits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Bind address of the prediction service
    #[serde(default)]
    pub host: Option<String>,

    /// HTTP port of the prediction service
    #[serde(default)]
    pub port: Option<u16>,

    /// Directory holding model artifacts
    #[serde(default)]
    pub models_dir: Option<PathBuf>,

    /// Directory holding the generated dataset
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// Bind host, falling back to [`DEFAULT_HOST`]
    pub fn host_or_default(&self) -> String {
        self.host.clone().unwrap_or_else(|| DEFAULT_HOST.to_string())
    }

    /// Port, falling back to [`DEFAULT_PORT`]
    pub fn port_or_default(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }
}

/// Load the TOML config at `path`
///
/// Missing file → defaults. A file that exists but does not parse is an
/// [`Error::Config`] naming the file. Runs before tracing is initialized (the file carries
/// the log level), so callers report which source was used.
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    if !path.exists() {
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|source| Error::Config {
        path: path.to_path_buf(),
        source,
    })
}

/// Log which config source is in effect
pub fn log_config_source(path: &Path) {
    if path.exists() {
        info!("Loaded config from {}", path.display());
    } else {
        warn!("Config file {} not found, using compiled defaults", path.display());
    }
}

/// Directory of the running executable, or `.` if it cannot be determined
pub fn deployment_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Config file path: CLI argument, else next to the executable, else the
/// working directory
pub fn resolve_config_path(cli_arg: Option<&Path>) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    let beside_exe = deployment_dir().join(CONFIG_FILE);
    if beside_exe.is_file() {
        return beside_exe;
    }

    PathBuf::from(CONFIG_FILE)
}

/// Models directory: CLI argument, TOML value, `<exe_dir>/models` when it
/// exists, else `models` in the working directory
pub fn resolve_models_dir(cli_arg: Option<&Path>, config: &TomlConfig) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: TOML config file
    if let Some(path) = &config.models_dir {
        return path.clone();
    }

    // Priority 3: next to the deployed executable
    let beside_exe = deployment_dir().join("models");
    if beside_exe.is_dir() {
        return beside_exe;
    }

    PathBuf::from("models")
}
