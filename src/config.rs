//! qrbrand configuration handling
//!
//! Configuration is optional. Rendering defaults come from the file only;
//! the environment can adjust logging but never changes the image produced.

use crate::error::{Error, Result};
use crate::render::LogoRatio;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration structure read from disk
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QrbrandConfig {
    /// Default rendering options applied when a flag is omitted
    pub render: RenderDefaults,
    /// Logging configuration
    pub logging: LoggingOptions,
}

impl QrbrandConfig {
    /// Load configuration from an explicit path or fall back to discovered defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = explicit_path {
            Self::from_file(path)?
        } else if let Some(path) = Self::discover_file()? {
            tracing::debug!("Using configuration file: {}", path.display());
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        config.logging.apply_env_overrides();
        config.render.validate()?;
        Ok(config)
    }

    /// Attempt to locate a configuration file in common locations.
    fn discover_file() -> Result<Option<PathBuf>> {
        let cwd =
            env::current_dir().map_err(|e| Error::Config(format!("Failed to read cwd: {e}")))?;
        for candidate in ["qrbrand.toml", "qrbrand.yaml", "qrbrand.yml"] {
            let path = cwd.join(candidate);
            if path.is_file() {
                return Ok(Some(path));
            }
        }

        if let Some(xdg_config) = env::var_os("XDG_CONFIG_HOME") {
            let base = PathBuf::from(xdg_config).join("qrbrand");
            for candidate in ["config.toml", "config.yaml"] {
                let path = base.join(candidate);
                if path.is_file() {
                    return Ok(Some(path));
                }
            }
        }

        Ok(None)
    }

    /// Read configuration from a concrete file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;

        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase()
            .as_str()
        {
            "toml" => toml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse TOML {}: {e}", path.display()))
            }),
            "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse YAML {}: {e}", path.display()))
            }),
            other => Err(Error::Config(format!(
                "Unsupported config format '{}', expected toml/yaml",
                other
            ))),
        }
    }
}

/// Fallback values for flags the user did not pass
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderDefaults {
    /// Module fill color for `gen-qr-code`
    pub color: String,
    /// Background color
    pub back_color: String,
    /// Logo is scaled to fit within 1/`logo_ratio` of the image
    pub logo_ratio: f64,
    /// Draw rounded modules
    pub rounded: bool,
}

impl Default for RenderDefaults {
    fn default() -> Self {
        Self {
            color: "black".to_string(),
            back_color: "white".to_string(),
            logo_ratio: LogoRatio::MIN,
            rounded: false,
        }
    }
}

impl RenderDefaults {
    fn validate(&self) -> Result<()> {
        LogoRatio::new(self.logo_ratio)
            .map(|_| ())
            .map_err(|e| Error::Config(format!("render.logo_ratio: {e}")))
    }
}

/// Structured logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// Default log level (overridable via `QRBRAND_LOG_LEVEL`)
    pub level: String,
    /// Optional log file path for teeing structured logs
    pub file: Option<PathBuf>,
    /// Use ANSI colors in console logging
    pub color: bool,
    /// Optional log rotation strategy applied to `file`
    pub rotation: Option<LogRotation>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
            color: true,
            rotation: None,
        }
    }
}

impl LoggingOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(level) = env::var("QRBRAND_LOG_LEVEL") {
            self.level = level;
        }
        if let Ok(file) = env::var("QRBRAND_LOG_FILE") {
            self.file = Some(PathBuf::from(file));
        }
        if let Ok(color) = env::var("QRBRAND_LOG_COLOR") {
            match color.to_ascii_lowercase().as_str() {
                "0" | "false" | "off" => self.color = false,
                "1" | "true" | "on" => self.color = true,
                _ => {}
            }
        }
        if let Ok(rotation) = env::var("QRBRAND_LOG_ROTATION") {
            if let Some(parsed) = LogRotation::parse(&rotation) {
                self.rotation = Some(parsed);
            }
        }
    }

    /// Raise the level according to the number of `-v` flags.
    ///
    /// An explicit `QRBRAND_LOG_LEVEL` still wins.
    pub fn apply_verbosity(&mut self, verbose: u8) {
        if verbose == 0 || env::var_os("QRBRAND_LOG_LEVEL").is_some() {
            return;
        }
        self.level = match verbose {
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
        .to_string();
    }
}

/// Supported log rotation policies for file sinks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// Rotate log files once per hour
    Hourly,
    /// Rotate log files once per day
    Daily,
}

impl LogRotation {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "hourly" => Some(Self::Hourly),
            "daily" => Some(Self::Daily),
            _ => None,
        }
    }
}
