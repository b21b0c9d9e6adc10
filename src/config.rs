use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// How payloads are printed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PayloadFormat {
    /// Compact, exactly what would go over the wire
    Json,
    #[default]
    Pretty,
}

impl std::str::FromStr for PayloadFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(PayloadFormat::Json),
            "pretty" => Ok(PayloadFormat::Pretty),
            _ => Err(format!(
                "Invalid payload format '{}'. Valid options: json, pretty",
                s
            )),
        }
    }
}

impl std::fmt::Display for PayloadFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayloadFormat::Json => write!(f, "json"),
            PayloadFormat::Pretty => write!(f, "pretty"),
        }
    }
}

pub const DEFAULT_LOG_FILTER: &str = "npplan=info,nodeping_core=warn";

const CONFIG_TEMPLATE: &str = r#"# npplan configuration

# Customer applied to declared entities that do not name one
# customer_id: 201205050153W2Q4C

# Payload output: pretty or json (compact, as sent on the wire)
format: pretty

# tracing filter used when RUST_LOG is unset
# log_filter: npplan=info,nodeping_core=warn
"#;

/// One resolved setting, as listed by `npplan config show`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigEntry {
    pub key: &'static str,
    pub value: String,
    pub source: ConfigSource,
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Owning customer applied to declared states that omit one
    pub customer_id: ConfigValue<Option<String>>,
    /// Payload output format
    pub format: ConfigValue<PayloadFormat>,
    /// tracing filter used when RUST_LOG is unset
    pub log_filter: ConfigValue<String>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    customer_id: Option<String>,
    format: Option<PayloadFormat>,
    log_filter: Option<String>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut customer_id = ConfigValue::new(None, ConfigSource::Default);
        let mut format = ConfigValue::new(PayloadFormat::default(), ConfigSource::Default);
        let mut log_filter =
            ConfigValue::new(DEFAULT_LOG_FILTER.to_string(), ConfigSource::Default);
        let mut config_file = None;

        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(id) = file_config.customer_id {
                customer_id = ConfigValue::new(Some(id), ConfigSource::File);
            }
            if let Some(fmt) = file_config.format {
                format = ConfigValue::new(fmt, ConfigSource::File);
            }
            if let Some(filter) = file_config.log_filter {
                log_filter = ConfigValue::new(filter, ConfigSource::File);
            }
        }

        // Apply environment variable overrides
        if let Ok(id) = std::env::var("NPPLAN_CUSTOMER_ID") {
            customer_id = ConfigValue::new(Some(id), ConfigSource::Environment);
        }
        if let Ok(fmt) = std::env::var("NPPLAN_FORMAT") {
            let parsed: PayloadFormat = fmt.parse().map_err(ConfigError::InvalidValue)?;
            format = ConfigValue::new(parsed, ConfigSource::Environment);
        }
        if let Ok(filter) = std::env::var("NPPLAN_LOG") {
            log_filter = ConfigValue::new(filter, ConfigSource::Environment);
        }

        Ok(Self {
            customer_id,
            format,
            log_filter,
            config_file,
        })
    }

    /// Every setting with its resolved value, in file order.
    pub fn entries(&self) -> Vec<ConfigEntry> {
        vec![
            ConfigEntry {
                key: "customer_id",
                value: self
                    .customer_id
                    .value
                    .clone()
                    .unwrap_or_else(|| "(none)".to_string()),
                source: self.customer_id.source.clone(),
            },
            ConfigEntry {
                key: "format",
                value: self.format.value.to_string(),
                source: self.format.source.clone(),
            },
            ConfigEntry {
                key: "log_filter",
                value: self.log_filter.value.clone(),
                source: self.log_filter.source.clone(),
            },
        ]
    }

    /// Write the commented starter file unless one exists.
    ///
    /// Returns `false` when the file was already there.
    pub fn init_file(path: &Path) -> Result<bool, ConfigError> {
        if path.exists() {
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ConfigError::WriteError(path.to_path_buf(), e))?;
        }
        std::fs::write(path, CONFIG_TEMPLATE)
            .map_err(|e| ConfigError::WriteError(path.to_path_buf(), e))?;
        tracing::debug!(path = %path.display(), "wrote config template");
        Ok(true)
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/npplan/
    /// - macOS: ~/Library/Application Support/npplan/
    /// - Windows: %APPDATA%/npplan/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("npplan")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {}", .0.display(), .1)]
    ReadError(PathBuf, std::io::Error),

    #[error("Failed to write config file '{}': {}", .0.display(), .1)]
    WriteError(PathBuf, std::io::Error),

    #[error("Failed to parse config file '{}': {}", .0.display(), .1)]
    ParseError(PathBuf, serde_yaml::Error),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}
