use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::fletcher_common_rs::packet::core::checksum::{ChecksumWidth, DEFAULT_WIDTH};
use crate::fletcher_common_rs::packet::core::exceptions::{FletcherError, FletcherResult};
use crate::fletcher_common_rs::utils::log_config::LogLevel;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChecksumConfig {
    pub width: u32,
}
impl Default for ChecksumConfig {
    fn default() -> Self { Self { width: DEFAULT_WIDTH } }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub file: Option<String>,
    pub timestamps: bool,
    /// 各行にモジュールパス（ログターゲット）を含めるか
    pub targets: bool,
    pub colors: bool,
}
impl Default for LogConfig {
    fn default() -> Self { Self { level: "info".into(), file: None, timestamps: true, targets: true, colors: true } }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FletcherConfig {
    pub checksum: ChecksumConfig,
    pub logging: LogConfig,
}

impl FletcherConfig {
    /// 検証済みのチェックサム幅
    pub fn checksum_width(&self) -> FletcherResult<ChecksumWidth> {
        Ok(ChecksumWidth::new(self.checksum.width)?)
    }
}

pub struct ConfigLoader { config_paths: Vec<PathBuf>, env_prefix: String }

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            config_paths: vec![
                PathBuf::from("fletcher.json"),
                PathBuf::from("fletcher.toml"),
                PathBuf::from("config/fletcher.json"),
                PathBuf::from("config/fletcher.toml"),
            ],
            env_prefix: "FLETCHER_".into(),
        }
    }
    pub fn with_paths(paths: Vec<PathBuf>) -> Self { Self { config_paths: paths, env_prefix: "FLETCHER_".into() } }
    pub fn with_env_prefix(mut self, prefix: String) -> Self { self.env_prefix = prefix; self }

    pub fn load(&self) -> FletcherResult<FletcherConfig> {
        let mut config = FletcherConfig::default();
        for path in &self.config_paths {
            if path.exists() {
                match self.load_from_file(path) {
                    Ok(fc) => { debug!("loaded config from {:?}", path); config = fc; break; }
                    Err(e) => { warn!("Failed to load config from {:?}: {}", path, e); }
                }
            }
        }
        config = self.apply_env_overrides(config)?;
        self.validate_config(&config)?;
        Ok(config)
    }

    fn load_from_file(&self, path: &Path) -> FletcherResult<FletcherConfig> {
        let content = fs::read_to_string(path).map_err(|e| FletcherError::Config(format!("Failed to read config file: {}", e)))?;
        match path.extension().and_then(|s| s.to_str()) {
            Some("json") => serde_json::from_str(&content).map_err(|e| FletcherError::Config(format!("Failed to parse JSON config: {}", e))),
            Some("toml") => toml::from_str(&content).map_err(|e| FletcherError::Config(format!("Failed to parse TOML config: {}", e))),
            _ => Err(FletcherError::Config("Unsupported config file format".into())),
        }
    }

    fn apply_env_overrides(&self, mut config: FletcherConfig) -> FletcherResult<FletcherConfig> {
        if let Ok(width_str) = env::var(format!("{}CHECKSUM_WIDTH", self.env_prefix)) {
            config.checksum.width = width_str.parse().map_err(|_| FletcherError::Config("Invalid checksum width in environment variable".into()))?;
        }
        if let Ok(level) = env::var(format!("{}LOG_LEVEL", self.env_prefix)) { config.logging.level = level; }
        if let Ok(file) = env::var(format!("{}LOG_FILE", self.env_prefix)) { config.logging.file = Some(file); }
        Ok(config)
    }

    fn validate_config(&self, config: &FletcherConfig) -> FletcherResult<()> {
        config.checksum_width()?;
        if LogLevel::from_str(&config.logging.level).is_err() {
            return Err(FletcherError::Config("Invalid log level. Must be one of: trace, debug, info, warn, error".into()));
        }
        Ok(())
    }

    pub fn save_config(&self, config: &FletcherConfig, path: &Path) -> FletcherResult<()> {
        let content = match path.extension().and_then(|s| s.to_str()) {
            Some("json") => serde_json::to_string_pretty(config).map_err(|e| FletcherError::Config(format!("Failed to serialize config to JSON: {}", e)))?,
            Some("toml") => toml::to_string_pretty(config).map_err(|e| FletcherError::Config(format!("Failed to serialize config to TOML: {}", e)))?,
            _ => return Err(FletcherError::Config("Unsupported config file format for saving".into())),
        };
        fs::write(path, content).map_err(|e| FletcherError::Io(format!("Failed to write config file: {}", e)))?;
        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self { Self::new() }
}
