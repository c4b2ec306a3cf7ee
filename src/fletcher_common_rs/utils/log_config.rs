use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Local};
use log::{Level, LevelFilter};
use serde::{Deserialize, Serialize};

use crate::fletcher_common_rs::packet::core::exceptions::{FletcherError, FletcherResult};
use crate::fletcher_common_rs::utils::config_loader::LogConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl LogLevel {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Error => LevelFilter::Error,
        }
    }
}

impl From<Level> for LogLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::Trace => LogLevel::Trace,
            Level::Debug => LogLevel::Debug,
            Level::Info => LogLevel::Info,
            Level::Warn => LogLevel::Warn,
            Level::Error => LogLevel::Error,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct UnifiedLogFormatter {
    include_timestamps: bool,
    include_target: bool,
    color_enabled: bool,
}

impl UnifiedLogFormatter {
    pub fn new() -> Self {
        Self {
            include_timestamps: true,
            include_target: true,
            color_enabled: true,
        }
    }

    pub fn with_timestamps(mut self, enabled: bool) -> Self {
        self.include_timestamps = enabled;
        self
    }

    pub fn with_target(mut self, enabled: bool) -> Self {
        self.include_target = enabled;
        self
    }

    pub fn with_colors(mut self, enabled: bool) -> Self {
        self.color_enabled = enabled;
        self
    }

    pub fn format(&self, timestamp: DateTime<Local>, level: LogLevel, target: &str, message: &str) -> String {
        let mut parts = Vec::new();

        if self.include_timestamps {
            parts.push(format!("[{}]", timestamp.format("%Y-%m-%d %H:%M:%S%.3f")));
        }

        let level_str = if self.color_enabled {
            match level {
                LogLevel::Trace => format!("\x1b[37m{}\x1b[0m", level.as_str()),
                LogLevel::Debug => format!("\x1b[36m{}\x1b[0m", level.as_str()),
                LogLevel::Info => format!("\x1b[32m{}\x1b[0m", level.as_str()),
                LogLevel::Warn => format!("\x1b[33m{}\x1b[0m", level.as_str()),
                LogLevel::Error => format!("\x1b[31m{}\x1b[0m", level.as_str()),
            }
        } else {
            level.as_str().to_string()
        };
        parts.push(format!("[{}]", level_str));

        if self.include_target {
            parts.push(format!("[{}]", target));
        }

        parts.push(message.to_string());
        parts.join(" ")
    }
}

impl Default for UnifiedLogFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// 設定からフォーマッタを組み立てる。ファイル出力時は色付けしない
pub fn formatter_for(config: &LogConfig) -> UnifiedLogFormatter {
    UnifiedLogFormatter::new()
        .with_timestamps(config.timestamps)
        .with_target(config.targets)
        .with_colors(config.colors && config.file.is_none())
}

/// 設定に従って env_logger を初期化する
///
/// ファイルが指定されていれば追記モードで開き、色付けは無効にする。
/// RUST_LOG が設定されていれば設定値より優先する。
pub fn init_logging(config: &LogConfig) -> FletcherResult<()> {
    let level = LogLevel::from_str(&config.level).map_err(FletcherError::Config)?;
    let formatter = formatter_for(config);

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level.to_level_filter());
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    match &config.file {
        Some(path) => {
            let file = open_log_file(Path::new(path))?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        None => {
            builder.target(env_logger::Target::Stderr);
        }
    }

    builder.format(move |buf, record| {
        let line = formatter.format(
            Local::now(),
            LogLevel::from(record.level()),
            record.target(),
            &record.args().to_string(),
        );
        writeln!(buf, "{}", line)
    });

    builder
        .try_init()
        .map_err(|e| FletcherError::Config(format!("Failed to initialize logger: {}", e)))
}

fn open_log_file(path: &Path) -> FletcherResult<std::fs::File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| FletcherError::Io(format!("Failed to create log directory: {}", e)))?;
        }
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| FletcherError::Io(format!("Failed to open log file: {}", e)))
}
