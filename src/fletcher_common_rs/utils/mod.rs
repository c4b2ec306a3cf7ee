/// 設定・ログ用ユーティリティ

pub mod config_loader;
pub mod log_config;

pub use config_loader::{ChecksumConfig, ConfigLoader, FletcherConfig, LogConfig};
pub use log_config::{formatter_for, init_logging, LogLevel, UnifiedLogFormatter};
