/// Fletcher チェックサム処理用エラー型定義
/// 入力検証・幅・チェックサム不一致をそれぞれ独立した型で表す

use std::fmt;
use std::error::Error;

use super::checksum::ChecksumWord;

/// 入力記号エラー（'0' / '1' 以外の文字を含む入力）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidSymbolError {
    /// 入力が空
    Empty,
    /// 不正な記号
    Symbol { position: usize, symbol: char },
}

impl fmt::Display for InvalidSymbolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidSymbolError::Empty => write!(f, "入力が空です"),
            InvalidSymbolError::Symbol { position, symbol } => {
                write!(f, "不正な記号 '{}' (位置 {}): '0' と '1' のみ使用できます", symbol, position)
            }
        }
    }
}

impl Error for InvalidSymbolError {}

/// チェックサム幅エラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChecksumWidthError {
    /// メッセージがチェックサム幅より短い
    MessageTooShort { width: u32, actual: usize },
    /// 幅が 0 または奇数
    Unsupported { width: u32 },
}

impl fmt::Display for ChecksumWidthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChecksumWidthError::MessageTooShort { width, actual } => {
                write!(f, "メッセージが短すぎます: チェックサム {}ビット, 実際 {}ビット", width, actual)
            }
            ChecksumWidthError::Unsupported { width } => {
                write!(f, "サポートされていないチェックサム幅: {} (2 以上の偶数のみ)", width)
            }
        }
    }
}

impl Error for ChecksumWidthError {}

/// チェックサムエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChecksumError {
    /// チェックサム不一致
    Mismatch { computed: ChecksumWord, claimed: ChecksumWord },
}

impl fmt::Display for ChecksumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChecksumError::Mismatch { computed, claimed } => {
                write!(f, "チェックサム検証に失敗しました。計算値: {}, 受信値: {}", computed, claimed)
            }
        }
    }
}

impl Error for ChecksumError {}

/// Fletcher 処理の統合エラー型
#[derive(Debug, Clone, PartialEq)]
pub enum FletcherError {
    /// 入力記号エラー
    Symbol(InvalidSymbolError),
    /// 幅エラー
    Width(ChecksumWidthError),
    /// チェックサムエラー
    Checksum(ChecksumError),
    /// 設定エラー
    Config(String),
    /// I/O エラー
    Io(String),
}

impl fmt::Display for FletcherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FletcherError::Symbol(err) => write!(f, "入力エラー: {}", err),
            FletcherError::Width(err) => write!(f, "幅エラー: {}", err),
            FletcherError::Checksum(err) => write!(f, "チェックサムエラー: {}", err),
            FletcherError::Config(msg) => write!(f, "設定エラー: {}", msg),
            FletcherError::Io(msg) => write!(f, "I/Oエラー: {}", msg),
        }
    }
}

impl Error for FletcherError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FletcherError::Symbol(err) => Some(err),
            FletcherError::Width(err) => Some(err),
            FletcherError::Checksum(err) => Some(err),
            _ => None,
        }
    }
}

impl From<InvalidSymbolError> for FletcherError {
    fn from(err: InvalidSymbolError) -> Self {
        FletcherError::Symbol(err)
    }
}

impl From<ChecksumWidthError> for FletcherError {
    fn from(err: ChecksumWidthError) -> Self {
        FletcherError::Width(err)
    }
}

impl From<ChecksumError> for FletcherError {
    fn from(err: ChecksumError) -> Self {
        FletcherError::Checksum(err)
    }
}

impl From<std::io::Error> for FletcherError {
    fn from(err: std::io::Error) -> Self {
        FletcherError::Io(err.to_string())
    }
}

/// Result型のエイリアス
pub type FletcherResult<T> = Result<T, FletcherError>;

impl InvalidSymbolError {
    /// 不正記号エラーを作成
    pub fn symbol(position: usize, symbol: char) -> Self {
        InvalidSymbolError::Symbol { position, symbol }
    }
}

impl ChecksumWidthError {
    /// メッセージ長不足エラーを作成
    pub fn message_too_short(width: u32, actual: usize) -> Self {
        ChecksumWidthError::MessageTooShort { width, actual }
    }
}
