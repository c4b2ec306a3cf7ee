//! パケットコア機能
//! チェックサム計算、ビット操作、エラー処理等のコア機能

pub mod checksum;
pub mod bit_utils;
pub mod exceptions;
pub mod message;

// 便利な再エクスポート
pub use checksum::{compute, verify, ChecksumWidth, ChecksumWord, FletcherAccumulator, FletcherChecksum, VerifyReport};
pub use bit_utils::{validate, parse_bits, BitSequence};
pub use exceptions::{InvalidSymbolError, ChecksumWidthError, ChecksumError, FletcherError, FletcherResult};
pub use message::Message;
