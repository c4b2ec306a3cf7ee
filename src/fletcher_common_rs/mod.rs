//! Fletcher チェックサム共通ライブラリ

pub mod packet;
pub mod session;
pub mod utils;
