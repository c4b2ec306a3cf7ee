//! パケット（ビットメッセージ）処理

pub mod core;
