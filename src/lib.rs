/// Fletcher Rust Implementation
/// Fletcher's checksum receptor: bit-level checksum engine and utilities in Rust

pub mod fletcher_common_rs;

// 便利な再エクスポート
pub mod prelude {
    pub use crate::fletcher_common_rs::packet::core::{
        compute, validate, verify, BitSequence, ChecksumWidth, ChecksumWord, FletcherChecksum, FletcherError,
        FletcherResult, Message, VerifyReport,
    };
    pub use crate::fletcher_common_rs::session::ReceptorSession;
}
