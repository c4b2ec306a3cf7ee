/// 対話セッション

pub mod receptor_session;

pub use receptor_session::{CheckOutcome, MenuChoice, ReceptorSession, SessionStats};
