use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("unknown chain: {0} (expected one of: {1})")]
    UnknownChain(String, String),
}
