use parlor_core::EngineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("trial count must be at least 1")]
    ZeroTrials,
    #[error("{0} trials exceed what this platform can count")]
    TooManyTrials(u64),
    #[error("no trials recorded")]
    NoData,
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
    #[error("io error: {0}")]
    Io(String),
    #[error("serialize error: {0}")]
    Serialize(String),
}

impl From<std::io::Error> for BatchError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value.to_string())
    }
}

impl From<serde_json::Error> for BatchError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value.to_string())
    }
}
