use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EmulatorError {
    #[error("unknown animation '{0}'")]
    UnknownAnimation(String),
    #[error("no saved animation with key '{0}'")]
    SavedAnimationNotFound(String),
    #[error("invalid value {value} for parameter '{name}'")]
    InvalidParameter { name: String, value: f64 },
    #[error("server is not running")]
    ServerNotRunning,
}
