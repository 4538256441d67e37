use thiserror::Error;

pub type Result<T, E = OrreryError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrreryError {
    #[error("no planet named {0:?}")]
    UnknownBody(String),
    #[error("invalid speed multiplier {value} for {name}")]
    InvalidMultiplier { name: String, value: f64 },
    #[error("no speed control for planet {0:?}")]
    MissingControl(String),
}
