use thiserror::Error;

/// Only structurally invalid input is an error. Bans and flips are
/// verdicts, see [`crate::verdict::Status`].
#[derive(Error, Debug)]
pub enum KarmaError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid judge configuration: {0}")]
    Config(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, KarmaError>;
