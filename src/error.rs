use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Illegal action: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Dice source exhausted while rolling a {die}")]
    DiceExhausted { die: &'static str },

    #[error("Invalid game state: {0}")]
    InvalidState(String),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<&str> for EngineError {
    fn from(message: &str) -> Self {
        EngineError::InvalidState(message.to_string())
    }
}

impl From<String> for EngineError {
    fn from(message: String) -> Self {
        EngineError::InvalidState(message)
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
