use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuestError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Invalid leaderboard name: {0:?}")]
    InvalidName(String),

    #[error("Leaderboard store error on {backend}: {message}")]
    Store { backend: String, message: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, QuestError>;
