use thiserror::Error;

pub type Result<T> = std::result::Result<T, WorkdeskError>;

#[derive(Debug, Error)]
pub enum WorkdeskError {
    #[error("Card not found: {0}")]
    CardNotFound(String),

    #[error("Card already on board: {0}")]
    DuplicateCard(String),

    #[error("Stage '{stage}' is not declared for {board}")]
    UnknownStage { board: String, stage: String },

    #[error("Unknown board type: {0}")]
    UnknownBoardType(String),

    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Role {role} may not {action}")]
    PermissionDenied { role: String, action: String },

    #[error("No active session. Log in first.")]
    SessionNotStarted,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
