use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("invalid thresholds: {0}")]
    InvalidThresholds(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("unknown recommendation: {0}")]
    UnknownRecommendation(String),

    #[error("snapshot {path}: {message}")]
    Snapshot { path: String, message: String },

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScoreError>;
