use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnricherError {
    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to write enriched output: {0}")]
    Sink(String),

    #[error("Input file is empty: {0}")]
    EmptyInput(PathBuf),

    #[error("Input file not found: {0}")]
    InputNotFound(PathBuf),
}

pub type Result<T> = std::result::Result<T, EnricherError>;
