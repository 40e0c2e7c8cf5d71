use thiserror::Error;

#[derive(Debug, Error)]
pub enum OpsError {
    #[error("concurrency limit must be at least 1")]
    InvalidConcurrency,

    #[error("team not found: {0}")]
    TeamNotFound(String),

    #[error("analyzer exited with status {0}")]
    AnalyzerFailed(i32),

    #[error("failed to spawn analyzer: {0}")]
    AnalyzerSpawnFailed(String),

    #[error(transparent)]
    Client(#[from] linear_client::ClientError),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, OpsError>;
