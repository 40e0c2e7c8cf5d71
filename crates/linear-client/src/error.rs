use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("LINEAR_API_KEY is not set")]
    MissingApiKey,

    #[error("authentication failed: the API key was rejected")]
    Unauthorized,

    #[error("API error: {0}")]
    Api(String),

    #[error("unexpected response shape: {0}")]
    Decode(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
