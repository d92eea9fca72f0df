use std::path::PathBuf;

/// Errors talking to the chat-completion endpoint.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("no API key configured (run `apilens config set --api-key <KEY>` or set {env})")]
    MissingApiKey { env: &'static str },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {code}: {body}")]
    Status { code: u16, body: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("analysis cancelled")]
    Cancelled,

    #[error("analysis worker exited without a result")]
    WorkerLost,
}

impl TransportError {
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::Status { code, .. } => *code == 429 || *code >= 500,
            _ => false,
        }
    }
}

/// Errors reading or writing the project configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}
