use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeederError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    // Feed errors
    #[error("Invalid feed URL: {0}")]
    InvalidUrl(String),

    // Network errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    // Parsing errors
    #[error("Feed parsing failed: {0}")]
    FeedParse(String),

    // Checkpoint file errors
    #[error("Checkpoint file not found: {0}")]
    CheckpointNotFound(String),

    #[error("Could not read checkpoint file {path}: {source}")]
    CheckpointRead {
        path: String,
        source: std::io::Error,
    },

    #[error("Malformed checkpoint file {path}: {source}")]
    CheckpointParse {
        path: String,
        source: serde_json::Error,
    },

    #[error("Could not save checkpoint file {path}: {source}")]
    CheckpointWrite {
        path: String,
        source: std::io::Error,
    },

    // User input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Failure to hand one notification to the push transport.
/// Always recoverable: the caller moves on to the next item.
#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("network failure: {0}")]
    Network(String),

    #[error("transport returned status {status}: {reason}")]
    Rejected { status: u16, reason: String },
}

impl From<pushover::SendError> for DeliveryError {
    fn from(err: pushover::SendError) -> Self {
        match err {
            pushover::SendError::RequestError(e) => DeliveryError::Network(e.to_string()),
            pushover::SendError::Rejected { status, reason } => {
                DeliveryError::Rejected { status, reason }
            }
        }
    }
}

impl From<pushover::PushoverError> for FeederError {
    fn from(err: pushover::PushoverError) -> Self {
        match err {
            pushover::PushoverError::ClientError(e) => FeederError::Http(e),
            pushover::PushoverError::MissingCredential(name) => {
                FeederError::Config(format!("Pushover {} must not be empty", name))
            }
        }
    }
}

pub type FeederResult<T> = Result<T, FeederError>;
