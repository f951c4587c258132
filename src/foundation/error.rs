pub type PlayheadResult<T> = Result<T, PlayheadError>;

#[derive(thiserror::Error, Debug)]
pub enum PlayheadError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("playback error: {0}")]
    Playback(String),

    #[error("capture failed: {0}")]
    CaptureFailed(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PlayheadError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn playback(msg: impl Into<String>) -> Self {
        Self::Playback(msg.into())
    }

    pub fn capture_failed(msg: impl Into<String>) -> Self {
        Self::CaptureFailed(msg.into())
    }
}
