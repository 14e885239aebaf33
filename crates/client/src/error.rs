/// Errors raised by a [`Gateway`](crate::Gateway) implementation.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The payload was rejected before or by the server as invalid.
    #[error("{0}")]
    Argument(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("server returned HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("decode: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn argument(msg: impl Into<String>) -> Self {
        Self::Argument(msg.into())
    }

    pub fn is_argument(&self) -> bool {
        matches!(self, Self::Argument(_))
    }
}
