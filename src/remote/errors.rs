use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RemoteError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Remote service responded with {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Query rejected: {0}")]
    Rejected(String),
}

pub type RemoteResult<T> = Result<T, RemoteError>;

