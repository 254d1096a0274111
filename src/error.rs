//! Error type for the awaitable client operations.
//!
//! Fire-and-forget entry points never return these; they terminate every
//! failure path locally and log through `tracing` instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response body (network error, rejected fetch).
    #[error("transport error: {0}")]
    Transport(String),

    /// A response arrived but its body could not be decoded into the expected shape.
    #[error("response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),

    /// A body decoded as JSON but not into the shape the caller needs, or
    /// could not be converted out of a browser value.
    #[error("response could not be decoded: {0}")]
    Malformed(String),

    #[error("no browser window available")]
    NoWindow,

    #[error("invalid base url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, ClientError>;
