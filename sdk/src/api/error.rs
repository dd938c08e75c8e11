//! Error types for talking to Lisk nodes.

use thiserror::Error;

use crate::transaction::TransactionError;

/// A failure below the HTTP layer or in decoding its response.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connection(String),

    #[error("http status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("response is not valid JSON: {0}")]
    Decode(String),
}

/// Everything a [`LiskClient`](super::LiskClient) call can fail with.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The last peer tried failed and there was nobody left to re-dial.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Building or signing the transaction failed before anything was sent.
    #[error(transparent)]
    Transaction(#[from] TransactionError),

    #[error("could not create http request to any of the given peers")]
    NoPeersAvailable,

    #[error("invalid node url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The node answered with `success: false`.
    #[error("request rejected by node: {0}")]
    Rejected(String),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
