//! # Node Access
//!
//! Everything needed to hand transactions to a Lisk node and read chain
//! state back.
//!
//! ```text
//! error.rs    ApiError, TransportError
//! request.rs  RequestKind → PreparedRequest (routes, headers, query strings)
//! peers.rs    PeerSelector: random choice, banning, re-dial policy
//! client.rs   Transport trait, RequestContext, LiskClient
//! ```
//!
//! The SDK has no HTTP stack of its own. Implement [`Transport`] over
//! whatever client you like; the CLI ships one built on `reqwest`.

pub mod client;
pub mod error;
pub mod peers;
pub mod request;

pub use client::{check_success, is_timestamp_in_future, LiskClient, RequestContext, Transport};
pub use error::{ApiError, TransportError};
pub use peers::PeerSelector;
pub use request::{
    base_url, nethash_headers, prepare, shape_transaction_request, HttpMethod, LocalAction,
    PreparedRequest, RequestKind, TransactionRequest,
};
