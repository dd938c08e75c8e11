//! # Transaction Module
//!
//! Construction, byte encoding, signing and verification of Lisk
//! transactions.
//!
//! ## Architecture
//!
//! ```text
//! types.rs         Transaction, TransactionType, per-type Asset payloads
//! fees.rs          Static fee table
//! bytes.rs         Canonical byte encoding (what signatures and ids cover)
//! signing.rs       Sign / second-sign / co-sign, id derivation, the prepare pipeline
//! verification.rs  Signature and id checks, TransactionError
//! builder.rs       TransactionBuilder: one method per transaction type
//! ```
//!
//! ## Lifecycle
//!
//! 1. **Build**: a [`TransactionBuilder`] method assembles the unsigned record.
//! 2. **Sign**: [`prepare_transaction`] attaches `signature`, then
//!    `signSignature` when a second passphrase is given, then `id`.
//! 3. **Broadcast**: hand the finished record to [`crate::api::LiskClient`].
//! 4. **Verify**: [`verify_transaction`] re-derives the bytes and checks both.

pub mod builder;
pub mod bytes;
pub mod fees;
pub mod signing;
pub mod types;
pub mod verification;

pub use builder::{Secrets, TransactionBuilder};
pub use bytes::{transaction_bytes, transaction_bytes_with, EncodingError, SkipSignatures};
pub use fees::fee_for;
pub use signing::{
    multi_sign_transaction, prepare_transaction, second_sign_transaction, sign_transaction,
    transaction_hash, transaction_id, transaction_id_from_bytes,
};
pub use types::{
    Asset, DappAsset, DelegateAsset, InTransferAsset, MultisignatureAsset, OutTransferAsset,
    SignatureAsset, Transaction, TransactionType, Vote,
};
pub use verification::{verify_transaction, TransactionError};
