//! Transaction verification: re-derive the signed bytes and check them.
//!
//! This is the client-side mirror of what a node does before accepting a
//! transaction. The checks run cheapest first: presence and decoding before
//! any curve arithmetic.

use thiserror::Error;

use crate::crypto::keys::{KeyError, PublicKey};
use crate::crypto::signatures::{KeyRole, SignatureError, SignatureProvider};
use crate::transaction::bytes::{transaction_bytes_with, EncodingError, SkipSignatures};
use crate::transaction::signing::{transaction_id, verify_bytes};
use crate::transaction::types::Transaction;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Everything that can go wrong while building, signing or verifying a
/// transaction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransactionError {
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    Signature(#[from] SignatureError),

    #[error(transparent)]
    Key(#[from] KeyError),

    /// A signature field is not 64 bytes of hex.
    #[error("malformed {field}: expected 128 hex characters")]
    MalformedSignature { field: &'static str },

    /// The stored id does not match the one derived from the bytes.
    #[error("transaction id mismatch: expected {expected}, got {actual}")]
    IdMismatch { expected: String, actual: String },
}

fn decode_signature(hex_str: &str, field: &'static str) -> Result<[u8; 64], TransactionError> {
    let bytes = hex::decode(hex_str).map_err(|_| TransactionError::MalformedSignature { field })?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| TransactionError::MalformedSignature { field })
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// Verifies a signed transaction.
///
/// The checks, in order:
///
/// 1. **Signature present.**
/// 2. **Sender signature** over the encoding with both signatures skipped.
/// 3. **Second signature**, if present, against `second_public_key` over the
///    encoding that includes the first signature. A present `signSignature`
///    with no key to check it against is an error, not a pass.
/// 4. **Id**, if present, must match the fully signed encoding.
pub fn verify_transaction<P: SignatureProvider>(
    provider: &P,
    tx: &Transaction,
    second_public_key: Option<&str>,
) -> Result<(), TransactionError> {
    let signature = tx
        .signature
        .as_deref()
        .ok_or(SignatureError::MissingSignature)?;
    let signature = decode_signature(signature, "signature")?;
    let sender = PublicKey::from_hex(&tx.sender_public_key)?;

    let unsigned = transaction_bytes_with(tx, SkipSignatures::BOTH)?;
    if !verify_bytes(provider, &unsigned, &signature, &sender) {
        return Err(SignatureError::InvalidSignature {
            role: KeyRole::First,
        }
        .into());
    }

    if let Some(sign_signature) = tx.sign_signature.as_deref() {
        let second_key = second_public_key.ok_or(SignatureError::MissingSecondPublicKey)?;
        let second_key = PublicKey::from_hex(second_key)?;
        let sign_signature = decode_signature(sign_signature, "signSignature")?;

        let singly_signed = transaction_bytes_with(tx, SkipSignatures::SECOND)?;
        if !verify_bytes(provider, &singly_signed, &sign_signature, &second_key) {
            return Err(SignatureError::InvalidSignature {
                role: KeyRole::Second,
            }
            .into());
        }
    }

    if let Some(actual) = tx.id.as_deref() {
        let expected = transaction_id(tx)?;
        if expected != actual {
            return Err(TransactionError::IdMismatch {
                expected,
                actual: actual.to_string(),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
