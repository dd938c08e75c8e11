//! # Canonical Byte Encoding
//!
//! Nodes never look at a transaction's JSON when checking signatures. They
//! rebuild this exact byte string and verify against its SHA-256 digest, so
//! every width, endianness and field order below is consensus-critical:
//!
//! ```text
//! type           1  byte
//! timestamp      4  bytes, little-endian i32
//! senderPublicKey 32 bytes
//! requesterPublicKey 32 bytes, only when present
//! recipientId    8  bytes, big-endian u64 of the digits before `L` (zeroes if none)
//! amount         8  bytes, little-endian u64
//! asset          variable, per type
//! signature      64 bytes, unless absent or skipped
//! signSignature  64 bytes, unless absent or skipped
//! ```
//!
//! Asset encodings per type:
//!
//! | type | bytes |
//! |------|-------|
//! | 0 transfer | `data` as UTF-8, or nothing |
//! | 1 signature | the 32-byte public key |
//! | 2 delegate | username as UTF-8 |
//! | 3 vote | the vote strings concatenated, UTF-8 |
//! | 4 multisignature | `min` (1 byte), `lifetime` (1 byte), keysgroup concatenated |
//! | 5 dapp | name, description, tags, link, icon as UTF-8, then type and category as 4-byte LE i32 |
//! | 6 inTransfer | dapp id as UTF-8 |
//! | 7 outTransfer | dapp id then transaction id, UTF-8 |

use crate::config::{
    AMOUNT_LENGTH, PUBLIC_KEY_LENGTH, RECIPIENT_LENGTH, SIGNATURE_LENGTH,
    TRANSACTION_HEADER_LENGTH,
};
use crate::transaction::types::{Asset, Transaction, TransactionType};
use thiserror::Error;

/// Errors while encoding a transaction to bytes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodingError {
    #[error("transaction of type {tx_type} is missing its `{field}` asset")]
    MissingAsset {
        tx_type: TransactionType,
        field: &'static str,
    },

    #[error("transfer data payload is not valid UTF-8")]
    InvalidDataEncoding,

    #[error("field `{field}` is not valid hex")]
    InvalidHexField { field: &'static str },

    #[error("field `{field}` must be {expected} bytes, got {actual}")]
    InvalidByteField {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid recipient id `{0}`: expected digits followed by `L`")]
    InvalidRecipientId(String),
}

/// Which signature fields to leave out of the encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkipSignatures {
    pub signature: bool,
    pub second_signature: bool,
}

impl SkipSignatures {
    /// Neither signature: what the first signature and co-signatures sign.
    pub const BOTH: Self = Self {
        signature: true,
        second_signature: true,
    };

    /// Only the second signature: what the second signature signs.
    pub const SECOND: Self = Self {
        signature: false,
        second_signature: true,
    };

    /// Everything present: what the id is derived from.
    pub const NONE: Self = Self {
        signature: false,
        second_signature: false,
    };
}

/// The full encoding, including every signature present.
pub fn transaction_bytes(tx: &Transaction) -> Result<Vec<u8>, EncodingError> {
    transaction_bytes_with(tx, SkipSignatures::NONE)
}

/// The encoding with the selected signature fields left out.
pub fn transaction_bytes_with(
    tx: &Transaction,
    skip: SkipSignatures,
) -> Result<Vec<u8>, EncodingError> {
    let asset = asset_bytes(tx.tx_type, &tx.asset)?;

    let mut out = Vec::with_capacity(
        TRANSACTION_HEADER_LENGTH + PUBLIC_KEY_LENGTH + asset.len() + 2 * SIGNATURE_LENGTH,
    );

    out.push(u8::from(tx.tx_type));
    out.extend_from_slice(&tx.timestamp.to_le_bytes());
    out.extend_from_slice(&fixed_hex::<PUBLIC_KEY_LENGTH>(
        &tx.sender_public_key,
        "senderPublicKey",
    )?);

    if let Some(requester) = &tx.requester_public_key {
        out.extend_from_slice(&fixed_hex::<PUBLIC_KEY_LENGTH>(
            requester,
            "requesterPublicKey",
        )?);
    }

    out.extend_from_slice(&recipient_bytes(tx.recipient_id.as_deref())?);

    let amount: [u8; AMOUNT_LENGTH] = tx.amount.to_le_bytes();
    out.extend_from_slice(&amount);

    out.extend_from_slice(&asset);

    if !skip.signature {
        if let Some(signature) = &tx.signature {
            out.extend_from_slice(&fixed_hex::<SIGNATURE_LENGTH>(signature, "signature")?);
        }
    }
    if !skip.second_signature {
        if let Some(sign_signature) = &tx.sign_signature {
            out.extend_from_slice(&fixed_hex::<SIGNATURE_LENGTH>(
                sign_signature,
                "signSignature",
            )?);
        }
    }

    Ok(out)
}

/// Big-endian u64 of the address digits. A missing recipient encodes as
/// eight zero bytes.
fn recipient_bytes(recipient_id: Option<&str>) -> Result<[u8; RECIPIENT_LENGTH], EncodingError> {
    let Some(recipient) = recipient_id else {
        return Ok([0u8; RECIPIENT_LENGTH]);
    };
    let digits = recipient
        .strip_suffix('L')
        .ok_or_else(|| EncodingError::InvalidRecipientId(recipient.to_string()))?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(EncodingError::InvalidRecipientId(recipient.to_string()));
    }
    let value: u64 = digits
        .parse()
        .map_err(|_| EncodingError::InvalidRecipientId(recipient.to_string()))?;
    Ok(value.to_be_bytes())
}

fn fixed_hex<const N: usize>(
    hex_str: &str,
    field: &'static str,
) -> Result<[u8; N], EncodingError> {
    let bytes = hex::decode(hex_str).map_err(|_| EncodingError::InvalidHexField { field })?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| EncodingError::InvalidByteField {
            field,
            expected: N,
            actual: bytes.len(),
        })
}

fn mismatch(tx_type: TransactionType, field: &'static str) -> EncodingError {
    EncodingError::MissingAsset { tx_type, field }
}

/// Type-specific asset bytes. The match is over the transaction type, so a
/// new type does not compile until it has an encoding.
fn asset_bytes(tx_type: TransactionType, asset: &Asset) -> Result<Vec<u8>, EncodingError> {
    match tx_type {
        TransactionType::Transfer => match asset {
            Asset::Transfer { data } => Ok(data
                .as_deref()
                .map(|d| d.as_bytes().to_vec())
                .unwrap_or_default()),
            _ => Err(mismatch(tx_type, "data")),
        },
        TransactionType::SecondSignature => match asset {
            Asset::Signature { signature } => Ok(fixed_hex::<PUBLIC_KEY_LENGTH>(
                &signature.public_key,
                "signature.publicKey",
            )?
            .to_vec()),
            _ => Err(mismatch(tx_type, "signature")),
        },
        TransactionType::Delegate => match asset {
            Asset::Delegate { delegate } => Ok(delegate.username.as_bytes().to_vec()),
            _ => Err(mismatch(tx_type, "delegate")),
        },
        TransactionType::Vote => match asset {
            Asset::Vote { votes } => Ok(votes.concat().into_bytes()),
            _ => Err(mismatch(tx_type, "votes")),
        },
        TransactionType::Multisignature => match asset {
            Asset::Multisignature { multisignature } => {
                let keys = multisignature.keysgroup.concat();
                let mut out = Vec::with_capacity(2 + keys.len());
                out.push(multisignature.min);
                out.push(multisignature.lifetime);
                out.extend_from_slice(keys.as_bytes());
                Ok(out)
            }
            _ => Err(mismatch(tx_type, "multisignature")),
        },
        TransactionType::Dapp => match asset {
            Asset::Dapp { dapp } => {
                let mut out = Vec::new();
                out.extend_from_slice(dapp.name.as_bytes());
                for text in [&dapp.description, &dapp.tags].into_iter().flatten() {
                    out.extend_from_slice(text.as_bytes());
                }
                out.extend_from_slice(dapp.link.as_bytes());
                if let Some(icon) = &dapp.icon {
                    out.extend_from_slice(icon.as_bytes());
                }
                out.extend_from_slice(&dapp.dapp_type.to_le_bytes());
                out.extend_from_slice(&dapp.category.to_le_bytes());
                Ok(out)
            }
            _ => Err(mismatch(tx_type, "dapp")),
        },
        TransactionType::InTransfer => match asset {
            Asset::InTransfer { in_transfer } => Ok(in_transfer.dapp_id.as_bytes().to_vec()),
            _ => Err(mismatch(tx_type, "inTransfer")),
        },
        TransactionType::OutTransfer => match asset {
            Asset::OutTransfer { out_transfer } => {
                let mut out = out_transfer.dapp_id.as_bytes().to_vec();
                out.extend_from_slice(out_transfer.transaction_id.as_bytes());
                Ok(out)
            }
            _ => Err(mismatch(tx_type, "outTransfer")),
        },
    }
}

/// Validates raw transfer data as UTF-8 before it is stored on a
/// transaction.
pub fn transfer_data_from_bytes(data: &[u8]) -> Result<String, EncodingError> {
    std::str::from_utf8(data)
        .map(str::to_owned)
        .map_err(|_| EncodingError::InvalidDataEncoding)
}
