//! Core type definitions for Lisk transactions.
//!
//! The JSON shape of these types is the wire format nodes accept, so field
//! names are camelCase and optional fields are omitted rather than sent as
//! `null` (except `recipientId`, which nodes expect to see explicitly).

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ---------------------------------------------------------------------------
// TransactionType
// ---------------------------------------------------------------------------

/// Discriminant for the operation a transaction represents.
///
/// Always an integer on the wire and in the byte encoding. Converting from
/// anything else goes through [`TryFrom<u8>`], which is the only place an
/// unknown type can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum TransactionType {
    /// Value transfer, optionally carrying a data payload.
    Transfer = 0,
    /// Registration of a second signature key.
    SecondSignature = 1,
    /// Delegate registration.
    Delegate = 2,
    /// Adding or removing delegate votes.
    Vote = 3,
    /// Multisignature account registration.
    Multisignature = 4,
    /// Dapp registration.
    Dapp = 5,
    /// Transfer into a dapp sidechain.
    InTransfer = 6,
    /// Transfer out of a dapp sidechain.
    OutTransfer = 7,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown transaction type {0}")]
pub struct UnknownTransactionType(pub u8);

impl From<TransactionType> for u8 {
    fn from(value: TransactionType) -> Self {
        value as u8
    }
}

impl TryFrom<u8> for TransactionType {
    type Error = UnknownTransactionType;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => Self::Transfer,
            1 => Self::SecondSignature,
            2 => Self::Delegate,
            3 => Self::Vote,
            4 => Self::Multisignature,
            5 => Self::Dapp,
            6 => Self::InTransfer,
            7 => Self::OutTransfer,
            other => return Err(UnknownTransactionType(other)),
        })
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Transfer => "transfer",
            Self::SecondSignature => "signature",
            Self::Delegate => "delegate",
            Self::Vote => "vote",
            Self::Multisignature => "multisignature",
            Self::Dapp => "dapp",
            Self::InTransfer => "inTransfer",
            Self::OutTransfer => "outTransfer",
        };
        write!(f, "{name} ({})", *self as u8)
    }
}

// ---------------------------------------------------------------------------
// Asset payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureAsset {
    /// Hex public key being registered as the account's second key.
    pub public_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegateAsset {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultisignatureAsset {
    /// Number of signatures required to authorize a transaction.
    pub min: u8,
    /// Hours a pending multisignature transaction stays valid.
    pub lifetime: u8,
    /// `+<publicKeyHex>` entries.
    pub keysgroup: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DappAsset {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    /// 0 for a sidechain application.
    #[serde(rename = "type")]
    pub dapp_type: i32,
    /// Where the dapp's archive can be downloaded.
    pub link: String,
    pub category: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InTransferAsset {
    pub dapp_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutTransferAsset {
    pub dapp_id: String,
    pub transaction_id: String,
}

/// The type-specific payload of a transaction.
///
/// Untagged on the wire: the variant is recognised by the single key it
/// carries. `Transfer` comes last because `{}` (or `{"data": ..}`) is the
/// fallback every other shape would also match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Asset {
    Signature {
        signature: SignatureAsset,
    },
    Delegate {
        delegate: DelegateAsset,
    },
    Vote {
        votes: Vec<String>,
    },
    Multisignature {
        multisignature: MultisignatureAsset,
    },
    Dapp {
        dapp: DappAsset,
    },
    InTransfer {
        #[serde(rename = "inTransfer")]
        in_transfer: InTransferAsset,
    },
    OutTransfer {
        #[serde(rename = "outTransfer")]
        out_transfer: OutTransferAsset,
    },
    Transfer {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data: Option<String>,
    },
}

impl Asset {
    /// An empty transfer asset, `{}` on the wire.
    pub fn empty() -> Self {
        Self::Transfer { data: None }
    }
}

impl Default for Asset {
    fn default() -> Self {
        Self::empty()
    }
}

/// A single vote, rendered on the wire as `+<publicKey>` or `-<publicKey>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Vote {
    Add(String),
    Remove(String),
}

impl fmt::Display for Vote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add(public_key) => write!(f, "+{public_key}"),
            Self::Remove(public_key) => write!(f, "-{public_key}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A Lisk transaction, unsigned or signed.
///
/// Builders produce these fully signed. After that they are treated as
/// immutable: changing any field invalidates `signature` and `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    /// Base units (10^-8 LSK).
    pub amount: u64,
    pub fee: u64,
    /// `"<digits>L"`, or `None` for types without a recipient.
    pub recipient_id: Option<String>,
    pub sender_public_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requester_public_key: Option<String>,
    /// Seconds since the Lisk epoch.
    pub timestamp: i32,
    #[serde(default)]
    pub asset: Asset,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sign_signature: Option<String>,
    /// Co-signatures gathered for a multisignature request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signatures: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl Transaction {
    /// A bare transaction with no signatures and no id.
    pub fn unsigned(
        tx_type: TransactionType,
        sender_public_key: String,
        timestamp: i32,
        asset: Asset,
    ) -> Self {
        Self {
            tx_type,
            amount: 0,
            fee: 0,
            recipient_id: None,
            sender_public_key,
            requester_public_key: None,
            timestamp,
            asset,
            signature: None,
            sign_signature: None,
            signatures: None,
            id: None,
        }
    }

    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn type_serializes_as_integer() {
        assert_eq!(serde_json::to_value(TransactionType::Vote).unwrap(), json!(3));
        let parsed: TransactionType = serde_json::from_value(json!(5)).unwrap();
        assert_eq!(parsed, TransactionType::Dapp);
    }

    #[test]
    fn unknown_type_is_rejected() {
        assert_eq!(
            TransactionType::try_from(8),
            Err(UnknownTransactionType(8))
        );
        assert!(serde_json::from_value::<TransactionType>(json!(42)).is_err());
    }

    #[test]
    fn empty_asset_is_an_empty_object() {
        assert_eq!(serde_json::to_value(Asset::empty()).unwrap(), json!({}));
        let parsed: Asset = serde_json::from_value(json!({})).unwrap();
        assert_eq!(parsed, Asset::empty());
    }

    #[test]
    fn assets_are_recognised_by_their_key() {
        let parsed: Asset = serde_json::from_value(json!({"votes": ["+abc"]})).unwrap();
        assert_eq!(
            parsed,
            Asset::Vote {
                votes: vec!["+abc".into()]
            }
        );

        let parsed: Asset =
            serde_json::from_value(json!({"outTransfer": {"dappId": "1", "transactionId": "2"}}))
                .unwrap();
        assert!(matches!(parsed, Asset::OutTransfer { .. }));

        let parsed: Asset = serde_json::from_value(json!({"data": "memo"})).unwrap();
        assert_eq!(
            parsed,
            Asset::Transfer {
                data: Some("memo".into())
            }
        );
    }

    #[test]
    fn votes_render_with_sign_prefix() {
        assert_eq!(Vote::Add("aa".into()).to_string(), "+aa");
        assert_eq!(Vote::Remove("bb".into()).to_string(), "-bb");
    }

    #[test]
    fn transaction_json_uses_wire_names() {
        let mut tx = Transaction::unsigned(TransactionType::Transfer, "pk".into(), 10, Asset::empty());
        tx.signature = Some("sig".into());
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["type"], 0);
        assert_eq!(json["senderPublicKey"], "pk");
        assert_eq!(json["recipientId"], serde_json::Value::Null);
        assert!(json.get("signSignature").is_none());
        assert!(json.get("requesterPublicKey").is_none());

        let back: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(back, tx);
    }
}
