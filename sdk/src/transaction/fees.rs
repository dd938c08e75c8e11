//! Static fee table.
//!
//! Fees are fixed per type; only transfers with data and multisignature
//! registrations depend on the asset.

use crate::config::{
    FEE_DAPP, FEE_DATA, FEE_DELEGATE, FEE_MULTISIGNATURE, FEE_SECOND_SIGNATURE, FEE_SEND, FEE_VOTE,
};
use crate::transaction::types::{Asset, TransactionType};

/// Fee in base units for a transaction of `tx_type` carrying `asset`.
pub fn fee_for(tx_type: TransactionType, asset: &Asset) -> u64 {
    match tx_type {
        TransactionType::Transfer => match asset {
            Asset::Transfer { data: Some(_) } => FEE_SEND + FEE_DATA,
            _ => FEE_SEND,
        },
        TransactionType::SecondSignature => FEE_SECOND_SIGNATURE,
        TransactionType::Delegate => FEE_DELEGATE,
        TransactionType::Vote => FEE_VOTE,
        TransactionType::Multisignature => {
            let participants = match asset {
                Asset::Multisignature { multisignature } => multisignature.keysgroup.len() as u64,
                _ => 0,
            };
            FEE_MULTISIGNATURE * (participants + 1)
        }
        TransactionType::Dapp => FEE_DAPP,
        TransactionType::InTransfer | TransactionType::OutTransfer => FEE_SEND,
    }
}
