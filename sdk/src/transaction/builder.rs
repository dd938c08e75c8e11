//! Per-type transaction construction.
//!
//! Every builder method follows the same recipe:
//!
//! 1. Derive the sender keypair from the passphrase.
//! 2. Assemble the unsigned transaction with its fee from the fee table.
//! 3. Hand it to [`prepare_transaction`] for signing, optional second
//!    signing, and id derivation.
//!
//! The builder owns no state beyond the injected signing provider and
//! clock, so one instance can serve any number of threads.

use std::fmt;

use crate::crypto::keys::Keypair;
use crate::crypto::signatures::{Ed25519Provider, SignatureProvider};
use crate::time::{time_with_offset, EpochClock, SystemClock};
use crate::transaction::bytes::transfer_data_from_bytes;
use crate::transaction::fees::fee_for;
use crate::transaction::signing::prepare_transaction;
use crate::transaction::types::{
    Asset, DappAsset, DelegateAsset, InTransferAsset, MultisignatureAsset, OutTransferAsset,
    SignatureAsset, Transaction, TransactionType, Vote,
};
use crate::transaction::verification::TransactionError;

// ---------------------------------------------------------------------------
// Secrets
// ---------------------------------------------------------------------------

/// The passphrases a transaction is signed with. Borrowed, never stored.
#[derive(Clone, Copy)]
pub struct Secrets<'a> {
    passphrase: &'a str,
    second_passphrase: Option<&'a str>,
}

impl<'a> Secrets<'a> {
    pub fn new(passphrase: &'a str) -> Self {
        Self {
            passphrase,
            second_passphrase: None,
        }
    }

    /// Adds a second passphrase for accounts protected by a second signature.
    pub fn with_second(mut self, second_passphrase: &'a str) -> Self {
        self.second_passphrase = Some(second_passphrase);
        self
    }

    /// Same as [`with_second`](Self::with_second) but accepts an optional value.
    pub fn with_optional_second(mut self, second_passphrase: Option<&'a str>) -> Self {
        self.second_passphrase = second_passphrase;
        self
    }

    pub fn has_second(&self) -> bool {
        self.second_passphrase.is_some()
    }
}

impl fmt::Debug for Secrets<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secrets")
            .field("passphrase", &"<redacted>")
            .field("has_second", &self.has_second())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// TransactionBuilder
// ---------------------------------------------------------------------------

/// Builds signed transactions of every type.
///
/// # Example
///
/// ```
/// use lisk_sdk::time::FixedClock;
/// use lisk_sdk::crypto::Ed25519Provider;
/// use lisk_sdk::transaction::{Secrets, TransactionBuilder};
///
/// let builder = TransactionBuilder::with_parts(Ed25519Provider, FixedClock::at_epoch_seconds(141738));
/// let tx = builder
///     .transfer(&Secrets::new("secret"), "58191285901858109L", 1000, None, 0)
///     .unwrap();
/// assert_eq!(tx.id.as_deref(), Some("13987348420913138422"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TransactionBuilder<P = Ed25519Provider, C = SystemClock> {
    provider: P,
    clock: C,
}

impl TransactionBuilder {
    /// Ed25519 signatures and the system clock.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: SignatureProvider, C: EpochClock> TransactionBuilder<P, C> {
    pub fn with_parts(provider: P, clock: C) -> Self {
        Self { provider, clock }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn unsigned(
        &self,
        tx_type: TransactionType,
        sender: &Keypair,
        asset: Asset,
        time_offset: i32,
    ) -> Transaction {
        let mut tx = Transaction::unsigned(
            tx_type,
            sender.public_key_hex(),
            time_with_offset(&self.clock, time_offset),
            asset,
        );
        tx.fee = fee_for(tx_type, &tx.asset);
        tx
    }

    fn finish(
        &self,
        tx: Transaction,
        keypair: &Keypair,
        secrets: &Secrets<'_>,
    ) -> Result<Transaction, TransactionError> {
        let second = secrets.second_passphrase.map(Keypair::from_passphrase);
        Ok(prepare_transaction(
            &self.provider,
            tx,
            keypair,
            second.as_ref(),
        )?)
    }

    /// Type 0: send `amount` to `recipient_id`, optionally with a UTF-8 memo.
    pub fn transfer(
        &self,
        secrets: &Secrets<'_>,
        recipient_id: &str,
        amount: u64,
        data: Option<&[u8]>,
        time_offset: i32,
    ) -> Result<Transaction, TransactionError> {
        let keypair = Keypair::from_passphrase(secrets.passphrase);
        let data = data.map(transfer_data_from_bytes).transpose()?;

        let mut tx = self.unsigned(
            TransactionType::Transfer,
            &keypair,
            Asset::Transfer { data },
            time_offset,
        );
        tx.amount = amount;
        tx.recipient_id = Some(recipient_id.to_string());
        self.finish(tx, &keypair, secrets)
    }

    /// Type 1: register the key behind `second_passphrase` as the account's
    /// second signature. Signed by the first key only.
    pub fn second_signature(
        &self,
        passphrase: &str,
        second_passphrase: &str,
        time_offset: i32,
    ) -> Result<Transaction, TransactionError> {
        let keypair = Keypair::from_passphrase(passphrase);
        let asset = Asset::Signature {
            signature: SignatureAsset {
                public_key: Keypair::from_passphrase(second_passphrase).public_key_hex(),
            },
        };
        let tx = self.unsigned(TransactionType::SecondSignature, &keypair, asset, time_offset);
        let secrets = Secrets::new(passphrase).with_second(second_passphrase);
        self.finish(tx, &keypair, &secrets)
    }

    /// Type 2: register the account as delegate `username`.
    pub fn delegate(
        &self,
        secrets: &Secrets<'_>,
        username: &str,
        time_offset: i32,
    ) -> Result<Transaction, TransactionError> {
        let keypair = Keypair::from_passphrase(secrets.passphrase);
        let asset = Asset::Delegate {
            delegate: DelegateAsset {
                username: username.to_string(),
                public_key: None,
            },
        };
        let tx = self.unsigned(TransactionType::Delegate, &keypair, asset, time_offset);
        self.finish(tx, &keypair, secrets)
    }

    /// Type 3: add and remove votes. The recipient is the voter's own address.
    pub fn vote(
        &self,
        secrets: &Secrets<'_>,
        votes: &[Vote],
        time_offset: i32,
    ) -> Result<Transaction, TransactionError> {
        let keypair = Keypair::from_passphrase(secrets.passphrase);
        let asset = Asset::Vote {
            votes: votes.iter().map(Vote::to_string).collect(),
        };
        let mut tx = self.unsigned(TransactionType::Vote, &keypair, asset, time_offset);
        tx.recipient_id = Some(keypair.address());
        self.finish(tx, &keypair, secrets)
    }

    /// Type 4: turn the account into a `min`-of-n multisignature account.
    ///
    /// `keysgroup` entries may be bare public keys or already `+`-prefixed.
    pub fn multisignature(
        &self,
        secrets: &Secrets<'_>,
        keysgroup: &[String],
        lifetime: u8,
        min: u8,
        time_offset: i32,
    ) -> Result<Transaction, TransactionError> {
        let keypair = Keypair::from_passphrase(secrets.passphrase);
        let keysgroup = keysgroup
            .iter()
            .map(|key| {
                if key.starts_with('+') {
                    key.clone()
                } else {
                    format!("+{key}")
                }
            })
            .collect();
        let asset = Asset::Multisignature {
            multisignature: MultisignatureAsset {
                min,
                lifetime,
                keysgroup,
            },
        };
        let tx = self.unsigned(TransactionType::Multisignature, &keypair, asset, time_offset);
        self.finish(tx, &keypair, secrets)
    }

    /// Type 5: register a dapp.
    pub fn dapp(
        &self,
        secrets: &Secrets<'_>,
        dapp: DappAsset,
        time_offset: i32,
    ) -> Result<Transaction, TransactionError> {
        let keypair = Keypair::from_passphrase(secrets.passphrase);
        let tx = self.unsigned(TransactionType::Dapp, &keypair, Asset::Dapp { dapp }, time_offset);
        self.finish(tx, &keypair, secrets)
    }

    /// Type 0 on behalf of a multisignature account. The requester defaults
    /// to the signer; co-signatures are collected separately.
    pub fn multisignature_request(
        &self,
        secrets: &Secrets<'_>,
        recipient_id: &str,
        amount: u64,
        requester_public_key: Option<&str>,
        time_offset: i32,
    ) -> Result<Transaction, TransactionError> {
        let keypair = Keypair::from_passphrase(secrets.passphrase);
        let mut tx = self.unsigned(
            TransactionType::Transfer,
            &keypair,
            Asset::empty(),
            time_offset,
        );
        tx.amount = amount;
        tx.recipient_id = Some(recipient_id.to_string());
        tx.requester_public_key = Some(
            requester_public_key
                .map(str::to_string)
                .unwrap_or_else(|| keypair.public_key_hex()),
        );
        tx.signatures = Some(Vec::new());
        self.finish(tx, &keypair, secrets)
    }

    /// Type 6: move `amount` into dapp `dapp_id`.
    pub fn in_transfer(
        &self,
        secrets: &Secrets<'_>,
        dapp_id: &str,
        amount: u64,
        time_offset: i32,
    ) -> Result<Transaction, TransactionError> {
        let keypair = Keypair::from_passphrase(secrets.passphrase);
        let asset = Asset::InTransfer {
            in_transfer: InTransferAsset {
                dapp_id: dapp_id.to_string(),
            },
        };
        let mut tx = self.unsigned(TransactionType::InTransfer, &keypair, asset, time_offset);
        tx.amount = amount;
        self.finish(tx, &keypair, secrets)
    }

    /// Type 7: withdraw `amount` from dapp `dapp_id` to `recipient_id`,
    /// referencing the sidechain transaction `transaction_id`.
    pub fn out_transfer(
        &self,
        secrets: &Secrets<'_>,
        dapp_id: &str,
        transaction_id: &str,
        recipient_id: &str,
        amount: u64,
        time_offset: i32,
    ) -> Result<Transaction, TransactionError> {
        let keypair = Keypair::from_passphrase(secrets.passphrase);
        let asset = Asset::OutTransfer {
            out_transfer: OutTransferAsset {
                dapp_id: dapp_id.to_string(),
                transaction_id: transaction_id.to_string(),
            },
        };
        let mut tx = self.unsigned(TransactionType::OutTransfer, &keypair, asset, time_offset);
        tx.amount = amount;
        tx.recipient_id = Some(recipient_id.to_string());
        self.finish(tx, &keypair, secrets)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
