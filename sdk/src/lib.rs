// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Lisk SDK
//!
//! A client-side toolkit for the Lisk network: derive keys from a
//! passphrase, build and sign every transaction type the network accepts,
//! sign and encrypt off-chain messages, and hand the results to a node.
//!
//! Nothing secret ever leaves the process. Transactions are assembled and
//! signed locally; nodes only ever see signed records.
//!
//! ## Architecture
//!
//! - **config**: Fees, the network epoch, wire widths, nethashes and
//!   [`ClientOptions`](config::ClientOptions).
//! - **crypto**: SHA-256, Ed25519 keys and signatures, address derivation,
//!   signed and encrypted messages.
//! - **time**: Epoch-relative timestamps behind an injectable clock.
//! - **transaction**: Types, byte encoding, signing, verification and one
//!   builder method per transaction type.
//! - **api**: Request shaping, peer selection, retries and the
//!   [`Transport`](api::Transport) seam for talking to nodes.
//!
//! ## Quick Start
//!
//! ```no_run
//! use lisk_sdk::transaction::{Secrets, TransactionBuilder};
//!
//! let builder = TransactionBuilder::new();
//! let tx = builder
//!     .transfer(&Secrets::new("secret"), "58191285901858109L", 1000, None, 0)
//!     .unwrap();
//! println!("{}", serde_json::to_string_pretty(&tx).unwrap());
//! ```
//!
//! ## Ground Rules
//!
//! 1. Amounts are integers in base units (10^-8 LSK). No floats anywhere.
//! 2. Passphrases are borrowed for the duration of a call and never logged.
//! 3. If it produces bytes a node will check, it has a known-vector test.

pub mod api;
pub mod config;
pub mod crypto;
pub mod time;
pub mod transaction;
