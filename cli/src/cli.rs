//! # CLI Interface
//!
//! Defines the command-line structure for `lisk` using `clap` derive.
//!
//! Offline commands (`keys`, `address`, `*-message`, `create`, `verify`,
//! `co-sign`) never open a connection. Online commands (`broadcast`,
//! `account`, `transaction`, `delegates`, and `create --broadcast`) use the
//! global connection flags, optionally overlaid on a TOML config file.
//!
//! Passphrases can come from `LISK_PASSPHRASE` and
//! `LISK_SECOND_PASSPHRASE` so they stay out of shell history.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::logging::LogFormat;

/// Lisk wallet and node client.
///
/// Derives keys, builds and signs transactions offline, and talks to Lisk
/// nodes to broadcast them and read chain state.
#[derive(Parser, Debug)]
#[command(
    name = "lisk",
    about = "Lisk wallet and node client",
    version,
    propagate_version = true
)]
pub struct LiskCli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Client configuration file (TOML).
    #[arg(long, short = 'c', env = "LISK_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log output format. Logs go to stderr.
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
    pub log_format: LogFormat,

    /// Use the testnet.
    #[arg(long, global = true)]
    pub testnet: bool,

    /// Talk to nodes over HTTPS.
    #[arg(long, global = true)]
    pub ssl: bool,

    /// Dial this node only, with no failover.
    #[arg(long, env = "LISK_NODE", global = true)]
    pub node: Option<String>,

    /// Node port. Defaults to the network's standard port.
    #[arg(long, global = true)]
    pub port: Option<u16>,

    /// Where transactions are submitted.
    #[arg(long, value_enum, global = true)]
    pub route: Option<RouteArg>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RouteArg {
    /// POST /peer/transactions
    Peer,
    /// PUT /api/transactions
    Public,
}

#[derive(Args, Debug, Clone)]
pub struct SecretArgs {
    /// Account passphrase.
    #[arg(long, env = "LISK_PASSPHRASE", hide_env_values = true)]
    pub passphrase: String,

    /// Second passphrase, for accounts with a registered second signature.
    #[arg(long, env = "LISK_SECOND_PASSPHRASE", hide_env_values = true)]
    pub second_passphrase: Option<String>,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the keypair and address behind a passphrase.
    Keys(SecretArgs),

    /// Derive the address of a public key.
    Address {
        /// Hex-encoded Ed25519 public key.
        public_key: String,
    },

    /// Sign a message. With a second passphrase, the signed message is
    /// signed again and printed as hex.
    SignMessage {
        message: String,
        #[command(flatten)]
        secret: SecretArgs,
    },

    /// Verify a signed message and print the original text.
    VerifyMessage {
        /// Hex-encoded signed message.
        signed_message: String,
        /// Signer's public key.
        public_key: String,
        /// Second public key, for double-signed messages.
        #[arg(long)]
        second_public_key: Option<String>,
    },

    /// Encrypt a message for the holder of a public key.
    EncryptMessage {
        message: String,
        /// Recipient's public key.
        recipient_public_key: String,
        #[command(flatten)]
        secret: SecretArgs,
    },

    /// Decrypt a message sent to you.
    DecryptMessage {
        /// Hex-encoded ciphertext.
        encrypted_message: String,
        /// Hex-encoded 24-byte nonce.
        nonce: String,
        /// Sender's public key.
        sender_public_key: String,
        #[command(flatten)]
        secret: SecretArgs,
    },

    /// Build and sign a transaction, printing it as JSON.
    Create(CreateArgs),

    /// Check a signed transaction read from a JSON file (`-` for stdin).
    Verify {
        file: PathBuf,
        /// Second public key, required when the transaction carries a
        /// second signature.
        #[arg(long)]
        second_public_key: Option<String>,
    },

    /// Co-sign a pending multisignature transaction read from a JSON file.
    CoSign {
        file: PathBuf,
        #[command(flatten)]
        secret: SecretArgs,
        /// Send the signature to a node instead of only printing it.
        #[arg(long)]
        broadcast: bool,
    },

    /// Broadcast a signed transaction read from a JSON file (`-` for stdin).
    Broadcast { file: PathBuf },

    /// Look up an account.
    Account { address: String },

    /// Look up a confirmed transaction by id.
    Transaction { id: String },

    /// List delegates.
    Delegates {
        #[arg(long, default_value_t = 101)]
        limit: u32,
        /// List standby delegates instead of forging ones.
        #[arg(long)]
        standby: bool,
    },
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[command(subcommand)]
    pub kind: CreateKind,

    #[command(flatten)]
    pub secret: SecretArgs,

    /// Seconds added to the current time when stamping the transaction.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub time_offset: i32,

    /// Submit the transaction after printing it.
    #[arg(long)]
    pub broadcast: bool,
}

/// Transaction kinds. Amounts are in base units (1 LSK = 100000000).
#[derive(Subcommand, Debug, Clone)]
pub enum CreateKind {
    /// Send LSK.
    Transfer {
        recipient: String,
        amount: u64,
        /// UTF-8 memo attached to the transfer.
        #[arg(long)]
        data: Option<String>,
    },
    /// Register the second passphrase as a second signature.
    SecondSignature,
    /// Register as a delegate.
    Delegate { username: String },
    /// Vote for or unvote delegates by public key.
    Vote {
        #[arg(long = "add")]
        add: Vec<String>,
        #[arg(long = "remove")]
        remove: Vec<String>,
    },
    /// Turn the account into a multisignature account.
    Multisignature {
        /// Public keys of the co-signers.
        #[arg(long = "key", required = true)]
        keysgroup: Vec<String>,
        /// Hours a pending transaction waits for signatures.
        #[arg(long)]
        lifetime: u8,
        /// Signatures required.
        #[arg(long)]
        min: u8,
    },
    /// Register a dapp.
    Dapp {
        name: String,
        link: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        tags: Option<String>,
        #[arg(long)]
        icon: Option<String>,
        #[arg(long, default_value_t = 0)]
        dapp_type: i32,
        #[arg(long, default_value_t = 0)]
        category: i32,
    },
    /// Move LSK into a dapp.
    InTransfer { dapp_id: String, amount: u64 },
    /// Move LSK out of a dapp.
    OutTransfer {
        dapp_id: String,
        transaction_id: String,
        recipient: String,
        amount: u64,
    },
    /// A transfer from a multisignature account awaiting co-signatures.
    MultisignatureRequest {
        recipient: String,
        amount: u64,
        /// Requester's public key. Defaults to the sender's own.
        #[arg(long)]
        requester: Option<String>,
    },
}
