//! # Client Configuration & Protocol Constants
//!
//! Every fee, epoch and wire width the SDK relies on lives here. The node
//! validates transactions against exactly these values, so changing one
//! without a matching network upgrade just gets your transactions rejected.
//!
//! The second half of the file is runtime configuration: [`ClientOptions`]
//! describes which network and which peers a [`LiskClient`](crate::api::LiskClient)
//! talks to. It derives `serde` so the CLI can load it from a TOML file.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

// ---------------------------------------------------------------------------
// Units & Fees
// ---------------------------------------------------------------------------

/// One LSK expressed in base units. Every amount and fee is an integer
/// multiple of 10^-8 LSK.
pub const FIXED_POINT: u64 = 100_000_000;

/// Fee for a plain transfer (type 0). Also charged for in/out dapp transfers.
pub const FEE_SEND: u64 = FIXED_POINT / 10;

/// Fee for attaching a data payload to a transfer.
pub const FEE_DATA: u64 = FIXED_POINT / 10;

/// Fee for registering a second signature (type 1).
pub const FEE_SECOND_SIGNATURE: u64 = 5 * FIXED_POINT;

/// Fee for registering as a delegate (type 2).
pub const FEE_DELEGATE: u64 = 25 * FIXED_POINT;

/// Fee for casting votes (type 3).
pub const FEE_VOTE: u64 = FIXED_POINT;

/// Fee per participant for a multisignature registration (type 4). The
/// total is this value times `keysgroup.len() + 1`.
pub const FEE_MULTISIGNATURE: u64 = 5 * FIXED_POINT;

/// Fee for registering a dapp (type 5).
pub const FEE_DAPP: u64 = 25 * FIXED_POINT;

// ---------------------------------------------------------------------------
// Epoch
// ---------------------------------------------------------------------------

/// The Lisk epoch: 2016-05-24T17:00:00Z. Transaction timestamps count whole
/// seconds since this instant, not since the Unix epoch.
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2016, 5, 24, 17, 0, 0)
        .single()
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Wire Widths
// ---------------------------------------------------------------------------

pub const PUBLIC_KEY_LENGTH: usize = 32;
pub const SIGNATURE_LENGTH: usize = 64;
pub const RECIPIENT_LENGTH: usize = 8;
pub const AMOUNT_LENGTH: usize = 8;
pub const TIMESTAMP_LENGTH: usize = 4;
pub const NONCE_LENGTH: usize = 24;

/// Fixed-size prefix of every transaction's byte encoding:
/// type + timestamp + sender key + recipient + amount.
pub const TRANSACTION_HEADER_LENGTH: usize =
    1 + TIMESTAMP_LENGTH + PUBLIC_KEY_LENGTH + RECIPIENT_LENGTH + AMOUNT_LENGTH;

// ---------------------------------------------------------------------------
// Networks
// ---------------------------------------------------------------------------

/// Nethash of the Lisk mainnet genesis block.
pub const MAINNET_NETHASH: &str =
    "ed14889723f24ecc54871d058d98ce91ff2f973192075c0155ba2b7b70ad2511";

/// Nethash of the Lisk testnet genesis block.
pub const TESTNET_NETHASH: &str =
    "da3ed6a45429278bac2666961289ca17ad86595d33b31037615d4b8e8f158bba";

pub const MAINNET_PORT: u16 = 8000;
pub const TESTNET_PORT: u16 = 7000;
pub const SSL_PORT: u16 = 443;

/// Value of the `os` header peers expect from API clients.
pub const CLIENT_OS: &str = "lisk-js-api";

/// Client version advertised in the `version` header.
pub const CLIENT_VERSION: &str = "1.0.0";

/// Minimum node version we are willing to talk to.
pub const CLIENT_MIN_VERSION: &str = ">=0.5.0";

pub const DEFAULT_MAINNET_PEERS: &[&str] = &[
    "node01.lisk.io",
    "node02.lisk.io",
    "node03.lisk.io",
    "node04.lisk.io",
    "node05.lisk.io",
    "node06.lisk.io",
    "node07.lisk.io",
    "node08.lisk.io",
];

pub const DEFAULT_TESTNET_PEERS: &[&str] = &["testnet.lisk.io"];

// ---------------------------------------------------------------------------
// Retry Policy
// ---------------------------------------------------------------------------

/// How long to wait before re-dialing after a peer failed.
pub const REDIAL_DELAY: Duration = Duration::from_secs(1);

/// Seconds the timestamp is shifted back on each "timestamp is in the
/// future" rejection.
pub const TIME_OFFSET_STEP: i32 = 10;

/// Once the accumulated shift exceeds this many seconds, we stop retrying
/// and surface the node's rejection.
pub const MAX_TIME_OFFSET: i32 = 40;

/// The message a node answers with when our clock runs ahead of its own.
pub const TIMESTAMP_IN_FUTURE_MESSAGE: &str = "Timestamp is in the future";

// ---------------------------------------------------------------------------
// Runtime Options
// ---------------------------------------------------------------------------

/// Where transactions are submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiRoute {
    /// `POST /peer/transactions` with nethash headers. This is what a
    /// light client normally talks to.
    #[default]
    Peer,
    /// `PUT /api/transactions` on a node's public HTTP API.
    Public,
}

/// Connection settings for a [`LiskClient`](crate::api::LiskClient).
///
/// Everything has a default, so an empty TOML table is a valid mainnet
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ClientOptions {
    /// Talk to the testnet instead of mainnet.
    pub testnet: bool,
    /// Use HTTPS. Changes the default port to 443.
    pub ssl: bool,
    /// Pick a random peer per request and fail over to another on error.
    pub random_peer: bool,
    /// Explicit node host. When set, it is dialed first.
    pub node: Option<String>,
    /// Explicit port. Falls back to the network default when absent.
    pub port: Option<u16>,
    /// Custom nethash for private networks.
    pub nethash: Option<String>,
    /// Peer hosts to choose from. Empty means "use the network defaults".
    pub peers: Vec<String>,
    /// Peers never to dial.
    pub banned_peers: Vec<String>,
    /// Submission route for transactions.
    pub route: ApiRoute,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            testnet: false,
            ssl: false,
            random_peer: true,
            node: None,
            port: None,
            nethash: None,
            peers: Vec::new(),
            banned_peers: Vec::new(),
            route: ApiRoute::Peer,
        }
    }
}

impl ClientOptions {
    /// Port to dial: explicit, else 7000 on testnet, 443 with SSL, 8000 otherwise.
    pub fn effective_port(&self) -> u16 {
        if let Some(port) = self.port {
            return port;
        }
        if self.testnet {
            TESTNET_PORT
        } else if self.ssl {
            SSL_PORT
        } else {
            MAINNET_PORT
        }
    }

    /// Nethash sent with peer requests.
    pub fn effective_nethash(&self) -> &str {
        match &self.nethash {
            Some(custom) => custom,
            None if self.testnet => TESTNET_NETHASH,
            None => MAINNET_NETHASH,
        }
    }

    /// The peer list to choose from. An explicit list wins; otherwise the
    /// network defaults (SSL reuses the mainnet hosts).
    pub fn effective_peers(&self) -> Vec<String> {
        if !self.peers.is_empty() {
            return self.peers.clone();
        }
        let defaults = if self.testnet {
            DEFAULT_TESTNET_PEERS
        } else {
            DEFAULT_MAINNET_PEERS
        };
        defaults.iter().map(|p| p.to_string()).collect()
    }

    pub fn scheme(&self) -> &'static str {
        if self.ssl {
            "https"
        } else {
            "http"
        }
    }
}
