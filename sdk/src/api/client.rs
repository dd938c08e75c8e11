//! # Lisk Client
//!
//! [`LiskClient`] ties the pieces together: a [`PeerSelector`] decides where
//! a request goes, [`prepare`] shapes it, and a [`Transport`] moves it.
//!
//! ## Failure Handling
//!
//! - **Peer failure**: when the transport errors and another peer is
//!   available, the client waits [`REDIAL_DELAY`], bans the failed peer,
//!   draws a new one and re-sends. Without alternatives the transport
//!   error is returned as is.
//! - **Clock skew**: when a node rejects a submission because its
//!   timestamp lies in the future, the transaction is rebuilt
//!   [`TIME_OFFSET_STEP`] seconds earlier, until the accumulated shift
//!   exceeds [`MAX_TIME_OFFSET`].
//!
//! The transport is a trait so tests can script responses and the CLI can
//! plug in `reqwest`.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::{
    ClientOptions, MAX_TIME_OFFSET, REDIAL_DELAY, TIMESTAMP_IN_FUTURE_MESSAGE, TIME_OFFSET_STEP,
};
use crate::crypto::{Ed25519Provider, SignatureProvider};
use crate::time::{EpochClock, SystemClock};
use crate::transaction::{Secrets, Transaction, TransactionBuilder, TransactionError};

use super::error::{ApiError, TransportError};
use super::peers::PeerSelector;
use super::request::{base_url, prepare, PreparedRequest, RequestKind};

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// Moves one prepared request to a node and returns the decoded JSON body.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: PreparedRequest) -> Result<Value, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn send(&self, request: PreparedRequest) -> Result<Value, TransportError> {
        (**self).send(request).await
    }
}

// ---------------------------------------------------------------------------
// Request Context
// ---------------------------------------------------------------------------

/// Per-call settings threaded through a submission. Retries derive a new
/// context instead of mutating the old one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RequestContext {
    time_offset: i32,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds added to the clock when stamping transactions.
    pub fn time_offset(&self) -> i32 {
        self.time_offset
    }

    pub fn with_time_offset(&self, time_offset: i32) -> Self {
        Self { time_offset }
    }

    /// The context for the next clock-skew retry, or `None` once the
    /// timestamp has been pulled back more than [`MAX_TIME_OFFSET`] seconds.
    pub fn skew_retry(&self) -> Option<Self> {
        if -self.time_offset > MAX_TIME_OFFSET {
            return None;
        }
        Some(self.with_time_offset(self.time_offset - TIME_OFFSET_STEP))
    }
}

/// True for a `success: false` response complaining about our timestamp.
pub fn is_timestamp_in_future(response: &Value) -> bool {
    if response.get("success") != Some(&Value::Bool(false)) {
        return false;
    }
    ["message", "error"].iter().any(|field| {
        response
            .get(field)
            .and_then(Value::as_str)
            .is_some_and(|m| m.contains(TIMESTAMP_IN_FUTURE_MESSAGE))
    })
}

/// Turns a `success: false` body into [`ApiError::Rejected`].
pub fn check_success(response: Value) -> Result<Value, ApiError> {
    if response.get("success") == Some(&Value::Bool(false)) {
        let message = ["message", "error"]
            .iter()
            .find_map(|field| response.get(field).and_then(Value::as_str))
            .unwrap_or("no reason given")
            .to_string();
        return Err(ApiError::Rejected(message));
    }
    Ok(response)
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

pub struct LiskClient<T, P = Ed25519Provider, C = SystemClock> {
    options: ClientOptions,
    transport: T,
    peers: Mutex<PeerSelector>,
    builder: TransactionBuilder<P, C>,
    redial_delay: Duration,
}

impl<T: Transport> LiskClient<T> {
    pub fn new(options: ClientOptions, transport: T) -> Self {
        Self::with_builder(options, transport, TransactionBuilder::new())
    }
}

impl<T, P, C> LiskClient<T, P, C>
where
    T: Transport,
    P: SignatureProvider,
    C: EpochClock,
{
    pub fn with_builder(
        options: ClientOptions,
        transport: T,
        builder: TransactionBuilder<P, C>,
    ) -> Self {
        let peers = PeerSelector::new(&options);
        info!(
            peer = peers.current().unwrap_or("<none>"),
            candidates = peers.peers().len(),
            nethash = options.effective_nethash(),
            "lisk client ready"
        );
        Self {
            options,
            transport,
            peers: Mutex::new(peers),
            builder,
            redial_delay: REDIAL_DELAY,
        }
    }

    /// Overrides the pause before re-dialing a new peer.
    pub fn with_redial_delay(mut self, delay: Duration) -> Self {
        self.redial_delay = delay;
        self
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub fn builder(&self) -> &TransactionBuilder<P, C> {
        &self.builder
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn current_peer(&self) -> Option<String> {
        self.peers.lock().current().map(str::to_owned)
    }

    pub fn banned_peers(&self) -> Vec<String> {
        self.peers.lock().banned().to_vec()
    }

    /// Sends one request, failing over to other peers on transport errors.
    ///
    /// Node-side actions resolve to `{"success": true, "done": "done"}`
    /// without touching the network.
    pub async fn send(&self, kind: &RequestKind) -> Result<Value, ApiError> {
        if let RequestKind::NoAction(action) = kind {
            debug!(?action, "node-side action, nothing to send");
            return Ok(json!({ "success": true, "done": "done" }));
        }

        loop {
            let peer = self.current_peer().ok_or(ApiError::NoPeersAvailable)?;
            let base = base_url(&peer, &self.options)?;
            let Some(request) = prepare(kind, &base, &self.options)? else {
                return Ok(json!({ "success": true, "done": "done" }));
            };
            debug!(method = %request.method, url = %request.url, "dispatching request");

            let err = match self.transport.send(request).await {
                Ok(body) => return Ok(body),
                Err(err) => err,
            };

            if !self.peers.lock().can_redial() {
                warn!(peer = %peer, error = %err, "request failed, no peers left to try");
                return Err(err.into());
            }
            warn!(peer = %peer, error = %err, "request failed, re-dialing another peer");
            tokio::time::sleep(self.redial_delay).await;
            let next = {
                let mut peers = self.peers.lock();
                peers.ban_current();
                peers.select().map(str::to_owned)
            };
            debug!(peer = next.as_deref().unwrap_or("<none>"), "selected new peer");
        }
    }

    /// Builds a transaction with `build`, submits it, and rebuilds it
    /// further in the past while the node reports its timestamp as being
    /// in the future.
    pub async fn submit_with_retry<F>(
        &self,
        context: RequestContext,
        build: F,
    ) -> Result<Value, ApiError>
    where
        F: Fn(&TransactionBuilder<P, C>, &RequestContext) -> Result<Transaction, TransactionError>
            + Send
            + Sync,
    {
        let mut context = context;
        loop {
            let tx = build(&self.builder, &context)?;
            let response = self
                .send(&RequestKind::SubmitTransaction(Box::new(tx)))
                .await?;
            if is_timestamp_in_future(&response) {
                if let Some(next) = context.skew_retry() {
                    warn!(
                        time_offset = next.time_offset(),
                        "node clock behind ours, restamping transaction"
                    );
                    context = next;
                    continue;
                }
            }
            return check_success(response);
        }
    }

    // -----------------------------------------------------------------------
    // Submission
    // -----------------------------------------------------------------------

    /// Broadcasts an already signed transaction.
    pub async fn broadcast_signed_transaction(&self, tx: &Transaction) -> Result<Value, ApiError> {
        let response = self
            .send(&RequestKind::SubmitTransaction(Box::new(tx.clone())))
            .await?;
        check_success(response)
    }

    /// Broadcasts one co-signature of a pending multisignature transaction.
    pub async fn broadcast_signature(
        &self,
        transaction_id: &str,
        signature: &str,
    ) -> Result<Value, ApiError> {
        let response = self
            .send(&RequestKind::SubmitSignature {
                transaction_id: transaction_id.to_string(),
                signature: signature.to_string(),
            })
            .await?;
        check_success(response)
    }

    /// Builds, signs and submits a transfer of `amount` base units.
    pub async fn send_lsk(
        &self,
        secrets: &Secrets<'_>,
        recipient_id: &str,
        amount: u64,
        context: RequestContext,
    ) -> Result<Value, ApiError> {
        self.submit_with_retry(context, |builder, ctx| {
            builder.transfer(secrets, recipient_id, amount, None, ctx.time_offset())
        })
        .await
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    async fn query(&self, path: &str, params: &[(&str, String)]) -> Result<Value, ApiError> {
        let kind = RequestKind::query(path, params.iter().map(|(k, v)| (*k, v.clone())));
        self.send(&kind).await
    }

    pub async fn get_account(&self, address: &str) -> Result<Value, ApiError> {
        self.query("accounts", &[("address", address.into())]).await
    }

    pub async fn get_balance(&self, address: &str) -> Result<Value, ApiError> {
        self.query("accounts/getBalance", &[("address", address.into())])
            .await
    }

    pub async fn list_active_delegates(&self, limit: u32) -> Result<Value, ApiError> {
        self.query("delegates", &[("limit", limit.to_string())]).await
    }

    /// Delegates ranked below the 101 forging slots.
    pub async fn list_standby_delegates(&self, limit: u32) -> Result<Value, ApiError> {
        self.query(
            "delegates",
            &[
                ("limit", limit.to_string()),
                ("orderBy", "rate:asc".into()),
                ("offset", "101".into()),
            ],
        )
        .await
    }

    pub async fn search_delegate_by_username(&self, username: &str) -> Result<Value, ApiError> {
        self.query("delegates/search", &[("q", username.into())])
            .await
    }

    pub async fn list_blocks(&self, limit: u32) -> Result<Value, ApiError> {
        self.query("blocks", &[("limit", limit.to_string())]).await
    }

    pub async fn list_forged_blocks(&self, generator_public_key: &str) -> Result<Value, ApiError> {
        self.query(
            "blocks",
            &[("generatorPublicKey", generator_public_key.into())],
        )
        .await
    }

    pub async fn get_block(&self, height: u64) -> Result<Value, ApiError> {
        self.query("blocks", &[("height", height.to_string())]).await
    }

    /// Transactions sent from or to `address`, newest first.
    pub async fn list_transactions(
        &self,
        address: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Value, ApiError> {
        self.query(
            "transactions",
            &[
                ("senderId", address.into()),
                ("recipientId", address.into()),
                ("limit", limit.to_string()),
                ("offset", offset.to_string()),
                ("orderBy", "timestamp:desc".into()),
            ],
        )
        .await
    }

    pub async fn get_transaction(&self, id: &str) -> Result<Value, ApiError> {
        self.query("transactions/get", &[("id", id.into())]).await
    }

    pub async fn list_votes(&self, address: &str) -> Result<Value, ApiError> {
        self.query("accounts/delegates", &[("address", address.into())])
            .await
    }

    pub async fn list_voters(&self, public_key: &str) -> Result<Value, ApiError> {
        self.query("delegates/voters", &[("publicKey", public_key.into())])
            .await
    }

    pub async fn list_multisignature_transactions(&self) -> Result<Value, ApiError> {
        self.query("transactions/multisignatures", &[]).await
    }

    pub async fn get_multisignature_transaction(&self, id: &str) -> Result<Value, ApiError> {
        self.query("transactions/multisignatures/get", &[("id", id.into())])
            .await
    }
}
