//! Peer selection and banning.
//!
//! The selector owns the candidate list for one client. A failed peer is
//! banned for the lifetime of the selector and a fresh one is drawn at
//! random from whoever is left.

use rand::seq::SliceRandom;
use tracing::debug;

use crate::config::{ClientOptions, MAINNET_NETHASH, TESTNET_NETHASH};

#[derive(Debug, Clone)]
pub struct PeerSelector {
    peers: Vec<String>,
    banned: Vec<String>,
    current: Option<String>,
    random_peer: bool,
    /// False for a custom nethash that names neither public network; such
    /// clients stay on the node they were given.
    known_network: bool,
}

impl PeerSelector {
    pub fn new(options: &ClientOptions) -> Self {
        let known_network = match options.nethash.as_deref() {
            None => true,
            Some(hash) => hash == MAINNET_NETHASH || hash == TESTNET_NETHASH,
        };
        // A testnet nethash without the testnet flag still means testnet peers.
        let mut effective = options.clone();
        if options.nethash.as_deref() == Some(TESTNET_NETHASH) {
            effective.testnet = true;
        }

        let mut selector = Self {
            peers: effective.effective_peers(),
            banned: options.banned_peers.clone(),
            current: None,
            random_peer: options.random_peer,
            known_network,
        };
        selector.current = match &options.node {
            Some(node) => Some(node.clone()),
            None => selector.pick(),
        };
        selector
    }

    /// The peer requests currently go to.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn peers(&self) -> &[String] {
        &self.peers
    }

    pub fn banned(&self) -> &[String] {
        &self.banned
    }

    pub fn is_banned(&self, peer: &str) -> bool {
        self.banned.iter().any(|b| b == peer)
    }

    /// Peers that are neither banned nor the current one.
    pub fn alternatives(&self) -> impl Iterator<Item = &String> {
        self.peers
            .iter()
            .filter(move |p| !self.is_banned(p) && Some(p.as_str()) != self.current())
    }

    /// Whether a failed request may be retried on another peer.
    pub fn can_redial(&self) -> bool {
        self.random_peer && self.known_network && self.alternatives().next().is_some()
    }

    /// Bans the current peer and clears it.
    pub fn ban_current(&mut self) {
        if let Some(peer) = self.current.take() {
            debug!(peer = %peer, "banning peer");
            if !self.is_banned(&peer) {
                self.banned.push(peer);
            }
        }
    }

    /// Draws a new current peer from the unbanned ones.
    pub fn select(&mut self) -> Option<&str> {
        self.current = self.pick();
        self.current()
    }

    fn pick(&self) -> Option<String> {
        let candidates: Vec<&String> = self.peers.iter().filter(|p| !self.is_banned(p)).collect();
        candidates
            .choose(&mut rand::thread_rng())
            .map(|p| (*p).clone())
    }
}
