//! # Key Management
//!
//! Lisk accounts are brain wallets: the Ed25519 seed is simply
//! `SHA-256(passphrase)`. Anyone holding the passphrase holds the account,
//! so nothing in this module logs, prints or serializes secret material
//! unless explicitly asked to.
//!
//! Two shapes are exposed:
//!
//! - [`Keypair`] holds the live `ed25519_dalek::SigningKey` and does the
//!   actual signing. The dalek key zeroizes itself on drop.
//! - [`KeypairHex`] is the interop form: the NaCl-style 64-byte private key
//!   (`seed || public key`) and the 32-byte public key, both hex-encoded.

use crate::crypto::convert::address_from_public_key_bytes;
use crate::crypto::hash::sha256;
use ed25519_dalek::{Signature as DalekSignature, Signer, SigningKey, Verifier, VerifyingKey};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur while parsing or converting keys.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("invalid public key: expected {expected} bytes, got {actual}")]
    InvalidPublicKeyLength { expected: usize, actual: usize },

    #[error("invalid public key bytes: not a valid Ed25519 point")]
    InvalidPublicKey,

    #[error("key is not valid hex")]
    InvalidHex,
}

/// An Ed25519 keypair derived from a passphrase (or a raw seed).
pub struct Keypair {
    signing_key: SigningKey,
}

/// The public half of a keypair.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey {
    bytes: [u8; 32],
}

/// Hex-encoded keys in the layout every Lisk tool agrees on.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeypairHex {
    /// 64 bytes: seed followed by public key.
    pub private_key: String,
    pub public_key: String,
}

impl Keypair {
    /// Derives the keypair behind a passphrase. Deterministic: the same
    /// passphrase always yields the same account.
    pub fn from_passphrase(passphrase: &str) -> Self {
        Self::from_seed(&sha256(passphrase.as_bytes()))
    }

    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            bytes: self.public_key_bytes(),
        }
    }

    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public_key_bytes())
    }

    /// The 32-byte seed. Needed for Curve25519 conversion.
    ///
    /// **Secret.** Treat the return value like the passphrase itself.
    pub fn seed(&self) -> [u8; 32] {
        self.signing_key.to_bytes()
    }

    /// NaCl-style 64-byte secret key: `seed || public key`.
    pub fn private_key_bytes(&self) -> [u8; 64] {
        self.signing_key.to_keypair_bytes()
    }

    /// Detached Ed25519 signature over `message`.
    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        self.signing_key.sign(message).to_bytes()
    }

    /// The account address owned by this keypair.
    pub fn address(&self) -> String {
        address_from_public_key_bytes(&self.public_key_bytes())
    }

    pub fn to_hex(&self) -> KeypairHex {
        KeypairHex {
            private_key: hex::encode(self.private_key_bytes()),
            public_key: self.public_key_hex(),
        }
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Public key only. Never the seed.
        write!(f, "Keypair(pub={})", self.public_key_hex())
    }
}

impl fmt::Debug for KeypairHex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeypairHex")
            .field("private_key", &"<redacted>")
            .field("public_key", &self.public_key)
            .finish()
    }
}

/// Hex-encoded keys for a passphrase.
pub fn keys_from_passphrase(passphrase: &str) -> KeypairHex {
    Keypair::from_passphrase(passphrase).to_hex()
}

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

impl PublicKey {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// Parses a hex public key. Only the length is checked here; whether
    /// the bytes are a curve point is up to whoever uses the key.
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(hex_str).map_err(|_| KeyError::InvalidHex)?;
        let bytes: [u8; 32] =
            bytes
                .as_slice()
                .try_into()
                .map_err(|_| KeyError::InvalidPublicKeyLength {
                    expected: 32,
                    actual: bytes.len(),
                })?;
        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    pub fn address(&self) -> String {
        address_from_public_key_bytes(&self.bytes)
    }

    /// `true` when `signature` is a valid Ed25519 signature over `message`.
    /// Malformed keys simply fail verification.
    pub fn verify(&self, message: &[u8], signature: &[u8; 64]) -> bool {
        let Ok(verifying_key) = VerifyingKey::from_bytes(&self.bytes) else {
            return false;
        };
        verifying_key
            .verify(message, &DalekSignature::from_bytes(signature))
            .is_ok()
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET_PUBLIC_KEY: &str =
        "5d036a858ce89f844491762eb89e2bfbd50a4a0a0da658e4b2628b25b117ae09";

    #[test]
    fn derives_known_keys_from_passphrase() {
        let keys = keys_from_passphrase("secret");
        assert_eq!(keys.public_key, SECRET_PUBLIC_KEY);
        assert_eq!(
            keys.private_key,
            format!(
                "2bb80d537b1da3e38bd30361aa855686bde0eacd7162fef6a25fe97bf527a25b{SECRET_PUBLIC_KEY}"
            )
        );
    }

    #[test]
    fn derivation_is_deterministic() {
        let a = Keypair::from_passphrase("minute omit local rare sword");
        let b = Keypair::from_passphrase("minute omit local rare sword");
        assert_eq!(a.public_key(), b.public_key());
        assert_ne!(
            a.public_key(),
            Keypair::from_passphrase("another passphrase").public_key()
        );
    }

    #[test]
    fn address_of_secret() {
        assert_eq!(
            Keypair::from_passphrase("secret").address(),
            "18160565574430594874L"
        );
    }

    #[test]
    fn debug_output_hides_secrets() {
        let kp = Keypair::from_passphrase("secret");
        let debug = format!("{kp:?}");
        assert!(!debug.contains("2bb80d53"), "seed leaked: {debug}");
        let debug = format!("{:?}", kp.to_hex());
        assert!(!debug.contains("2bb80d53"), "seed leaked: {debug}");
        assert!(debug.contains(SECRET_PUBLIC_KEY));
    }

    #[test]
    fn sign_then_verify() {
        let kp = Keypair::from_passphrase("secret");
        let sig = kp.sign(b"payload");
        assert!(kp.public_key().verify(b"payload", &sig));
        assert!(!kp.public_key().verify(b"tampered", &sig));
    }

    #[test]
    fn public_key_from_hex_checks_length() {
        assert!(PublicKey::from_hex(SECRET_PUBLIC_KEY).is_ok());
        assert_eq!(
            PublicKey::from_hex(&format!("{SECRET_PUBLIC_KEY}00")),
            Err(KeyError::InvalidPublicKeyLength {
                expected: 32,
                actual: 33
            })
        );
        assert_eq!(PublicKey::from_hex("xyz"), Err(KeyError::InvalidHex));
    }

    #[test]
    fn keypair_hex_serializes_camel_case() {
        let json = serde_json::to_value(keys_from_passphrase("secret")).unwrap();
        assert_eq!(json["publicKey"], SECRET_PUBLIC_KEY);
        assert!(json.get("privateKey").is_some());
    }
}
