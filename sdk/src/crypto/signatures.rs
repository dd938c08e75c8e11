//! # Digital Signatures
//!
//! Two unrelated things get signed in Lisk, and this module covers the
//! primitive both rely on plus the first of them:
//!
//! 1. **Plain messages.** A signed message is NaCl `crypto_sign` output:
//!    the 64-byte signature followed by the message itself, hex-encoded.
//!    Signing with two secrets wraps that blob again with the second key, so
//!    opening it goes outer (second key) first, inner (first key) second.
//! 2. **Transactions.** Handled in [`crate::transaction::signing`], which
//!    signs the SHA-256 digest of the transaction bytes through a
//!    [`SignatureProvider`].
//!
//! ## Why a provider trait?
//!
//! The transaction pipeline never calls ed25519-dalek directly. It is handed
//! a provider, which keeps the primitive swappable in tests (count the
//! signatures a builder produces, force verification failures) without any
//! process-wide state.

use crate::crypto::keys::{Keypair, PublicKey};
use crate::config::{PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH};
use std::fmt;
use thiserror::Error;

/// Which key of a (possibly double) signature a failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRole {
    /// The account's own key. For single-key checks, the only key.
    First,
    /// The second-signature key.
    Second,
}

impl fmt::Display for KeyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => f.write_str("first"),
            Self::Second => f.write_str("second"),
        }
    }
}

/// Errors during signature operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("invalid {role} public key: expected 32 bytes, got {actual}")]
    InvalidPublicKeyLength { role: KeyRole, actual: usize },

    #[error("invalid signature for {role} public key, cannot verify message")]
    InvalidSignature { role: KeyRole },

    #[error("signed message is not valid UTF-8")]
    InvalidMessageEncoding,

    #[error("transaction carries no signature")]
    MissingSignature,

    #[error("transaction has a second signature but no second public key was supplied")]
    MissingSecondPublicKey,

    #[error("invalid hex in {0}")]
    InvalidHex(&'static str),
}

// ---------------------------------------------------------------------------
// Provider
// ---------------------------------------------------------------------------

/// The signing primitive used by the transaction pipeline.
pub trait SignatureProvider: Send + Sync {
    /// Detached signature of `message` under `keypair`.
    fn sign(&self, keypair: &Keypair, message: &[u8]) -> [u8; 64];

    /// `true` when `signature` over `message` verifies under `public_key`.
    fn verify(&self, public_key: &PublicKey, message: &[u8], signature: &[u8; 64]) -> bool;
}

/// Plain Ed25519 via ed25519-dalek. What every production caller wants.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Provider;

impl SignatureProvider for Ed25519Provider {
    fn sign(&self, keypair: &Keypair, message: &[u8]) -> [u8; 64] {
        keypair.sign(message)
    }

    fn verify(&self, public_key: &PublicKey, message: &[u8], signature: &[u8; 64]) -> bool {
        public_key.verify(message, signature)
    }
}

impl<P: SignatureProvider + ?Sized> SignatureProvider for &P {
    fn sign(&self, keypair: &Keypair, message: &[u8]) -> [u8; 64] {
        (**self).sign(keypair, message)
    }

    fn verify(&self, public_key: &PublicKey, message: &[u8], signature: &[u8; 64]) -> bool {
        (**self).verify(public_key, message, signature)
    }
}

// ---------------------------------------------------------------------------
// Message signing
// ---------------------------------------------------------------------------

/// `signature || message`, NaCl `crypto_sign` layout.
fn seal(keypair: &Keypair, message: &[u8]) -> Vec<u8> {
    let mut signed = Vec::with_capacity(SIGNATURE_LENGTH + message.len());
    signed.extend_from_slice(&keypair.sign(message));
    signed.extend_from_slice(message);
    signed
}

/// Inverse of [`seal`]: the embedded message if the signature checks out.
fn open<'a>(signed: &'a [u8], public_key: &PublicKey) -> Option<&'a [u8]> {
    if signed.len() < SIGNATURE_LENGTH {
        return None;
    }
    let (signature, message) = signed.split_at(SIGNATURE_LENGTH);
    let signature: &[u8; 64] = signature.try_into().ok()?;
    public_key.verify(message, signature).then_some(message)
}

/// Malformed hex is reported as a length error: decoding stops at the first
/// bad pair, and whatever was read before it is the key's length. A
/// 63-character key is therefore 31 bytes long, not "invalid hex".
fn parse_public_key(hex_str: &str, role: KeyRole) -> Result<PublicKey, SignatureError> {
    let bytes: Vec<u8> = hex_str
        .as_bytes()
        .chunks(2)
        .map_while(|pair| hex::decode(pair).ok().and_then(|b| b.first().copied()))
        .collect();
    let bytes: [u8; PUBLIC_KEY_LENGTH] =
        bytes
            .as_slice()
            .try_into()
            .map_err(|_| SignatureError::InvalidPublicKeyLength {
                role,
                actual: bytes.len(),
            })?;
    Ok(PublicKey::from_bytes(bytes))
}

/// Signs `message` with the keypair behind `passphrase`.
/// Returns hex of `signature || message`.
pub fn sign_message_with_secret(message: &str, passphrase: &str) -> String {
    hex::encode(seal(&Keypair::from_passphrase(passphrase), message.as_bytes()))
}

/// Signs `message` with the first passphrase, then signs that whole signed
/// blob again with the second passphrase.
pub fn sign_message_with_two_secrets(
    message: &str,
    passphrase: &str,
    second_passphrase: &str,
) -> String {
    let inner = seal(&Keypair::from_passphrase(passphrase), message.as_bytes());
    let outer = seal(&Keypair::from_passphrase(second_passphrase), &inner);
    hex::encode(outer)
}

/// Verifies a singly signed message and returns the original text.
pub fn verify_message_with_public_key(
    signed_message: &str,
    public_key: &str,
) -> Result<String, SignatureError> {
    let signed =
        hex::decode(signed_message).map_err(|_| SignatureError::InvalidHex("signed message"))?;
    let public_key = parse_public_key(public_key, KeyRole::First)?;

    let message = open(&signed, &public_key).ok_or(SignatureError::InvalidSignature {
        role: KeyRole::First,
    })?;
    String::from_utf8(message.to_vec()).map_err(|_| SignatureError::InvalidMessageEncoding)
}

/// Verifies a message signed with two secrets and returns the original text.
///
/// Both key lengths are checked before any cryptography runs. Then the
/// outer layer is opened with `second_public_key` and the inner layer
/// with `public_key`, in that order.
pub fn verify_message_with_two_public_keys(
    signed_message: &str,
    public_key: &str,
    second_public_key: &str,
) -> Result<String, SignatureError> {
    let signed =
        hex::decode(signed_message).map_err(|_| SignatureError::InvalidHex("signed message"))?;
    let first_key = parse_public_key(public_key, KeyRole::First)?;
    let second_key = parse_public_key(second_public_key, KeyRole::Second)?;

    // Stage 1: outer layer, second signer.
    let inner = open(&signed, &second_key).ok_or(SignatureError::InvalidSignature {
        role: KeyRole::Second,
    })?;

    // Stage 2: inner layer, first signer.
    let message = open(inner, &first_key).ok_or(SignatureError::InvalidSignature {
        role: KeyRole::First,
    })?;

    String::from_utf8(message.to_vec()).map_err(|_| SignatureError::InvalidMessageEncoding)
}

// ---------------------------------------------------------------------------
// Armored output
// ---------------------------------------------------------------------------

/// Renders a signed message as a copy-pasteable text block.
pub fn print_signed_message(message: &str, signed_message: &str, public_key: &str) -> String {
    [
        "-----BEGIN LISK SIGNED MESSAGE-----",
        "-----MESSAGE-----",
        message,
        "-----PUBLIC KEY-----",
        public_key,
        "-----SIGNATURE-----",
        signed_message,
        "-----END LISK SIGNED MESSAGE-----",
    ]
    .join("\n")
}

/// Signs `message` and renders the armored block in one go.
pub fn sign_and_print_message(message: &str, passphrase: &str) -> String {
    let public_key = Keypair::from_passphrase(passphrase).public_key_hex();
    let signed = sign_message_with_secret(message, passphrase);
    print_signed_message(message, &signed, &public_key)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "minute omit local rare sword knee banner pair rib museum shadow juice";
    const SECOND_SECRET: &str = "second secret";
    const PUBLIC_KEY: &str = "7ef45cd525e95b7a86244bbd4eb4550914ad06301013958f4dd64d32ef7bc588";
    const SECOND_PUBLIC_KEY: &str =
        "0401c8ac9f29ded9e1e4d5b6b43051cb25b22f27c7b7b35092161e851946f82f";
    const MESSAGE: &str = "Some default text.";
    const SIGNATURE: &str = "974eeac2c7e7d9da42aa273c8caae8e6eb766fa29a31b37732f22e6d2e61e8402106849e61e3551ff70d7d359170a6198669e1061b6b4aa61997e26b87e3a704";
    const MESSAGE_HEX: &str = "536f6d652064656661756c7420746578742e";
    const OUTER_SIGNATURE: &str = "725de8389b97c6c0a0367f47e5817cac0e8fcc107d7b73c3ce8013309de3b838db890ad241e68fe3f5df7ca3acf1403acc33494a19665a27eb4ac4d8b70d7102";

    fn signed() -> String {
        format!("{SIGNATURE}{MESSAGE_HEX}")
    }

    fn double_signed() -> String {
        format!("{OUTER_SIGNATURE}{SIGNATURE}{MESSAGE_HEX}")
    }

    #[test]
    fn signs_message_with_known_signature() {
        assert_eq!(sign_message_with_secret(MESSAGE, SECRET), signed());
    }

    #[test]
    fn verifies_and_recovers_message() {
        assert_eq!(
            verify_message_with_public_key(&signed(), PUBLIC_KEY).unwrap(),
            MESSAGE
        );
    }

    #[test]
    fn rejects_padded_public_key_before_checking_signature() {
        let err = verify_message_with_public_key(&signed(), &format!("{PUBLIC_KEY}00"));
        assert_eq!(
            err,
            Err(SignatureError::InvalidPublicKeyLength {
                role: KeyRole::First,
                actual: 33
            })
        );
    }

    #[test]
    fn malformed_public_key_hex_is_a_length_error() {
        let corrupted = format!("{}zz{}", &PUBLIC_KEY[..20], &PUBLIC_KEY[22..]);
        let cases: [(&str, usize); 4] = [
            (&PUBLIC_KEY[..63], 31),
            ("", 0),
            ("zz", 0),
            (corrupted.as_str(), 10),
        ];
        for (key, actual) in cases {
            assert_eq!(
                verify_message_with_public_key(&signed(), key),
                Err(SignatureError::InvalidPublicKeyLength {
                    role: KeyRole::First,
                    actual
                }),
                "{key}"
            );
        }
        let odd = &SECOND_PUBLIC_KEY[..63];
        assert_eq!(
            verify_message_with_two_public_keys(&double_signed(), PUBLIC_KEY, odd),
            Err(SignatureError::InvalidPublicKeyLength {
                role: KeyRole::Second,
                actual: 31
            })
        );
    }

    #[test]
    fn rejects_wrong_public_key() {
        let err = verify_message_with_public_key(&signed(), SECOND_PUBLIC_KEY);
        assert_eq!(
            err,
            Err(SignatureError::InvalidSignature {
                role: KeyRole::First
            })
        );
    }

    #[test]
    fn rejects_truncated_signed_message() {
        assert!(matches!(
            verify_message_with_public_key("abcd", PUBLIC_KEY),
            Err(SignatureError::InvalidSignature { .. })
        ));
    }

    #[test]
    fn two_secrets_wrap_outer_around_inner() {
        assert_eq!(
            sign_message_with_two_secrets(MESSAGE, SECRET, SECOND_SECRET),
            double_signed()
        );
    }

    #[test]
    fn verifies_two_secret_message() {
        let message =
            verify_message_with_two_public_keys(&double_signed(), PUBLIC_KEY, SECOND_PUBLIC_KEY)
                .unwrap();
        assert_eq!(message, MESSAGE);
    }

    #[test]
    fn swapped_keys_fail_on_the_outer_layer() {
        let err =
            verify_message_with_two_public_keys(&double_signed(), SECOND_PUBLIC_KEY, PUBLIC_KEY);
        assert_eq!(
            err,
            Err(SignatureError::InvalidSignature {
                role: KeyRole::Second
            })
        );
    }

    #[test]
    fn wrong_first_key_fails_on_the_inner_layer() {
        let other = Keypair::from_passphrase("secret").public_key_hex();
        let err = verify_message_with_two_public_keys(&double_signed(), &other, SECOND_PUBLIC_KEY);
        assert_eq!(
            err,
            Err(SignatureError::InvalidSignature {
                role: KeyRole::First
            })
        );
    }

    #[test]
    fn two_key_length_checks_precede_crypto() {
        let padded = format!("{PUBLIC_KEY}0000");
        assert_eq!(
            verify_message_with_two_public_keys(&double_signed(), &padded, SECOND_PUBLIC_KEY),
            Err(SignatureError::InvalidPublicKeyLength {
                role: KeyRole::First,
                actual: 34
            })
        );
        let padded = format!("{SECOND_PUBLIC_KEY}00");
        assert_eq!(
            verify_message_with_two_public_keys(&double_signed(), PUBLIC_KEY, &padded),
            Err(SignatureError::InvalidPublicKeyLength {
                role: KeyRole::Second,
                actual: 33
            })
        );
    }

    #[test]
    fn prints_armored_block() {
        let printed = sign_and_print_message(MESSAGE, SECRET);
        let expected = format!(
            "-----BEGIN LISK SIGNED MESSAGE-----\n-----MESSAGE-----\n{MESSAGE}\n-----PUBLIC KEY-----\n{PUBLIC_KEY}\n-----SIGNATURE-----\n{}\n-----END LISK SIGNED MESSAGE-----",
            signed()
        );
        assert_eq!(printed, expected);
    }

    #[test]
    fn provider_delegates_to_dalek() {
        let kp = Keypair::from_passphrase(SECRET);
        let provider = Ed25519Provider;
        let sig = provider.sign(&kp, b"abc");
        assert!(provider.verify(&kp.public_key(), b"abc", &sig));
        assert!(!provider.verify(&kp.public_key(), b"abd", &sig));
    }
}
