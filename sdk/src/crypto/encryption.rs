//! # Message Encryption
//!
//! Public-key authenticated encryption between two Lisk accounts, NaCl
//! `crypto_box` style (X25519 + XSalsa20-Poly1305).
//!
//! Accounts only own Ed25519 keys, so both sides convert first: the
//! sender's seed becomes a Curve25519 scalar, the recipient's public key
//! becomes a Montgomery point (see [`crate::crypto::convert`]). The shared
//! box is symmetric, so the recipient decrypts with their own passphrase
//! and the sender's public key.
//!
//! ## Nonces
//!
//! Every call draws a fresh 24-byte nonce from `OsRng` and returns it next
//! to the ciphertext. It is not secret. It must never repeat for the same
//! pair of keys, which random 192-bit nonces take care of.

use crate::config::NONCE_LENGTH;
use crate::crypto::convert::{convert_private_key_ed2curve, convert_public_key_ed2curve};
use crate::crypto::keys::{KeyError, Keypair, PublicKey};
use crypto_box::aead::generic_array::GenericArray;
use crypto_box::aead::Aead;
use crypto_box::SalsaBox;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors during encryption and decryption.
///
/// Decryption failures are deliberately a single variant: wrong key,
/// wrong nonce and tampered ciphertext all look the same to the caller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncryptionError {
    #[error("invalid public key: {0}")]
    InvalidPublicKey(#[from] KeyError),

    #[error("invalid nonce: expected 24 bytes, got {0}")]
    InvalidNonceLength(usize),

    #[error("encryption failed")]
    EncryptFailed,

    #[error("decryption failed: wrong key, wrong nonce, or corrupted ciphertext")]
    DecryptFailed,

    #[error("decrypted message is not valid UTF-8")]
    InvalidMessageEncoding,

    #[error("invalid hex in {0}")]
    InvalidHex(&'static str),
}

/// Ciphertext plus the nonce needed to open it, both hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptedMessage {
    pub nonce: String,
    pub encrypted_message: String,
}

fn salsa_box(own: &Keypair, their_public_key: &str) -> Result<SalsaBox, EncryptionError> {
    let their_key = PublicKey::from_hex(their_public_key)?;
    let their_curve = convert_public_key_ed2curve(their_key.as_bytes())?;
    let own_curve = convert_private_key_ed2curve(&own.seed());
    Ok(SalsaBox::new(
        &crypto_box::PublicKey::from(their_curve),
        &crypto_box::SecretKey::from(own_curve),
    ))
}

/// Encrypts `message` from the account behind `passphrase` to the holder
/// of `recipient_public_key`.
pub fn encrypt_message_with_secret(
    message: &str,
    passphrase: &str,
    recipient_public_key: &str,
) -> Result<EncryptedMessage, EncryptionError> {
    let sender = Keypair::from_passphrase(passphrase);
    let cipher = salsa_box(&sender, recipient_public_key)?;

    let mut nonce = [0u8; NONCE_LENGTH];
    OsRng.fill_bytes(&mut nonce);

    let ciphertext = cipher
        .encrypt(GenericArray::from_slice(&nonce), message.as_bytes())
        .map_err(|_| EncryptionError::EncryptFailed)?;

    Ok(EncryptedMessage {
        nonce: hex::encode(nonce),
        encrypted_message: hex::encode(ciphertext),
    })
}

/// Decrypts a message addressed to the account behind `passphrase`, sent
/// by the holder of `sender_public_key`.
pub fn decrypt_message_with_secret(
    encrypted_message: &str,
    nonce: &str,
    passphrase: &str,
    sender_public_key: &str,
) -> Result<String, EncryptionError> {
    let ciphertext = hex::decode(encrypted_message)
        .map_err(|_| EncryptionError::InvalidHex("encrypted message"))?;
    let nonce = hex::decode(nonce).map_err(|_| EncryptionError::InvalidHex("nonce"))?;
    if nonce.len() != NONCE_LENGTH {
        return Err(EncryptionError::InvalidNonceLength(nonce.len()));
    }

    let recipient = Keypair::from_passphrase(passphrase);
    let cipher = salsa_box(&recipient, sender_public_key)?;

    let plaintext = cipher
        .decrypt(GenericArray::from_slice(&nonce), ciphertext.as_slice())
        .map_err(|_| EncryptionError::DecryptFailed)?;

    String::from_utf8(plaintext).map_err(|_| EncryptionError::InvalidMessageEncoding)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SENDER: &str = "secret";
    const RECIPIENT: &str = "minute omit local rare sword knee banner pair rib museum shadow juice";

    fn public_key_of(passphrase: &str) -> String {
        Keypair::from_passphrase(passphrase).public_key_hex()
    }

    #[test]
    fn recipient_decrypts_what_sender_encrypted() {
        let encrypted =
            encrypt_message_with_secret("hello lisk", SENDER, &public_key_of(RECIPIENT)).unwrap();
        assert_eq!(encrypted.nonce.len(), NONCE_LENGTH * 2);

        let decrypted = decrypt_message_with_secret(
            &encrypted.encrypted_message,
            &encrypted.nonce,
            RECIPIENT,
            &public_key_of(SENDER),
        )
        .unwrap();
        assert_eq!(decrypted, "hello lisk");
    }

    #[test]
    fn each_call_uses_a_fresh_nonce() {
        let recipient = public_key_of(RECIPIENT);
        let a = encrypt_message_with_secret("same", SENDER, &recipient).unwrap();
        let b = encrypt_message_with_secret("same", SENDER, &recipient).unwrap();
        assert_ne!(a.nonce, b.nonce);
        assert_ne!(a.encrypted_message, b.encrypted_message);
    }

    #[test]
    fn third_party_cannot_decrypt() {
        let encrypted =
            encrypt_message_with_secret("private", SENDER, &public_key_of(RECIPIENT)).unwrap();
        let result = decrypt_message_with_secret(
            &encrypted.encrypted_message,
            &encrypted.nonce,
            "eavesdropper",
            &public_key_of(SENDER),
        );
        assert_eq!(result, Err(EncryptionError::DecryptFailed));
    }

    #[test]
    fn tampered_ciphertext_is_rejected() {
        let encrypted =
            encrypt_message_with_secret("private", SENDER, &public_key_of(RECIPIENT)).unwrap();
        let mut bytes = hex::decode(&encrypted.encrypted_message).unwrap();
        bytes[0] ^= 0x01;
        let result = decrypt_message_with_secret(
            &hex::encode(bytes),
            &encrypted.nonce,
            RECIPIENT,
            &public_key_of(SENDER),
        );
        assert_eq!(result, Err(EncryptionError::DecryptFailed));
    }

    #[test]
    fn rejects_short_nonce() {
        let result = decrypt_message_with_secret("00", "abcd", RECIPIENT, &public_key_of(SENDER));
        assert_eq!(result, Err(EncryptionError::InvalidNonceLength(2)));
    }

    #[test]
    fn rejects_bad_recipient_key() {
        let result = encrypt_message_with_secret("x", SENDER, "abcd");
        assert!(matches!(
            result,
            Err(EncryptionError::InvalidPublicKey(
                KeyError::InvalidPublicKeyLength { .. }
            ))
        ));
    }
}
