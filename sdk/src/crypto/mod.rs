//! # Cryptographic Primitives
//!
//! Hashing, key derivation, message signing and message encryption. All of
//! it is boring on purpose:
//!
//! - **SHA-256** for key seeds, addresses, ids and transaction digests.
//! - **Ed25519** (ed25519-dalek) for every signature.
//! - **Curve25519 + XSalsa20-Poly1305** (crypto_box) for encrypted messages.
//!
//! Nothing here talks to the network or keeps state between calls.

pub mod convert;
pub mod encryption;
pub mod hash;
pub mod keys;
pub mod signatures;

// The short paths people actually reach for.
pub use convert::{
    address_from_public_key, address_from_public_key_bytes, buffer_to_hex,
    convert_private_key_ed2curve, convert_public_key_ed2curve, first_eight_bytes_reversed,
    hex_to_buffer, to_address,
};
pub use encryption::{
    decrypt_message_with_secret, encrypt_message_with_secret, EncryptedMessage, EncryptionError,
};
pub use hash::{sha256, sha256_str, HashError};
pub use keys::{keys_from_passphrase, KeyError, Keypair, KeypairHex, PublicKey};
pub use signatures::{
    print_signed_message, sign_and_print_message, sign_message_with_secret,
    sign_message_with_two_secrets, verify_message_with_public_key,
    verify_message_with_two_public_keys, Ed25519Provider, KeyRole, SignatureError,
    SignatureProvider,
};
