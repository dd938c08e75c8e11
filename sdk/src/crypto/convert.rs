//! # Byte & Key Conversions
//!
//! Small pure helpers sitting between raw bytes and the textual forms Lisk
//! puts on the wire: hex strings, `"<digits>L"` addresses, and decimal
//! transaction ids.
//!
//! Addresses and ids share one trick: take the first eight bytes of a
//! SHA-256 digest, reverse them, and read the result as a big-endian
//! integer. That is just a little-endian read of the same eight bytes,
//! which is how it is implemented here.
//!
//! The `ed2curve` pair at the bottom maps Ed25519 signing keys onto
//! Curve25519 Diffie-Hellman keys so the same passphrase can also be used
//! for message encryption.

use crate::crypto::hash::sha256;
use crate::crypto::keys::KeyError;
use curve25519_dalek::edwards::CompressedEdwardsY;
use sha2::{Digest, Sha512};

/// Lowercase hex encoding.
pub fn buffer_to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Decodes a hex string. Odd lengths and non-hex characters are errors.
pub fn hex_to_buffer(hex_str: &str) -> Result<Vec<u8>, hex::FromHexError> {
    hex::decode(hex_str)
}

/// The first eight bytes of `bytes` in reverse order. Shorter inputs are
/// reversed whole.
///
/// ```
/// use lisk_sdk::crypto::first_eight_bytes_reversed;
///
/// assert_eq!(first_eight_bytes_reversed("0123456789"), b"76543210");
/// ```
pub fn first_eight_bytes_reversed(bytes: impl AsRef<[u8]>) -> Vec<u8> {
    let bytes = bytes.as_ref();
    let mut head = bytes[..bytes.len().min(8)].to_vec();
    head.reverse();
    head
}

/// Reads up to eight bytes as a big-endian unsigned integer and renders it
/// as an address. Longer inputs only contribute their leading eight bytes.
pub fn to_address(bytes: &[u8]) -> String {
    let head = &bytes[..bytes.len().min(8)];
    let value = head.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b));
    format!("{value}L")
}

/// Decimal value of the first eight digest bytes read little-endian.
pub(crate) fn digest_prefix_decimal(digest: &[u8; 32]) -> u64 {
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(prefix)
}

/// Address of a raw 32-byte public key.
pub fn address_from_public_key_bytes(public_key: &[u8; 32]) -> String {
    format!("{}L", digest_prefix_decimal(&sha256(public_key)))
}

/// Address of a hex-encoded public key.
///
/// ```
/// use lisk_sdk::crypto::address_from_public_key;
///
/// let address = address_from_public_key(
///     "5d036a858ce89f844491762eb89e2bfbd50a4a0a0da658e4b2628b25b117ae09",
/// ).unwrap();
/// assert_eq!(address, "18160565574430594874L");
/// ```
pub fn address_from_public_key(public_key_hex: &str) -> Result<String, KeyError> {
    let bytes = hex_to_buffer(public_key_hex).map_err(|_| KeyError::InvalidHex)?;
    let key: [u8; 32] = bytes
        .as_slice()
        .try_into()
        .map_err(|_| KeyError::InvalidPublicKeyLength {
            expected: 32,
            actual: bytes.len(),
        })?;
    Ok(address_from_public_key_bytes(&key))
}

// ---------------------------------------------------------------------------
// ed2curve
// ---------------------------------------------------------------------------

/// Maps an Ed25519 public key to its Curve25519 (Montgomery u) form.
///
/// Fails for byte strings that are not a point on the Edwards curve.
pub fn convert_public_key_ed2curve(public_key: &[u8; 32]) -> Result<[u8; 32], KeyError> {
    let point = CompressedEdwardsY(*public_key)
        .decompress()
        .ok_or(KeyError::InvalidPublicKey)?;
    Ok(point.to_montgomery().to_bytes())
}

/// Maps an Ed25519 seed to the clamped Curve25519 scalar it expands to.
pub fn convert_private_key_ed2curve(seed: &[u8; 32]) -> [u8; 32] {
    let digest = Sha512::digest(seed);
    let mut scalar = [0u8; 32];
    scalar.copy_from_slice(&digest[..32]);
    scalar[0] &= 248;
    scalar[31] &= 127;
    scalar[31] |= 64;
    scalar
}
