//! # Hashing
//!
//! SHA-256 is the only hash Lisk uses on the client side. It derives keys
//! from passphrases, identifies transactions and addresses, and is what
//! transaction signatures actually sign.
//!
//! Callers holding raw bytes use [`sha256`]. Callers holding text (CLI
//! arguments, JSON fields) go through [`sha256_str`], which must be told
//! whether the string is hex or UTF-8. Guessing would silently hash the
//! wrong bytes.

use sha2::{Digest, Sha256};
use std::str::FromStr;
use thiserror::Error;

/// Errors raised when hashing text input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HashError {
    #[error(
        "unsupported data format: only byte buffers or `hex` and `utf8` strings can be hashed"
    )]
    UnsupportedDataFormat,

    #[error("unsupported string format `{0}`: only `hex` and `utf8` are supported")]
    UnsupportedStringEncoding(String),

    #[error("input is not valid hex: {0}")]
    InvalidHex(String),
}

/// How a string argument should be turned into bytes before hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringEncoding {
    Hex,
    Utf8,
}

impl FromStr for StringEncoding {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hex" => Ok(Self::Hex),
            "utf8" => Ok(Self::Utf8),
            other => Err(HashError::UnsupportedStringEncoding(other.to_string())),
        }
    }
}

/// SHA-256 digest of `data`.
///
/// ```
/// use lisk_sdk::crypto::sha256;
///
/// let digest = sha256(b"text123*");
/// assert_eq!(
///     hex::encode(digest),
///     "7607d6792843d6003c12495b54e34517a508d2a8622526aff1884422c5478971"
/// );
/// ```
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// SHA-256 of a string, decoded according to `encoding`.
///
/// `encoding` is required. `None` means the caller handed us a string
/// without saying what it is, and that is rejected with
/// [`HashError::UnsupportedDataFormat`].
pub fn sha256_str(data: &str, encoding: Option<&str>) -> Result<[u8; 32], HashError> {
    let encoding: StringEncoding = encoding.ok_or(HashError::UnsupportedDataFormat)?.parse()?;
    match encoding {
        StringEncoding::Utf8 => Ok(sha256(data.as_bytes())),
        StringEncoding::Hex => {
            let bytes = hex::decode(data).map_err(|e| HashError::InvalidHex(e.to_string()))?;
            Ok(sha256(&bytes))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT_DIGEST: &str = "7607d6792843d6003c12495b54e34517a508d2a8622526aff1884422c5478971";

    #[test]
    fn hashes_bytes() {
        assert_eq!(hex::encode(sha256(b"text123*")), TEXT_DIGEST);
    }

    #[test]
    fn utf8_and_hex_strings_hash_the_same_bytes() {
        let from_utf8 = sha256_str("text123*", Some("utf8")).unwrap();
        let from_hex = sha256_str(&hex::encode("text123*"), Some("hex")).unwrap();
        assert_eq!(hex::encode(from_utf8), TEXT_DIGEST);
        assert_eq!(from_utf8, from_hex);
    }

    #[test]
    fn rejects_unknown_encoding() {
        assert_eq!(
            sha256_str("text123*", Some("utf32")),
            Err(HashError::UnsupportedStringEncoding("utf32".into()))
        );
    }

    #[test]
    fn rejects_string_without_encoding() {
        assert_eq!(
            sha256_str("text123*", None),
            Err(HashError::UnsupportedDataFormat)
        );
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(matches!(
            sha256_str("zz", Some("hex")),
            Err(HashError::InvalidHex(_))
        ));
    }
}
