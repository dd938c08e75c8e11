//! Transaction signing.
//!
//! Lisk signs the SHA-256 digest of the byte encoding, never the JSON and
//! never the raw bytes. Which bytes go into the digest depends on the
//! signature being produced:
//!
//! | signature | bytes signed |
//! |-----------|--------------|
//! | `signature` | both signature fields skipped |
//! | `signSignature` | `signature` included, `signSignature` skipped |
//! | multisignature co-signature | both signature fields skipped |
//!
//! The id is derived last, from the fully signed encoding.
//!
//! [`prepare_transaction`] runs the stages in that fixed order. Each stage
//! is its own function so the ordering stays visible in one place.

use tracing::debug;

use crate::crypto::convert::digest_prefix_decimal;
use crate::crypto::hash::sha256;
use crate::crypto::keys::{Keypair, PublicKey};
use crate::crypto::signatures::SignatureProvider;
use crate::transaction::bytes::{
    transaction_bytes, transaction_bytes_with, EncodingError, SkipSignatures,
};
use crate::transaction::types::{Transaction, TransactionType};

// ---------------------------------------------------------------------------
// Primitives
// ---------------------------------------------------------------------------

/// Signs `SHA-256(bytes)`.
pub fn sign_bytes<P: SignatureProvider>(provider: &P, bytes: &[u8], keypair: &Keypair) -> [u8; 64] {
    provider.sign(keypair, &sha256(bytes))
}

/// Checks a signature produced by [`sign_bytes`].
pub fn verify_bytes<P: SignatureProvider>(
    provider: &P,
    bytes: &[u8],
    signature: &[u8; 64],
    public_key: &PublicKey,
) -> bool {
    provider.verify(public_key, &sha256(bytes), signature)
}

/// SHA-256 of the fully signed encoding.
pub fn transaction_hash(tx: &Transaction) -> Result<[u8; 32], EncodingError> {
    Ok(sha256(&transaction_bytes(tx)?))
}

/// Id of an already encoded transaction: the first eight digest bytes,
/// reversed, as a decimal integer. No `L` suffix.
pub fn transaction_id_from_bytes(bytes: &[u8]) -> String {
    digest_prefix_decimal(&sha256(bytes)).to_string()
}

/// Id of a transaction in its current signing state.
pub fn transaction_id(tx: &Transaction) -> Result<String, EncodingError> {
    Ok(transaction_id_from_bytes(&transaction_bytes(tx)?))
}

/// The sender's signature, hex-encoded.
pub fn sign_transaction<P: SignatureProvider>(
    provider: &P,
    tx: &Transaction,
    keypair: &Keypair,
) -> Result<String, EncodingError> {
    let bytes = transaction_bytes_with(tx, SkipSignatures::BOTH)?;
    Ok(hex::encode(sign_bytes(provider, &bytes, keypair)))
}

/// The second signature, hex-encoded. `tx.signature` must already be set.
pub fn second_sign_transaction<P: SignatureProvider>(
    provider: &P,
    tx: &Transaction,
    second_keypair: &Keypair,
) -> Result<String, EncodingError> {
    let bytes = transaction_bytes_with(tx, SkipSignatures::SECOND)?;
    Ok(hex::encode(sign_bytes(provider, &bytes, second_keypair)))
}

/// A co-signer's signature for a pending multisignature transaction.
pub fn multi_sign_transaction<P: SignatureProvider>(
    provider: &P,
    tx: &Transaction,
    keypair: &Keypair,
) -> Result<String, EncodingError> {
    let bytes = transaction_bytes_with(tx, SkipSignatures::BOTH)?;
    Ok(hex::encode(sign_bytes(provider, &bytes, keypair)))
}

// ---------------------------------------------------------------------------
// Pipeline stages
// ---------------------------------------------------------------------------

/// Stage 1: sign with the sender's key.
pub fn attach_signature<P: SignatureProvider>(
    provider: &P,
    mut tx: Transaction,
    keypair: &Keypair,
) -> Result<Transaction, EncodingError> {
    tx.sign_signature = None;
    tx.signature = Some(sign_transaction(provider, &tx, keypair)?);
    Ok(tx)
}

/// Stage 2: sign the singly signed encoding with the second key.
pub fn attach_second_signature<P: SignatureProvider>(
    provider: &P,
    mut tx: Transaction,
    second_keypair: &Keypair,
) -> Result<Transaction, EncodingError> {
    tx.sign_signature = Some(second_sign_transaction(provider, &tx, second_keypair)?);
    Ok(tx)
}

/// Stage 3: derive the id from everything attached so far.
pub fn attach_id(mut tx: Transaction) -> Result<Transaction, EncodingError> {
    tx.id = Some(transaction_id(&tx)?);
    Ok(tx)
}

/// Signs, optionally second-signs, and stamps the id.
///
/// A second-signature registration (type 1) is never second-signed: the key
/// it registers does not exist on the account yet.
pub fn prepare_transaction<P: SignatureProvider>(
    provider: &P,
    tx: Transaction,
    keypair: &Keypair,
    second_keypair: Option<&Keypair>,
) -> Result<Transaction, EncodingError> {
    let tx = attach_signature(provider, tx, keypair)?;

    let tx = match second_keypair {
        Some(second) if tx.tx_type != TransactionType::SecondSignature => {
            attach_second_signature(provider, tx, second)?
        }
        _ => tx,
    };

    let tx = attach_id(tx)?;
    debug!(
        id = tx.id.as_deref().unwrap_or_default(),
        tx_type = %tx.tx_type,
        second_signed = tx.sign_signature.is_some(),
        "transaction prepared"
    );
    Ok(tx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::signatures::Ed25519Provider;
    use crate::transaction::types::{Asset, SignatureAsset};

    const SENDER: &str = "5d036a858ce89f844491762eb89e2bfbd50a4a0a0da658e4b2628b25b117ae09";

    fn transfer() -> Transaction {
        let mut tx = Transaction::unsigned(
            TransactionType::Transfer,
            SENDER.into(),
            141738,
            Asset::empty(),
        );
        tx.amount = 1000;
        tx.recipient_id = Some("58191285901858109L".into());
        tx
    }

    #[test]
    fn signs_the_digest_not_the_bytes() {
        let kp = Keypair::from_passphrase("secret");
        let sig = sign_transaction(&Ed25519Provider, &transfer(), &kp).unwrap();
        assert_eq!(
            sig,
            "618a54975212ead93df8c881655c625544bce8ed7ccdfe6f08a42eecfb1adebd051307be5014bb051617baf7815d50f62129e70918190361e5d4dd4796541b0a"
        );
    }

    #[test]
    fn id_of_signed_transfer() {
        let kp = Keypair::from_passphrase("secret");
        let tx = prepare_transaction(&Ed25519Provider, transfer(), &kp, None).unwrap();
        assert_eq!(tx.id.as_deref(), Some("13987348420913138422"));
        assert_eq!(
            hex::encode(transaction_hash(&tx).unwrap()),
            "f60a26da470b1dc233fd526ed7306c1d84836f9e2ecee82c9ec47319e0910474"
        );
    }

    #[test]
    fn second_signature_covers_first() {
        let kp = Keypair::from_passphrase("secret");
        let second = Keypair::from_passphrase("second secret");
        let tx = prepare_transaction(&Ed25519Provider, transfer(), &kp, Some(&second)).unwrap();
        assert_eq!(
            tx.sign_signature.as_deref(),
            Some("b94f6f3638ff2667291a38e7e3371cb8664c149e38cb54bd1e737244f0cf3aa11af331818d24b7c9c13cf2c8e51e2d8eb1cbb1a5b6ba7d5cfc712ed5e2e4000f")
        );
        assert_eq!(tx.id.as_deref(), Some("6678075568745730280"));
    }

    #[test]
    fn second_signature_registration_is_never_second_signed() {
        let kp = Keypair::from_passphrase("secret");
        let second = Keypair::from_passphrase("second secret");
        let tx = Transaction::unsigned(
            TransactionType::SecondSignature,
            SENDER.into(),
            141738,
            Asset::Signature {
                signature: SignatureAsset {
                    public_key: second.public_key_hex(),
                },
            },
        );
        let tx = prepare_transaction(&Ed25519Provider, tx, &kp, Some(&second)).unwrap();
        assert!(tx.sign_signature.is_none());
        assert_eq!(tx.id.as_deref(), Some("14601878247535024222"));
    }

    #[test]
    fn multi_sign_ignores_existing_signatures() {
        let kp = Keypair::from_passphrase("secret");
        let cosigner = Keypair::from_passphrase("cosigner");
        let unsigned = transfer();
        let signed = prepare_transaction(&Ed25519Provider, unsigned.clone(), &kp, None).unwrap();
        assert_eq!(
            multi_sign_transaction(&Ed25519Provider, &unsigned, &cosigner).unwrap(),
            multi_sign_transaction(&Ed25519Provider, &signed, &cosigner).unwrap()
        );
    }

    #[test]
    fn verify_bytes_rejects_any_flipped_byte() {
        let kp = Keypair::from_passphrase("secret");
        let bytes = transaction_bytes(&transfer()).unwrap();
        let sig = sign_bytes(&Ed25519Provider, &bytes, &kp);
        assert!(verify_bytes(&Ed25519Provider, &bytes, &sig, &kp.public_key()));

        for i in 0..bytes.len() {
            let mut tampered = bytes.clone();
            tampered[i] ^= 0x01;
            assert!(
                !verify_bytes(&Ed25519Provider, &tampered, &sig, &kp.public_key()),
                "flipping byte {i} must invalidate the signature"
            );
        }
    }
}
