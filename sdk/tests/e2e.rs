//! End-to-end tests for the offline half of the SDK.
//!
//! Each test walks a transaction through the whole pipeline the way a
//! wallet would: derive keys, build, sign, serialize to JSON, parse it back
//! on the "node side" and verify. The clock is pinned so ids are stable.

use lisk_sdk::crypto::{
    decrypt_message_with_secret, encrypt_message_with_secret, sign_message_with_two_secrets,
    verify_message_with_two_public_keys, Ed25519Provider, KeyRole, Keypair, PublicKey, SignatureError,
};
use lisk_sdk::time::FixedClock;
use lisk_sdk::transaction::signing::verify_bytes;
use lisk_sdk::transaction::{
    multi_sign_transaction, transaction_bytes_with, transaction_id, verify_transaction, Secrets,
    SkipSignatures, Transaction, TransactionBuilder, TransactionError, Vote,
};

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

const SENDER: &str = "5d036a858ce89f844491762eb89e2bfbd50a4a0a0da658e4b2628b25b117ae09";
const SECOND_PUBLIC_KEY: &str = "0401c8ac9f29ded9e1e4d5b6b43051cb25b22f27c7b7b35092161e851946f82f";
const RECIPIENT: &str = "58191285901858109L";

fn builder() -> TransactionBuilder<Ed25519Provider, FixedClock> {
    TransactionBuilder::with_parts(Ed25519Provider, FixedClock::at_epoch_seconds(141738))
}

/// Serializes and parses back, as a node receiving the broadcast would.
fn over_the_wire(tx: &Transaction) -> Transaction {
    let json = serde_json::to_string(tx).expect("serialize");
    serde_json::from_str(&json).expect("deserialize")
}

fn decode_signature(hex_str: &str) -> [u8; 64] {
    hex::decode(hex_str)
        .expect("hex")
        .try_into()
        .expect("64 bytes")
}

// ---------------------------------------------------------------------------
// 1. Transfer Lifecycle
// ---------------------------------------------------------------------------

#[test]
fn transfer_survives_the_wire_and_verifies() {
    let tx = builder()
        .transfer(&Secrets::new("secret"), RECIPIENT, 1000, None, 0)
        .unwrap();

    let received = over_the_wire(&tx);
    assert_eq!(received, tx);
    assert!(verify_transaction(&Ed25519Provider, &received, None).is_ok());
    assert_eq!(transaction_id(&received).unwrap(), "13987348420913138422");
    assert_eq!(received.id.as_deref(), Some("13987348420913138422"));
}

#[test]
fn wire_format_uses_lisk_field_names() {
    let tx = builder()
        .transfer(&Secrets::new("secret"), RECIPIENT, 1000, None, 0)
        .unwrap();
    let json = serde_json::to_value(&tx).unwrap();

    assert_eq!(json["type"], 0);
    assert_eq!(json["amount"], 1000);
    assert_eq!(json["fee"], 10_000_000);
    assert_eq!(json["recipientId"], RECIPIENT);
    assert_eq!(json["senderPublicKey"], SENDER);
    assert_eq!(json["timestamp"], 141738);
    assert!(json.get("signSignature").is_none());
}

// ---------------------------------------------------------------------------
// 2. Second Signatures
// ---------------------------------------------------------------------------

#[test]
fn second_signed_transfer_needs_the_second_key() {
    let secrets = Secrets::new("secret").with_second("second secret");
    let tx = over_the_wire(
        &builder()
            .transfer(&secrets, RECIPIENT, 1000, None, 0)
            .unwrap(),
    );

    assert!(verify_transaction(&Ed25519Provider, &tx, Some(SECOND_PUBLIC_KEY)).is_ok());

    assert_eq!(
        verify_transaction(&Ed25519Provider, &tx, None),
        Err(TransactionError::Signature(
            SignatureError::MissingSecondPublicKey
        ))
    );

    // The sender's first key is not the second key.
    let err = verify_transaction(&Ed25519Provider, &tx, Some(SENDER)).unwrap_err();
    assert!(matches!(err, TransactionError::Signature(_)), "{err:?}");
}

#[test]
fn registering_a_second_key_then_using_it() {
    let registration = builder()
        .second_signature("secret", "second secret", 0)
        .unwrap();
    assert!(verify_transaction(&Ed25519Provider, &registration, None).is_ok());

    let registered = match &registration.asset {
        lisk_sdk::transaction::Asset::Signature { signature } => signature.public_key.clone(),
        other => panic!("unexpected asset {other:?}"),
    };
    assert_eq!(registered, SECOND_PUBLIC_KEY);

    let secrets = Secrets::new("secret").with_second("second secret");
    let vote = builder()
        .vote(&secrets, &[Vote::Add(SECOND_PUBLIC_KEY.into())], 0)
        .unwrap();
    assert!(verify_transaction(&Ed25519Provider, &vote, Some(&registered)).is_ok());
}

// ---------------------------------------------------------------------------
// 3. Tampering
// ---------------------------------------------------------------------------

#[test]
fn any_field_change_breaks_verification() {
    let tx = builder()
        .transfer(
            &Secrets::new("secret"),
            RECIPIENT,
            1000,
            Some("lunch".as_bytes()),
            0,
        )
        .unwrap();
    assert!(verify_transaction(&Ed25519Provider, &tx, None).is_ok());

    for field in [
        "amount",
        "timestamp",
        "recipientId",
        "asset",
        "senderPublicKey",
    ] {
        let mut tampered = tx.clone();
        match field {
            "amount" => tampered.amount += 1,
            "timestamp" => tampered.timestamp += 1,
            "recipientId" => tampered.recipient_id = Some("1L".into()),
            "asset" => {
                tampered.asset = lisk_sdk::transaction::Asset::Transfer {
                    data: Some("dinner".into()),
                }
            }
            _ => tampered.sender_public_key = SECOND_PUBLIC_KEY.into(),
        }
        assert!(
            verify_transaction(&Ed25519Provider, &tampered, None).is_err(),
            "changing {field} went unnoticed"
        );
    }

    let signature = decode_signature(tx.signature.as_deref().unwrap());
    for i in 0..signature.len() {
        let mut flipped = signature;
        flipped[i] ^= 0x01;
        let mut tampered = tx.clone();
        tampered.signature = Some(hex::encode(flipped));
        assert!(
            verify_transaction(&Ed25519Provider, &tampered, None).is_err(),
            "flipping signature byte {i} went unnoticed"
        );
    }
}

#[test]
fn fee_is_outside_the_signed_bytes() {
    let tx = builder()
        .transfer(&Secrets::new("secret"), RECIPIENT, 1000, None, 0)
        .unwrap();

    // Nodes charge the fee for the type; the signature does not pin it.
    let mut discounted = tx.clone();
    discounted.fee -= 1;
    assert!(verify_transaction(&Ed25519Provider, &discounted, None).is_ok());
    assert_eq!(
        transaction_id(&discounted).unwrap(),
        transaction_id(&tx).unwrap()
    );
}

// ---------------------------------------------------------------------------
// 4. Multisignature Flow
// ---------------------------------------------------------------------------

#[test]
fn co_signers_sign_the_pending_request() {
    let request = builder()
        .multisignature_request(&Secrets::new("secret"), RECIPIENT, 1000, None, 0)
        .unwrap();
    assert_eq!(request.requester_public_key.as_deref(), Some(SENDER));
    assert_eq!(request.id.as_deref(), Some("861224451494084640"));

    let pending = over_the_wire(&request);
    let signed_bytes = transaction_bytes_with(&pending, SkipSignatures::BOTH).unwrap();

    for passphrase in ["second secret", "third secret"] {
        let co_signer = Keypair::from_passphrase(passphrase);
        let signature = multi_sign_transaction(&Ed25519Provider, &pending, &co_signer).unwrap();
        assert!(verify_bytes(
            &Ed25519Provider,
            &signed_bytes,
            &decode_signature(&signature),
            &co_signer.public_key(),
        ));

        let stranger = PublicKey::from_hex(SENDER).unwrap();
        assert!(!verify_bytes(
            &Ed25519Provider,
            &signed_bytes,
            &decode_signature(&signature),
            &stranger,
        ));
    }
}

// ---------------------------------------------------------------------------
// 5. Off-chain Messages
// ---------------------------------------------------------------------------

#[test]
fn alice_and_bob_exchange_a_private_note() {
    let alice = Keypair::from_passphrase("alice passphrase");
    let bob = Keypair::from_passphrase("bob passphrase");

    let sealed =
        encrypt_message_with_secret("meet at block 1000", "alice passphrase", &bob.public_key_hex())
            .unwrap();
    let opened = decrypt_message_with_secret(
        &sealed.encrypted_message,
        &sealed.nonce,
        "bob passphrase",
        &alice.public_key_hex(),
    )
    .unwrap();
    assert_eq!(opened, "meet at block 1000");

    // A third party holding Alice's public key learns nothing.
    assert!(decrypt_message_with_secret(
        &sealed.encrypted_message,
        &sealed.nonce,
        "eve passphrase",
        &alice.public_key_hex(),
    )
    .is_err());
}

#[test]
fn double_signed_message_checks_both_layers() {
    let signed = sign_message_with_two_secrets("hello", "secret", "second secret");
    assert_eq!(
        verify_message_with_two_public_keys(&signed, SENDER, SECOND_PUBLIC_KEY).unwrap(),
        "hello"
    );

    // Swapping the keys fails on the outer layer first.
    let err = verify_message_with_two_public_keys(&signed, SECOND_PUBLIC_KEY, SENDER).unwrap_err();
    assert_eq!(
        err,
        SignatureError::InvalidSignature {
            role: KeyRole::Second
        }
    );
}
