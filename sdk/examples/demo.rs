//! Offline walkthrough of the Lisk SDK.
//!
//! Derives two accounts, builds and signs a handful of transactions,
//! verifies them, and exchanges a signed and an encrypted message. Nothing
//! touches the network. The output uses ANSI escape codes for colored
//! terminal rendering.
//!
//! Run with:
//!   cargo run --example demo --release

use std::time::Instant;

use lisk_sdk::config::FIXED_POINT;
use lisk_sdk::crypto::{
    decrypt_message_with_secret, encrypt_message_with_secret, sign_and_print_message, Keypair,
};
use lisk_sdk::transaction::{
    verify_transaction, DappAsset, Secrets, Transaction, TransactionBuilder, Vote,
};

// ---------------------------------------------------------------------------
// ANSI color constants
// ---------------------------------------------------------------------------

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const MAGENTA: &str = "\x1b[35m";
const CYAN: &str = "\x1b[36m";
const WHITE: &str = "\x1b[37m";

const BG_BLUE: &str = "\x1b[44m";

// ---------------------------------------------------------------------------
// Display helpers
// ---------------------------------------------------------------------------

fn banner() {
    println!();
    println!("{BG_BLUE}{BOLD}{WHITE}                                                            {RESET}");
    println!("{BG_BLUE}{BOLD}{WHITE}    LISK SDK  --  Offline Wallet Walkthrough                {RESET}");
    println!("{BG_BLUE}{BOLD}{WHITE}    Ed25519 + SHA-256 + XSalsa20-Poly1305                   {RESET}");
    println!("{BG_BLUE}{BOLD}{WHITE}                                                            {RESET}");
    println!();
}

fn section(num: u32, title: &str) {
    println!();
    println!("{BOLD}{CYAN}===[{YELLOW} Step {num} {CYAN}]================================================{RESET}");
    println!("{BOLD}{WHITE}  {title}{RESET}");
    println!("{CYAN}------------------------------------------------------------{RESET}");
}

fn success(text: &str) {
    println!("{GREEN}  [OK] {text}{RESET}");
}

fn info(label: &str, value: &str) {
    println!("{WHITE}  {BOLD}{label}:{RESET} {YELLOW}{value}{RESET}");
}

fn timing(label: &str, elapsed: std::time::Duration) {
    let ms = elapsed.as_secs_f64() * 1000.0;
    println!("{DIM}{MAGENTA}  [{label}: {ms:.2} ms]{RESET}");
}

fn lsk(base_units: u64) -> String {
    format!("{}.{:08} LSK", base_units / FIXED_POINT, base_units % FIXED_POINT)
}

fn show(tx: &Transaction) {
    info("type", &tx.tx_type.to_string());
    info("id", tx.id.as_deref().unwrap_or("-"));
    info("fee", &lsk(tx.fee));
    if tx.sign_signature.is_some() {
        info("second signature", "present");
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() {
    banner();
    let builder = TransactionBuilder::new();

    section(1, "Deriving accounts from passphrases");
    let started = Instant::now();
    let alice = Keypair::from_passphrase("alice walks the chain");
    let bob = Keypair::from_passphrase("bob forges blocks");
    timing("two key derivations", started.elapsed());
    info("alice", &alice.address());
    info("bob", &bob.address());

    section(2, "A plain transfer");
    let alice_secrets = Secrets::new("alice walks the chain");
    let transfer = builder
        .transfer(&alice_secrets, &bob.address(), 25 * FIXED_POINT, Some(b"lunch"), 0)
        .expect("transfer");
    show(&transfer);
    verify_transaction(builder.provider(), &transfer, None).expect("verifies");
    success("signature and id check out");

    section(3, "Protecting the account with a second passphrase");
    let registration = builder
        .second_signature("alice walks the chain", "alice second secret", 0)
        .expect("registration");
    show(&registration);
    let guarded = alice_secrets.with_second("alice second secret");
    let second_key = Keypair::from_passphrase("alice second secret").public_key_hex();
    let transfer = builder
        .transfer(&guarded, &bob.address(), FIXED_POINT, None, 0)
        .expect("second-signed transfer");
    show(&transfer);
    verify_transaction(builder.provider(), &transfer, Some(&second_key)).expect("verifies");
    success("both signatures check out");

    section(4, "Bob becomes a delegate and Alice votes for him");
    let bob_secrets = Secrets::new("bob forges blocks");
    let delegate = builder
        .delegate(&bob_secrets, "bob_forges", 0)
        .expect("delegate");
    show(&delegate);
    let vote = builder
        .vote(&guarded, &[Vote::Add(bob.public_key_hex())], 0)
        .expect("vote");
    show(&vote);

    section(5, "Registering a dapp");
    let dapp = builder
        .dapp(
            &bob_secrets,
            DappAsset {
                name: "Guestbook".into(),
                description: Some("Leave a note on chain".into()),
                tags: Some("social".into()),
                dapp_type: 0,
                link: "https://example.invalid/guestbook.zip".into(),
                category: 0,
                icon: None,
            },
            0,
        )
        .expect("dapp");
    show(&dapp);

    section(6, "Off-chain messages");
    println!("{DIM}{}{RESET}", sign_and_print_message("I am Bob", "bob forges blocks"));
    let sealed = encrypt_message_with_secret(
        "the password is swordfish",
        "alice walks the chain",
        &bob.public_key_hex(),
    )
    .expect("encrypt");
    info("nonce", &sealed.nonce);
    let opened = decrypt_message_with_secret(
        &sealed.encrypted_message,
        &sealed.nonce,
        "bob forges blocks",
        &alice.public_key_hex(),
    )
    .expect("decrypt");
    success(&format!("bob reads: {opened}"));

    println!();
    println!("{BOLD}{GREEN}  Done. Broadcast any of the above with `lisk broadcast`.{RESET}");
    println!();
}
