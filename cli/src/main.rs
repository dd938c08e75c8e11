// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Lisk CLI
//!
//! Entry point for the `lisk` binary. Parses arguments, initializes
//! logging, and dispatches to the SDK.
//!
//! Everything a command produces goes to stdout as JSON or plain text;
//! diagnostics go to stderr through `tracing`.

mod cli;
mod logging;
mod settings;
mod transport;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde_json::{json, Value};
use std::io::Read;
use std::path::Path;

use lisk_sdk::api::{LiskClient, RequestContext};
use lisk_sdk::config::ClientOptions;
use lisk_sdk::crypto::{
    address_from_public_key, decrypt_message_with_secret, encrypt_message_with_secret,
    keys_from_passphrase, sign_and_print_message, sign_message_with_two_secrets,
    verify_message_with_public_key, verify_message_with_two_public_keys, Ed25519Provider, Keypair,
};
use lisk_sdk::transaction::{
    multi_sign_transaction, verify_transaction, DappAsset, Secrets, Transaction,
    TransactionBuilder, Vote,
};

use cli::{Commands, CreateArgs, CreateKind, LiskCli, SecretArgs};
use logging::DEFAULT_FILTER;
use transport::HttpTransport;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = LiskCli::parse();
    logging::init_logging(DEFAULT_FILTER, cli.global.log_format);

    let options = settings::resolve(&cli.global)?;

    match cli.command {
        Commands::Keys(secret) => {
            let keys = keys_from_passphrase(&secret.passphrase);
            let address = Keypair::from_passphrase(&secret.passphrase).address();
            print_json(&json!({
                "publicKey": keys.public_key,
                "privateKey": keys.private_key,
                "address": address,
            }))
        }
        Commands::Address { public_key } => {
            println!("{}", address_from_public_key(&public_key)?);
            Ok(())
        }
        Commands::SignMessage { message, secret } => {
            match &secret.second_passphrase {
                Some(second) => println!(
                    "{}",
                    sign_message_with_two_secrets(&message, &secret.passphrase, second)
                ),
                None => println!("{}", sign_and_print_message(&message, &secret.passphrase)),
            }
            Ok(())
        }
        Commands::VerifyMessage {
            signed_message,
            public_key,
            second_public_key,
        } => {
            let message = match &second_public_key {
                Some(second) => {
                    verify_message_with_two_public_keys(&signed_message, &public_key, second)?
                }
                None => verify_message_with_public_key(&signed_message, &public_key)?,
            };
            println!("{message}");
            Ok(())
        }
        Commands::EncryptMessage {
            message,
            recipient_public_key,
            secret,
        } => {
            let sealed =
                encrypt_message_with_secret(&message, &secret.passphrase, &recipient_public_key)?;
            print_json(&sealed)
        }
        Commands::DecryptMessage {
            encrypted_message,
            nonce,
            sender_public_key,
            secret,
        } => {
            let message = decrypt_message_with_secret(
                &encrypted_message,
                &nonce,
                &secret.passphrase,
                &sender_public_key,
            )?;
            println!("{message}");
            Ok(())
        }
        Commands::Create(args) => create(args, options).await,
        Commands::Verify {
            file,
            second_public_key,
        } => {
            let tx = read_transaction(&file)?;
            verify_transaction(&Ed25519Provider, &tx, second_public_key.as_deref())
                .context("transaction failed verification")?;
            tracing::info!(id = tx.id.as_deref().unwrap_or_default(), "transaction verified");
            println!("ok");
            Ok(())
        }
        Commands::CoSign {
            file,
            secret,
            broadcast,
        } => {
            let tx = read_transaction(&file)?;
            let id = tx.id.clone().context("pending transaction has no id")?;
            let keypair = Keypair::from_passphrase(&secret.passphrase);
            let signature = multi_sign_transaction(&Ed25519Provider, &tx, &keypair)?;
            print_json(&json!({ "transaction": id, "signature": signature }))?;
            if broadcast {
                let client = connect(options)?;
                print_json(&client.broadcast_signature(&id, &signature).await?)?;
            }
            Ok(())
        }
        Commands::Broadcast { file } => {
            let tx = read_transaction(&file)?;
            let client = connect(options)?;
            print_json(&client.broadcast_signed_transaction(&tx).await?)
        }
        Commands::Account { address } => {
            print_json(&connect(options)?.get_account(&address).await?)
        }
        Commands::Transaction { id } => {
            print_json(&connect(options)?.get_transaction(&id).await?)
        }
        Commands::Delegates { limit, standby } => {
            let client = connect(options)?;
            let response = if standby {
                client.list_standby_delegates(limit).await?
            } else {
                client.list_active_delegates(limit).await?
            };
            print_json(&response)
        }
    }
}

/// Builds (and optionally broadcasts) one transaction.
async fn create(args: CreateArgs, options: ClientOptions) -> Result<()> {
    if matches!(args.kind, CreateKind::SecondSignature) && args.secret.second_passphrase.is_none() {
        bail!("second-signature needs --second-passphrase: it names the key being registered");
    }
    let secrets = Secrets::new(&args.secret.passphrase)
        .with_optional_second(args.secret.second_passphrase.as_deref());

    if !args.broadcast {
        let tx = build(&TransactionBuilder::new(), &args.kind, &args.secret, &secrets, args.time_offset)?;
        return print_json(&tx);
    }

    let client = connect(options)?;
    let context = RequestContext::new().with_time_offset(args.time_offset);
    let response = client
        .submit_with_retry(context, |builder, ctx| {
            build_for(builder, &args.kind, &args.secret, &secrets, ctx.time_offset())
        })
        .await?;
    print_json(&response)
}

fn build(
    builder: &TransactionBuilder,
    kind: &CreateKind,
    secret: &SecretArgs,
    secrets: &Secrets<'_>,
    time_offset: i32,
) -> Result<Transaction> {
    let tx = build_for(builder, kind, secret, secrets, time_offset)?;
    tracing::info!(
        id = tx.id.as_deref().unwrap_or_default(),
        tx_type = %tx.tx_type,
        "transaction created"
    );
    Ok(tx)
}

fn build_for(
    builder: &TransactionBuilder,
    kind: &CreateKind,
    secret: &SecretArgs,
    secrets: &Secrets<'_>,
    time_offset: i32,
) -> Result<Transaction, lisk_sdk::transaction::TransactionError> {
    match kind {
        CreateKind::Transfer {
            recipient,
            amount,
            data,
        } => builder.transfer(
            secrets,
            recipient,
            *amount,
            data.as_deref().map(str::as_bytes),
            time_offset,
        ),
        CreateKind::SecondSignature => {
            // Presence checked in `create`.
            let second = secret.second_passphrase.as_deref().unwrap_or_default();
            builder.second_signature(&secret.passphrase, second, time_offset)
        }
        CreateKind::Delegate { username } => builder.delegate(secrets, username, time_offset),
        CreateKind::Vote { add, remove } => {
            let votes: Vec<Vote> = add
                .iter()
                .cloned()
                .map(Vote::Add)
                .chain(remove.iter().cloned().map(Vote::Remove))
                .collect();
            builder.vote(secrets, &votes, time_offset)
        }
        CreateKind::Multisignature {
            keysgroup,
            lifetime,
            min,
        } => builder.multisignature(secrets, keysgroup, *lifetime, *min, time_offset),
        CreateKind::Dapp {
            name,
            link,
            description,
            tags,
            icon,
            dapp_type,
            category,
        } => builder.dapp(
            secrets,
            DappAsset {
                name: name.clone(),
                description: description.clone(),
                tags: tags.clone(),
                dapp_type: *dapp_type,
                link: link.clone(),
                category: *category,
                icon: icon.clone(),
            },
            time_offset,
        ),
        CreateKind::InTransfer { dapp_id, amount } => {
            builder.in_transfer(secrets, dapp_id, *amount, time_offset)
        }
        CreateKind::OutTransfer {
            dapp_id,
            transaction_id,
            recipient,
            amount,
        } => builder.out_transfer(
            secrets,
            dapp_id,
            transaction_id,
            recipient,
            *amount,
            time_offset,
        ),
        CreateKind::MultisignatureRequest {
            recipient,
            amount,
            requester,
        } => builder.multisignature_request(
            secrets,
            recipient,
            *amount,
            requester.as_deref(),
            time_offset,
        ),
    }
}

fn connect(options: ClientOptions) -> Result<LiskClient<HttpTransport>> {
    let transport = HttpTransport::new().context("failed to build http client")?;
    Ok(LiskClient::new(options, transport))
}

/// Reads a transaction from a JSON file, or stdin when `path` is `-`.
fn read_transaction(path: &Path) -> Result<Transaction> {
    let raw = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };
    let value: Value = serde_json::from_str(&raw).context("input is not JSON")?;
    // Accept both a bare transaction and the `{"transaction": ...}` envelope.
    let tx = match value.get("transaction") {
        Some(inner) => inner.clone(),
        None => value,
    };
    if !tx.is_object() {
        bail!("expected a transaction object");
    }
    serde_json::from_value(tx).context("input is not a Lisk transaction")
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
