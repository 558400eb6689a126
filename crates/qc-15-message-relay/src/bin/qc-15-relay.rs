//! QC-15 Relay: admin surface for the cross-chain message relay.
//!
//! Runs the relay against in-memory adapters so an operator can check a
//! configuration and watch a full send/deliver round trip.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use qc_15_message_relay::{
    config::parse_address, ChainSelector, InMemoryEventLog, InMemoryNativeVault, InMemoryRouter,
    InMemoryTokenLedger, MessageRelayApi, MessageRelayService, RelayConfig, U256,
};

/// QC-15 Relay: cross-chain message relay admin tool
#[derive(Parser, Debug)]
#[command(name = "qc-15-relay")]
#[command(about = "Admin tool for the QC-15 cross-chain message relay")]
struct Args {
    /// JSON config file (defaults to QC_RELAY_* environment variables)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate and print the configuration
    CheckConfig,

    /// Whitelist a destination, send a message and deliver it back
    Demo {
        /// Destination chain selector
        #[arg(long, default_value = "16015286601757825753")]
        destination: u64,

        /// Receiver address on the destination chain (hex)
        #[arg(long, default_value = "0x000000000000000000000000000000000000abc0")]
        receiver: String,

        /// Message text
        #[arg(long, default_value = "hello")]
        text: String,

        /// Fee-token balance credited to the relay
        #[arg(long, default_value = "10")]
        balance: u64,

        /// Flat router fee
        #[arg(long, default_value = "3")]
        fee: u64,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<RelayConfig> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            RelayConfig::from_json_str(&raw).context("parsing relay config")
        }
        None => RelayConfig::from_env().context("loading relay config from environment"),
    }
}

async fn run_demo(
    config: RelayConfig,
    destination: ChainSelector,
    receiver: &str,
    text: &str,
    balance: u64,
    fee: u64,
) -> Result<()> {
    let receiver = parse_address("receiver", receiver)?;

    let ledger = Arc::new(InMemoryTokenLedger::new());
    ledger.mint(config.fee_token, config.relay, U256::from(balance));
    let router = Arc::new(InMemoryRouter::new(
        config.router,
        ledger.clone(),
        U256::from(fee),
    ));
    let events = Arc::new(InMemoryEventLog::new());

    let owner = config.owner;
    let fee_token = config.fee_token;
    let relay_address = config.relay;
    let mut relay = MessageRelayService::new(
        config,
        router.clone(),
        ledger.clone(),
        Arc::new(InMemoryNativeVault::new()),
        events.clone(),
    )?;

    relay.set_whitelisted(owner, destination, true)?;
    let message_id = relay.send_message(owner, destination, receiver, text).await?;
    info!(message_id = %hex::encode(message_id), "Demo message sent");

    for sent in router.sent() {
        let envelope = InMemoryRouter::inbound_for(&sent, destination);
        relay.accept_message(router.address(), envelope)?;
    }

    println!(
        "whitelisted destinations: {:?}",
        relay.whitelisted_destinations()
    );
    println!("{}", serde_json::to_string_pretty(&events.events())?);
    println!("{}", serde_json::to_string_pretty(&relay.stats())?);
    println!(
        "fee-token balance: {}",
        ledger.balance(fee_token, relay_address)
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_ref())?;

    match args.command {
        Command::CheckConfig => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Command::Demo {
            destination,
            receiver,
            text,
            balance,
            fee,
        } => {
            run_demo(
                config,
                ChainSelector(destination),
                &receiver,
                &text,
                balance,
                fee,
            )
            .await?;
        }
    }

    Ok(())
}
