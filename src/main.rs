//! Storage Wallet CLI
//!
//! Command-line front end for a wallet session against the storage contract.

use alloy::primitives::TxHash;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;
use storage_wallet::{Config, Error, Network, Result, RpcConfig, WalletSession};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the phrase for commands that need an identity
const MNEMONIC_ENV: &str = "MNEMONIC";

#[derive(Parser)]
#[command(name = "storage-wallet")]
#[command(about = "Testnet wallet for the storage contract")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Network (sepolia, holesky); overrides the config file
    #[arg(short, long, global = true)]
    network: Option<String>,

    /// Mnemonic phrase (defaults to the MNEMONIC environment variable)
    #[arg(long, global = true)]
    phrase: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new random identity and show its balance
    Generate,

    /// Import an identity from a mnemonic phrase and show its balance
    Import,

    /// Show the balance of the identity
    Balance,

    /// Call store(uint256) on the contract
    Store {
        /// Value to store (decimal or 0x-prefixed hex)
        #[arg(long)]
        value: String,
    },

    /// Call retrieve() on the contract
    Retrieve,

    /// Look up the status of a submitted transaction
    Status {
        /// Transaction hash
        #[arg(long)]
        tx: String,
    },

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (ignore if not found)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init();
    }

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(network) = &cli.network {
        config.network = Network::parse(network)?;
    }

    let connect = || WalletSession::from_config(&config, &RpcConfig::from_env());

    match cli.command {
        Commands::Generate => {
            let mut session = connect()?;
            let identity = session.create_identity()?;
            println!("Address: {}", identity.address_string());
            println!("Seed phrase: {}", identity.phrase().expose());
            println!("Write the seed phrase down; it is not stored anywhere.");
            show_balance(&mut session).await;
        }
        Commands::Import => {
            let mut session = connect()?;
            load_identity(&mut session, cli.phrase)?;
            show_balance(&mut session).await;
        }
        Commands::Balance => {
            let mut session = connect()?;
            load_identity(&mut session, cli.phrase)?;
            let balance = session.refresh_balance().await?;
            println!("Balance: {} ETH", balance.commified());
        }
        Commands::Store { value } => {
            let mut session = connect()?;
            load_identity(&mut session, cli.phrase)?;
            let binding = session.bind_contract()?;
            let handle = session.store(&binding, &value).await?;
            println!("Submitted store({})", handle.value);
            println!("  Transaction: {}", handle.hash);
        }
        Commands::Retrieve => {
            let mut session = connect()?;
            load_identity(&mut session, cli.phrase)?;
            let binding = session.bind_contract()?;
            let value = session.retrieve(&binding).await?;
            println!("Retrieved value: {}", value.commified());
            println!("  Raw: {}", value.raw());
        }
        Commands::Status { tx } => {
            let session = connect()?;
            let hash = TxHash::from_str(&tx)
                .map_err(|e| Error::InvalidArgument(format!("Invalid transaction hash: {}", e)))?;
            let status = session.transaction_status(hash).await?;
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

/// Import the identity from `--phrase` or the MNEMONIC environment variable
fn load_identity(session: &mut WalletSession, phrase: Option<String>) -> Result<()> {
    let phrase = match phrase {
        Some(phrase) => {
            tracing::warn!("Phrase passed on the command line; prefer the {} variable", MNEMONIC_ENV);
            phrase
        }
        None => std::env::var(MNEMONIC_ENV).map_err(|_| {
            Error::InvalidArgument(format!(
                "No phrase given. Pass --phrase or set {}.",
                MNEMONIC_ENV
            ))
        })?,
    };

    let identity = session.import_identity(&phrase)?;
    println!("Address: {}", identity.address_string());
    Ok(())
}

/// Print the balance, reporting a failed query without aborting
async fn show_balance(session: &mut WalletSession) {
    match session.refresh_balance().await {
        Ok(balance) => println!("Balance: {} ETH", balance.commified()),
        Err(e) => {
            tracing::warn!(error = %e, "Balance unavailable");
            println!("Balance: unavailable");
        }
    }
}
