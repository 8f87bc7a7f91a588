//! purse-cli — Command-line interface for the purse wallet.
//!
//! Thin collaborator over the core wallet operations: create a wallet
//! file, show its coins and balance, add a coin, spend an amount. Every
//! command is a full open → mutate → commit session under the wallet's
//! exclusive file lock.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use purse_wallet::{CommitError, Wallet};

/// Purse command-line wallet interface.
#[derive(Parser)]
#[command(name = "purse-cli")]
#[command(version, about = "A coin purse on disk.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new empty wallet file.
    Create(FileArgs),
    /// Show the wallet's coins and balance.
    Info(FileArgs),
    /// Add a coin to the wallet.
    Add(AmountArgs),
    /// Spend an amount from the wallet.
    Spend(AmountArgs),
}

#[derive(Args)]
struct FileArgs {
    /// Path to wallet file (default: ~/.purse/wallet.data).
    #[arg(short, long)]
    file: Option<PathBuf>,
}

#[derive(Args)]
struct AmountArgs {
    /// Path to wallet file (default: ~/.purse/wallet.data).
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Coin amount (a positive integer).
    #[arg(short, long)]
    amount: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Create(args) => wallet_create(args),
        Commands::Info(args) => wallet_info(args),
        Commands::Add(args) => wallet_add(args),
        Commands::Spend(args) => wallet_spend(args),
    }
}

/// Create a new empty wallet file.
fn wallet_create(args: FileArgs) -> Result<()> {
    let wallet_path = resolve_wallet_path(args.file)?;

    if wallet_path.exists() {
        bail!("Wallet file already exists: {}", wallet_path.display());
    }

    if let Some(parent) = wallet_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&wallet_path, "")
        .with_context(|| format!("Failed to create wallet file: {}", wallet_path.display()))?;

    println!("Wallet created: {}", wallet_path.display());
    Ok(())
}

/// Open the wallet, print its contents, and commit unchanged.
fn wallet_info(args: FileArgs) -> Result<()> {
    let wallet_path = resolve_wallet_path(args.file)?;
    let wallet = Wallet::open(&wallet_path)
        .with_context(|| format!("Failed to open wallet: {}", wallet_path.display()))?;

    print_info(&wallet);
    commit(wallet)
}

/// Add a coin and commit.
fn wallet_add(args: AmountArgs) -> Result<()> {
    let wallet_path = resolve_wallet_path(args.file)?;
    let mut wallet = Wallet::open(&wallet_path)
        .with_context(|| format!("Failed to open wallet: {}", wallet_path.display()))?;

    if let Err(e) = wallet.add(args.amount) {
        // Local failure: the wallet is untouched, but the session must
        // still end with a commit so the lock is released.
        commit(wallet)?;
        bail!("Add failed: {e}");
    }

    println!("Added coin {}", args.amount);
    print_info(&wallet);
    commit(wallet)
}

/// Spend an amount and commit.
fn wallet_spend(args: AmountArgs) -> Result<()> {
    let wallet_path = resolve_wallet_path(args.file)?;
    let mut wallet = Wallet::open(&wallet_path)
        .with_context(|| format!("Failed to open wallet: {}", wallet_path.display()))?;

    match wallet.spend(args.amount) {
        Ok(outcome) => {
            println!("Spent {}", args.amount);
            println!("Coins consumed: {}", join_coins(&outcome.consumed));
            if let Some(change) = outcome.change {
                println!("Change returned: {change}");
            }
        }
        Err(e) => {
            commit(wallet)?;
            bail!("Spend failed: {e}");
        }
    }

    print_info(&wallet);
    commit(wallet)
}

/// Print the wallet-info block.
fn print_info(wallet: &Wallet) {
    println!("----- Wallet Info -----");
    println!("Coins: {}", join_coins(wallet.coins()));
    println!("Sum of coins: {}", wallet.sum());
    println!("-----------------------");
}

/// Render a coin list for display.
fn join_coins(coins: &[u64]) -> String {
    coins
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Persist and unlock, surfacing both commit failure modes.
fn commit(wallet: Wallet) -> Result<()> {
    wallet.commit().map_err(|e| match e {
        CommitError::Persist { source, .. } => {
            anyhow::anyhow!("Commit failed, wallet still locked: {source}")
        }
        CommitError::Release { source } => {
            anyhow::anyhow!("Wallet saved but lock not released: {source}")
        }
    })
}

/// Resolve wallet file path, using default if not provided.
fn resolve_wallet_path(path: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(p) = path {
        return Ok(p);
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".purse").join("wallet.data"))
}
