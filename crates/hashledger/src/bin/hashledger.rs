//! Hashledger CLI - append to, inspect and export a hash-linked ledger
//!
//! Usage:
//!     hashledger add --sender Alice --receiver Bob --amount 10.5
//!     hashledger list
//!     hashledger export --format csv --output blockchain_export.csv
//!     hashledger verify
//!     hashledger reset --yes

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use hashledger::export;
use hashledger::{ChainService, ExportFormat, JsonFileStore, LedgerConfig, Status, StatusLevel};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "hashledger")]
#[command(about = "Append-only, hash-linked ledger of transfers")]
#[command(version)]
struct Args {
    /// Ledger data file (default: $HASHLEDGER_DATA_FILE or blockchain_data.json)
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    /// Overwrite a corrupt data file on the next save instead of renaming it to *.corrupt
    #[arg(long, global = true)]
    no_quarantine: bool,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Append a transfer and save the chain
    Add {
        #[arg(long)]
        sender: String,

        #[arg(long)]
        receiver: String,

        /// Decimal amount; stored with two decimal places
        #[arg(long, allow_hyphen_values = true)]
        amount: String,
    },

    /// Show every block, oldest first
    List,

    /// Render the chain as text, CSV or JSON
    Export {
        #[arg(long, value_enum, default_value_t = ExportFormat::Text)]
        format: ExportFormat,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check block numbering and hash links
    Verify,

    /// Write the current chain to the data file again
    Save,

    /// Delete every block and the data file
    Reset {
        /// Required; reset cannot be undone
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = LedgerConfig::from_env().with_quarantine(!args.no_quarantine);
    if let Some(path) = args.data_file {
        config = config.with_data_file(path);
    }

    match args.command {
        Command::Add {
            sender,
            receiver,
            amount,
        } => {
            let status = open(&config).append_record(&sender, &receiver, &amount);
            report(&status)?;
        }
        Command::List => list(&open(&config)),
        Command::Export { format, output } => {
            let ledger = open(&config);
            let rendered = export::export(ledger.chain().all(), format)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, rendered)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Exported {} blocks to {}", ledger.chain().count(), path.display());
                }
                None => print!("{}", rendered),
            }
        }
        Command::Verify => verify(&config)?,
        Command::Save => {
            let status = open(&config).save();
            report(&status)?;
        }
        Command::Reset { yes } => {
            if !yes {
                bail!("refusing to reset without --yes");
            }
            let status = open(&config).reset();
            report(&status)?;
        }
    }

    Ok(())
}

/// Opens the ledger leniently; a corrupt store is reported and treated as empty.
fn open(config: &LedgerConfig) -> ChainService<JsonFileStore> {
    let ledger = ChainService::from_config(config);
    if ledger.status().level != StatusLevel::Info {
        eprintln!("{}", ledger.status());
    }
    ledger
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "hashledger=debug,hashledger_store=debug"
    } else {
        "hashledger=warn,hashledger_store=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Verification refuses a corrupt store instead of reporting an empty chain as valid.
fn verify(config: &LedgerConfig) -> anyhow::Result<()> {
    let ledger = ChainService::try_open(config.open_store())
        .with_context(|| format!("cannot verify {}", config.data_file.display()))?;

    let verification = ledger.verify();
    if !verification.is_valid() {
        bail!(
            "chain invalid at index {}: {}",
            verification.first_invalid_index.unwrap_or_default(),
            verification.error_message.unwrap_or_default()
        );
    }
    println!("Chain valid ({} blocks)", verification.record_count);
    Ok(())
}

fn report(status: &Status) -> anyhow::Result<()> {
    if status.is_error() {
        bail!("{}", status.message);
    }
    println!("{}", status);
    Ok(())
}

fn list(ledger: &ChainService<JsonFileStore>) {
    let chain = ledger.chain();
    println!("Total Blocks: {}", chain.count());
    for record in chain {
        println!();
        println!("Block #{}", record.block_number());
        println!("  {} -> {}  {}", record.sender(), record.receiver(), record.amount());
        println!("  Timestamp:     {}", record.timestamp());
        println!("  Previous Hash: {}", record.previous_hash());
        println!("  Hash:          {}", record.hash());
    }
}
