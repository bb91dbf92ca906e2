//! Command-line adapter over the lending ledger.
//!
//! Usage:
//!   shelf add "Prelude to Foundation" --copies 2
//!   shelf borrow --actor alice 0
//!   shelf return --actor alice 0
//!   shelf available
//!   shelf loans --actor alice
//!   shelf history 0
//!
//! State lives in a JSON snapshot (`--ledger`, or `SHELF_LEDGER`, default
//! `shelf-ledger.json`). Mutations rewrite the snapshot only after the
//! operation succeeds; queries never write. Results are JSON on stdout,
//! one line per record; rejections go to stderr with a nonzero exit.

use anyhow::{Context, Result};
use bookledger::{ActorId, CatalogLedger, ItemId, load_ledger_or_empty, save_ledger};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "shelf")]
#[command(about = "Track lendable titles, loans, and borrower history")]
struct Cli {
    /// Ledger snapshot path; created on first mutation.
    #[arg(long, env = "SHELF_LEDGER", default_value = "shelf-ledger.json")]
    ledger: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add copies of a title; merges into the existing entry if present.
    Add {
        title: String,
        #[arg(long)]
        copies: u64,
    },
    /// Borrow one copy of an item.
    Borrow {
        #[arg(long, env = "SHELF_ACTOR")]
        actor: String,
        item: u64,
    },
    /// Return a borrowed copy.
    #[command(name = "return")]
    Return {
        #[arg(long, env = "SHELF_ACTOR")]
        actor: String,
        item: u64,
    },
    /// List items with copies on the shelf.
    Available,
    /// List an actor's active loans in borrow order.
    Loans {
        #[arg(long, env = "SHELF_ACTOR")]
        actor: String,
    },
    /// List every actor that ever borrowed an item.
    History { item: u64 },
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ledger = load_ledger_or_empty(&cli.ledger)
        .with_context(|| format!("loading ledger {}", cli.ledger.display()))?;

    match cli.command {
        Command::Add { title, copies } => {
            let id = ledger.add_item(&title, copies)?;
            save_ledger(&ledger, &cli.ledger)?;
            println!("{}", json!({ "id": id }));
        }
        Command::Borrow { actor, item } => {
            let loan = ledger.borrow_item(&ActorId::from(actor), ItemId(item))?;
            save_ledger(&ledger, &cli.ledger)?;
            println!("{}", serde_json::to_string(&loan)?);
        }
        Command::Return { actor, item } => {
            let returned = ledger.return_item(&ActorId::from(actor), ItemId(item))?;
            save_ledger(&ledger, &cli.ledger)?;
            println!("{}", serde_json::to_string(&returned)?);
        }
        Command::Available => {
            for entry in ledger.available() {
                println!("{}", serde_json::to_string(&entry)?);
            }
        }
        Command::Loans { actor } => {
            for loan in ledger.active_loans(&ActorId::from(actor)) {
                println!("{}", serde_json::to_string(&loan)?);
            }
        }
        Command::History { item } => {
            let history = ledger.borrower_history(ItemId(item))?;
            println!("{}", serde_json::to_string(history)?);
        }
    }

    Ok(())
}
