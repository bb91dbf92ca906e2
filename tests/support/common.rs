#![allow(dead_code)]

use anyhow::{Context, Result, bail};
use bookledger::{ActorId, CatalogLedger, ItemId};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Asserts the conservation invariant for every item: copies on the shelf
/// plus actors currently holding one must equal everything ever added.
pub fn assert_conservation(ledger: &CatalogLedger) {
    for item in ledger.items() {
        let on_loan = ledger.active_loan_count(item.id);
        assert_eq!(
            item.available_copies + on_loan,
            item.total_copies,
            "item {} ('{}') does not reconcile",
            item.id,
            item.title
        );
    }
}

pub fn actor(name: &str) -> ActorId {
    ActorId::from(name)
}

/// Two-title ledger used by the ordering and stock scenarios.
pub fn seeded_ledger() -> Result<(CatalogLedger, ItemId, ItemId)> {
    let mut ledger = CatalogLedger::new();
    let first = ledger.add_item("Prelude to Foundation", 2)?;
    let second = ledger.add_item("Forward the Foundation", 2)?;
    Ok((ledger, first, second))
}

/// Scratch directory holding a ledger snapshot for CLI runs; removed on drop.
pub struct TempLedger {
    dir: TempDir,
}

impl TempLedger {
    pub fn new() -> Result<Self> {
        let dir = TempDir::new().context("allocating temp ledger dir")?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().join("shelf-ledger.json")
    }
}

/// Run the shelf binary against the given snapshot path.
pub fn run_shelf(ledger: &Path, args: &[&str]) -> Result<Output> {
    Command::new(env!("CARGO_BIN_EXE_shelf"))
        .arg("--ledger")
        .arg(ledger)
        .args(args)
        .env_remove("SHELF_LEDGER")
        .env_remove("SHELF_ACTOR")
        .output()
        .with_context(|| format!("running shelf {args:?}"))
}

/// Run the shelf binary and require success, returning parsed stdout lines.
pub fn shelf_ok(ledger: &Path, args: &[&str]) -> Result<Vec<Value>> {
    let output = run_shelf(ledger, args)?;
    if !output.status.success() {
        bail!(
            "shelf {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }
    parse_json_lines(&output.stdout)
}

/// Run the shelf binary expecting failure, returning stderr.
pub fn shelf_err(ledger: &Path, args: &[&str]) -> Result<String> {
    let output = run_shelf(ledger, args)?;
    if output.status.success() {
        bail!("shelf {args:?} unexpectedly succeeded");
    }
    Ok(String::from_utf8_lossy(&output.stderr).to_string())
}

pub fn parse_json_lines(bytes: &[u8]) -> Result<Vec<Value>> {
    String::from_utf8_lossy(bytes)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            serde_json::from_str(line).with_context(|| format!("parsing output line: {line}"))
        })
        .collect()
}
