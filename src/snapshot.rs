//! Versioned JSON snapshot of a ledger.
//!
//! The snapshot is the `shelf` adapter's way of carrying ledger state
//! between invocations; it is not a durability contract of the core.
//! Loading is intentionally strict: the version marker and every
//! structural invariant are checked before a ledger is handed back, so a
//! hand-edited or truncated file is refused wholesale rather than
//! producing a ledger that violates its own bookkeeping.

use crate::ledger::{ActorId, CatalogLedger, ItemId};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Version marker for ledger snapshot files.
pub const SNAPSHOT_SCHEMA_VERSION: &str = "shelf_ledger_v1";

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotDocument {
    schema_version: String,
    #[serde(flatten)]
    ledger: CatalogLedger,
}

/// Parse and validate a snapshot from disk.
pub fn load_ledger(path: &Path) -> Result<CatalogLedger> {
    let data =
        fs::read_to_string(path).with_context(|| format!("reading ledger {}", path.display()))?;
    let document: SnapshotDocument = serde_json::from_str(&data)
        .with_context(|| format!("parsing ledger {}", path.display()))?;

    if document.schema_version != SNAPSHOT_SCHEMA_VERSION {
        bail!(
            "unsupported ledger schema_version '{}', expected {}",
            document.schema_version,
            SNAPSHOT_SCHEMA_VERSION
        );
    }

    let mut ledger = document.ledger;
    validate_ledger(&ledger).with_context(|| format!("validating ledger {}", path.display()))?;
    // The title index is derived state and not part of the document.
    ledger.rebuild_title_index();
    Ok(ledger)
}

/// Like [`load_ledger`], but a missing file yields an empty ledger. This is
/// the adapter's bootstrap path; any existing file still validates fully.
pub fn load_ledger_or_empty(path: &Path) -> Result<CatalogLedger> {
    if !path.exists() {
        return Ok(CatalogLedger::new());
    }
    load_ledger(path)
}

/// Write the ledger atomically: serialize to a temp file in the target
/// directory, then persist over the destination. A crash mid-write never
/// leaves a truncated snapshot behind.
pub fn save_ledger(ledger: &CatalogLedger, path: &Path) -> Result<()> {
    let document = SnapshotDocument {
        schema_version: SNAPSHOT_SCHEMA_VERSION.to_string(),
        ledger: ledger.clone(),
    };
    let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
    let mut temp = match parent {
        Some(dir) => NamedTempFile::new_in(dir),
        None => NamedTempFile::new_in("."),
    }
    .with_context(|| format!("allocating temp file next to {}", path.display()))?;

    serde_json::to_writer_pretty(&mut temp, &document)
        .with_context(|| format!("serializing ledger for {}", path.display()))?;
    temp.write_all(b"\n")?;
    temp.persist(path)
        .with_context(|| format!("persisting ledger {}", path.display()))?;
    Ok(())
}

fn validate_ledger(ledger: &CatalogLedger) -> Result<()> {
    let mut titles: BTreeSet<&str> = BTreeSet::new();
    for (position, item) in ledger.items().iter().enumerate() {
        if item.id != ItemId(position as u64) {
            bail!(
                "item ids must be dense and in order: position {} holds id {}",
                position,
                item.id
            );
        }
        if item.title.trim().is_empty() {
            bail!("item {} has a blank title", item.id);
        }
        if !titles.insert(item.title.as_str()) {
            bail!("duplicate title '{}' (titles are the merge key)", item.title);
        }
        if item.available_copies > item.total_copies {
            bail!(
                "item {} has {} available of {} total copies",
                item.id,
                item.available_copies,
                item.total_copies
            );
        }
        let mut seen: BTreeSet<&ActorId> = BTreeSet::new();
        for actor in &item.borrowers {
            if actor.as_str().is_empty() {
                bail!("item {} history contains an empty actor id", item.id);
            }
            if !seen.insert(actor) {
                bail!("item {} history repeats actor '{}'", item.id, actor);
            }
        }
    }

    for (actor, sequence) in ledger.loan_sequences() {
        if actor.as_str().is_empty() {
            bail!("loan table contains an empty actor id");
        }
        if sequence.is_empty() {
            bail!("actor '{}' has an empty loan sequence", actor);
        }
        let mut held: BTreeSet<ItemId> = BTreeSet::new();
        for &id in sequence {
            let Some(item) = ledger.item(id) else {
                bail!("actor '{}' holds unknown item {}", actor, id);
            };
            if !held.insert(id) {
                bail!("actor '{}' holds item {} twice", actor, id);
            }
            if !item.borrowers.contains(actor) {
                bail!(
                    "actor '{}' holds item {} but is missing from its history",
                    actor,
                    id
                );
            }
        }
    }

    for item in ledger.items() {
        let on_loan = ledger.active_loan_count(item.id);
        if item.available_copies + on_loan != item.total_copies {
            bail!(
                "item {} does not reconcile: {} available + {} on loan != {} total",
                item.id,
                item.available_copies,
                on_loan,
                item.total_copies
            );
        }
    }

    Ok(())
}
