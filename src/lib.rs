//! Deterministic lending ledger.
//!
//! The crate is a catalog of lendable titles with copy counts, per-actor
//! active loans, and an all-time borrower history per title. The state
//! machine lives in [`ledger`]; [`snapshot`] gives the CLI adapter a
//! versioned JSON file representation with strict load-time validation.

pub mod ledger;
pub mod snapshot;

pub use ledger::{ActorId, AvailableItem, CatalogLedger, Item, ItemId, LedgerError, Loan};
pub use snapshot::{SNAPSHOT_SCHEMA_VERSION, load_ledger, load_ledger_or_empty, save_ledger};
