//! Core lending-ledger state machine.
//!
//! This module owns all ledger state: the item table (titles, copy counts,
//! all-time borrower history) and each actor's active-loan sequence. Every
//! mutation is a single atomic transition; a rejected call leaves state
//! untouched. Callers use [`CatalogLedger`] directly; the `shelf` binary is
//! one thin adapter over it.

pub mod error;
pub mod identity;
pub mod model;
pub mod state;

pub use error::LedgerError;
pub use identity::{ActorId, ItemId};
pub use model::{AvailableItem, Item, Loan};
pub use state::CatalogLedger;
