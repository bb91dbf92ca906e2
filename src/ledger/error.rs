//! Precondition failures raised by ledger operations.
//!
//! Every variant is caller-correctable: the ledger never retries and never
//! partially applies a rejected mutation, so a caller can fix the input (or
//! wait for a copy to come back) and re-issue the call.

use crate::ledger::{ActorId, ItemId};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// Rejected before touching state: empty title or zero copies.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// The id was never assigned by this ledger.
    #[error("item {id} not found")]
    NotFound { id: ItemId },

    /// The actor already holds an active loan on this item.
    #[error("actor '{actor}' already borrowed item {id}")]
    AlreadyBorrowed { actor: ActorId, id: ItemId },

    /// The actor has no active loan on this item to return.
    #[error("actor '{actor}' has no active loan on item {id}")]
    NotBorrowed { actor: ActorId, id: ItemId },

    /// Every copy is currently on loan.
    #[error("no available copies of item {id} ('{title}')")]
    OutOfStock { id: ItemId, title: String },
}

impl LedgerError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}
