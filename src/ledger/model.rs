//! Item records and the read-view structs returned by queries.

use crate::ledger::{ActorId, ItemId};
use serde::{Deserialize, Serialize};

/// One distinct catalog title.
///
/// `total_copies` only ever grows (re-adding an existing title merges into
/// it); `available_copies` moves between 0 and `total_copies` as loans open
/// and close. `borrowers` is the all-time history: first-occurrence order,
/// one entry per actor no matter how many borrow/return cycles they run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub total_copies: u64,
    pub available_copies: u64,
    #[serde(default)]
    pub borrowers: Vec<ActorId>,
}

impl Item {
    pub(crate) fn new(id: ItemId, title: String, copies: u64) -> Self {
        Self {
            id,
            title,
            total_copies: copies,
            available_copies: copies,
            borrowers: Vec::new(),
        }
    }

    /// Record the actor in the all-time history unless already present.
    pub(crate) fn record_borrower(&mut self, actor: &ActorId) {
        if !self.borrowers.contains(actor) {
            self.borrowers.push(actor.clone());
        }
    }
}

/// Entry in the available-catalog view. Items with nothing on the shelf are
/// omitted from the listing entirely, not flagged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableItem {
    pub id: ItemId,
    pub title: String,
    pub available_copies: u64,
}

/// One active loan, title resolved. Also used as the borrow/return
/// confirmation payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    pub id: ItemId,
    pub title: String,
}
