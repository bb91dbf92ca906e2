//! The catalog ledger state machine.
//!
//! All mutations run their precondition checks before touching any state,
//! so a rejected call leaves the ledger exactly as it was. Callers are
//! expected to serialize mutations; the ledger itself holds no locks.

use crate::ledger::{ActorId, AvailableItem, Item, ItemId, LedgerError, Loan};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// In-memory lending ledger: the item table plus per-actor active loans.
///
/// Item ids double as indices into `items`, which keeps the id sequence
/// dense by construction. `by_title` is a derived index for the
/// merge-on-insert policy; `loans` maps each actor to their active loan
/// sequence in borrow order (most recent last).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogLedger {
    items: Vec<Item>,
    #[serde(skip)]
    by_title: BTreeMap<String, ItemId>,
    loans: BTreeMap<ActorId, Vec<ItemId>>,
}

impl CatalogLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `copies` of `title` to the catalog.
    ///
    /// Titles merge: adding a title that already exists tops up its copy
    /// counts and returns the existing id without consuming a new one.
    /// This is a deliberate policy, not a missing uniqueness check.
    pub fn add_item(&mut self, title: &str, copies: u64) -> Result<ItemId, LedgerError> {
        if title.trim().is_empty() {
            return Err(LedgerError::invalid_input("title must not be empty"));
        }
        if copies == 0 {
            return Err(LedgerError::invalid_input("copies must be positive"));
        }

        if let Some(&id) = self.by_title.get(title) {
            let item = &mut self.items[id.as_index()];
            item.total_copies += copies;
            item.available_copies += copies;
            return Ok(id);
        }

        let id = ItemId(self.items.len() as u64);
        self.items.push(Item::new(id, title.to_string(), copies));
        self.by_title.insert(title.to_string(), id);
        Ok(id)
    }

    /// Lend one copy of `id` to `actor`.
    ///
    /// On the first successful borrow by this actor the item's all-time
    /// borrower history gains an entry; repeat cycles leave it unchanged.
    pub fn borrow_item(&mut self, actor: &ActorId, id: ItemId) -> Result<Loan, LedgerError> {
        let item = self
            .items
            .get(id.as_index())
            .ok_or(LedgerError::NotFound { id })?;
        if self.active_loan_position(actor, id).is_some() {
            return Err(LedgerError::AlreadyBorrowed {
                actor: actor.clone(),
                id,
            });
        }
        if item.available_copies == 0 {
            return Err(LedgerError::OutOfStock {
                id,
                title: item.title.clone(),
            });
        }

        let item = &mut self.items[id.as_index()];
        item.available_copies -= 1;
        item.record_borrower(actor);
        self.loans.entry(actor.clone()).or_default().push(id);

        Ok(Loan {
            id,
            title: self.items[id.as_index()].title.clone(),
        })
    }

    /// Close `actor`'s active loan on `id`, putting the copy back on the
    /// shelf. The rest of the actor's loan sequence keeps its order.
    pub fn return_item(&mut self, actor: &ActorId, id: ItemId) -> Result<Loan, LedgerError> {
        let title = self
            .items
            .get(id.as_index())
            .map(|item| item.title.clone())
            .ok_or(LedgerError::NotFound { id })?;
        let not_borrowed = || LedgerError::NotBorrowed {
            actor: actor.clone(),
            id,
        };
        let sequence = self.loans.get_mut(actor).ok_or_else(not_borrowed)?;
        let position = sequence
            .iter()
            .position(|&held| held == id)
            .ok_or_else(not_borrowed)?;

        sequence.remove(position);
        if sequence.is_empty() {
            self.loans.remove(actor);
        }
        self.items[id.as_index()].available_copies += 1;

        Ok(Loan { id, title })
    }

    /// Every item with at least one copy on the shelf, ascending id order.
    pub fn available(&self) -> Vec<AvailableItem> {
        self.items
            .iter()
            .filter(|item| item.available_copies > 0)
            .map(|item| AvailableItem {
                id: item.id,
                title: item.title.clone(),
                available_copies: item.available_copies,
            })
            .collect()
    }

    /// The actor's active loans in borrow order (oldest first).
    pub fn active_loans(&self, actor: &ActorId) -> Vec<Loan> {
        self.loans
            .get(actor)
            .map(|sequence| {
                sequence
                    .iter()
                    .map(|&id| Loan {
                        id,
                        title: self.items[id.as_index()].title.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every actor that ever borrowed `id`, first-occurrence order,
    /// including actors with no loan open today.
    pub fn borrower_history(&self, id: ItemId) -> Result<&[ActorId], LedgerError> {
        self.items
            .get(id.as_index())
            .map(|item| item.borrowers.as_slice())
            .ok_or(LedgerError::NotFound { id })
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id.as_index())
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn loan_sequences(&self) -> &BTreeMap<ActorId, Vec<ItemId>> {
        &self.loans
    }

    /// Count of actors currently holding a copy of `id`.
    pub fn active_loan_count(&self, id: ItemId) -> u64 {
        self.loans
            .values()
            .filter(|sequence| sequence.contains(&id))
            .count() as u64
    }

    fn active_loan_position(&self, actor: &ActorId, id: ItemId) -> Option<usize> {
        self.loans
            .get(actor)?
            .iter()
            .position(|&held| held == id)
    }

    /// Rebuild the derived title index; used after deserializing.
    pub(crate) fn rebuild_title_index(&mut self) {
        self.by_title = self
            .items
            .iter()
            .map(|item| (item.title.clone(), item.id))
            .collect();
    }
}
