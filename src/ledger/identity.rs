//! Identifier newtypes shared across the ledger.
//!
//! Ids are deliberately thin wrappers so mixing up an item id with a raw
//! count, or an actor with a title, fails at the type level rather than at
//! runtime.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dense sequential identifier for a catalog item.
///
/// Assigned starting at 0 in creation order and never reused; the ledger
/// treats it as an index into the item table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl ItemId {
    pub fn as_index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque caller identity.
///
/// The ledger never interprets or authenticates this value; it only needs
/// equality and a stable ordering for deterministic map iteration.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(pub String);

impl ActorId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActorId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ActorId {
    fn from(value: String) -> Self {
        Self(value)
    }
}
