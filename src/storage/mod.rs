//! Storage layer for the budget planner
//!
//! Each user owns one [`BudgetDocument`]. Backends implement
//! [`BudgetStore`]: the whole document is loaded, changed in memory, and
//! written back in one piece. Backends do no locking across a
//! load/save pair; callers must serialize writers for the same user.

pub mod file_io;
pub mod json_store;
pub mod memory;

pub use file_io::{read_json, write_json_atomic};
pub use json_store::JsonFileStore;
pub use memory::MemoryStore;

use serde::{Deserialize, Serialize};

use crate::audit::AuditEntry;
use crate::error::{PlannerError, PlannerResult};
use crate::models::BudgetItem;

/// A user's full collection of budget items, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetDocument {
    #[serde(default)]
    pub items: Vec<BudgetItem>,
}

impl BudgetDocument {
    pub fn new(items: Vec<BudgetItem>) -> Self {
        Self { items }
    }

    /// Check every item's invariants
    ///
    /// A document that fails here is corrupt; it is reported as a storage
    /// error rather than repaired.
    pub fn validate(&self) -> PlannerResult<()> {
        for (index, item) in self.items.iter().enumerate() {
            item.validate().map_err(|e| {
                PlannerError::Storage(format!(
                    "Invalid item #{} ({}) in budget document: {}",
                    index, item.id, e
                ))
            })?;
        }
        Ok(())
    }
}

/// Per-user persistence of budget documents and their audit trail
pub trait BudgetStore {
    /// Load a user's document; a user with no data gets an empty document
    fn load(&self, user: &str) -> PlannerResult<BudgetDocument>;

    /// Replace a user's document
    fn save(&self, user: &str, document: &BudgetDocument) -> PlannerResult<()>;

    /// Append an entry to a user's audit trail
    fn record(&self, user: &str, entry: &AuditEntry) -> PlannerResult<()>;

    /// The most recent `count` audit entries for a user, oldest first
    fn audit_trail(&self, user: &str, count: usize) -> PlannerResult<Vec<AuditEntry>>;
}
