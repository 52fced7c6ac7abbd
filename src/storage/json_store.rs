//! JSON file backend
//!
//! Stores `users/<user>/budget.json` with atomic writes and appends audit
//! entries to `users/<user>/audit.log`.

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::paths::PlannerPaths;
use crate::error::PlannerResult;

use super::file_io::{read_json, write_json_atomic};
use super::{BudgetDocument, BudgetStore};

/// Budget store backed by one JSON file per user
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    paths: PlannerPaths,
}

impl JsonFileStore {
    /// Create a store rooted at the given paths, creating directories
    pub fn new(paths: PlannerPaths) -> PlannerResult<Self> {
        paths.ensure_directories()?;
        Ok(Self { paths })
    }

    pub fn paths(&self) -> &PlannerPaths {
        &self.paths
    }
}

impl BudgetStore for JsonFileStore {
    fn load(&self, user: &str) -> PlannerResult<BudgetDocument> {
        let path = self.paths.budget_file(user)?;
        let document: BudgetDocument = read_json(&path)?;
        document.validate()?;
        tracing::debug!(user, items = document.items.len(), "loaded budget document");
        Ok(document)
    }

    fn save(&self, user: &str, document: &BudgetDocument) -> PlannerResult<()> {
        let path = self.paths.budget_file(user)?;
        write_json_atomic(&path, document)?;
        tracing::debug!(user, items = document.items.len(), "saved budget document");
        Ok(())
    }

    fn record(&self, user: &str, entry: &AuditEntry) -> PlannerResult<()> {
        AuditLogger::new(self.paths.audit_log(user)?).log(entry)
    }

    fn audit_trail(&self, user: &str, count: usize) -> PlannerResult<Vec<AuditEntry>> {
        AuditLogger::new(self.paths.audit_log(user)?).read_recent(count)
    }
}
