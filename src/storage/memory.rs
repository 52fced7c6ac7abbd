//! In-memory backend
//!
//! Keeps documents in a map; useful for tests and for embedding the engine
//! behind a caller that owns persistence itself.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::audit::AuditEntry;
use crate::config::paths::validate_user;
use crate::error::{PlannerError, PlannerResult};

use super::{BudgetDocument, BudgetStore};

/// Budget store holding every user's document in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<HashMap<String, BudgetDocument>>,
    audit: RwLock<HashMap<String, Vec<AuditEntry>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BudgetStore for MemoryStore {
    fn load(&self, user: &str) -> PlannerResult<BudgetDocument> {
        validate_user(user)?;
        let documents = self
            .documents
            .read()
            .map_err(|e| PlannerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let document = documents.get(user).cloned().unwrap_or_default();
        document.validate()?;
        Ok(document)
    }

    fn save(&self, user: &str, document: &BudgetDocument) -> PlannerResult<()> {
        validate_user(user)?;
        let mut documents = self
            .documents
            .write()
            .map_err(|e| PlannerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        documents.insert(user.to_string(), document.clone());
        Ok(())
    }

    fn record(&self, user: &str, entry: &AuditEntry) -> PlannerResult<()> {
        validate_user(user)?;
        let mut audit = self
            .audit
            .write()
            .map_err(|e| PlannerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        audit.entry(user.to_string()).or_default().push(entry.clone());
        Ok(())
    }

    fn audit_trail(&self, user: &str, count: usize) -> PlannerResult<Vec<AuditEntry>> {
        validate_user(user)?;
        let audit = self
            .audit
            .read()
            .map_err(|e| PlannerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let entries = audit.get(user).map(Vec::as_slice).unwrap_or_default();
        let start = entries.len().saturating_sub(count);
        Ok(entries[start..].to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_store_loads_empty_document() {
        let store = MemoryStore::new();
        assert_eq!(store.load("alice").unwrap(), BudgetDocument::default());
    }

    #[test]
    fn test_save_replaces_document() {
        let store = MemoryStore::new();
        store.save("alice", &BudgetDocument::default()).unwrap();
        assert!(store.load("alice").unwrap().items.is_empty());
        assert!(store.audit_trail("alice", 5).unwrap().is_empty());
    }

    #[test]
    fn test_load_rejects_invalid_document() {
        let store = MemoryStore::new();
        let document: BudgetDocument = serde_json::from_value(json!({
            "items": [{
                "id": "item_1",
                "name": "   ",
                "scope": "2025",
                "time_type": "Monthly",
                "category": "Expense",
                "amount": 10,
                "created_at": "2025-01-01T00:00:00Z"
            }]
        }))
        .unwrap();
        store.save("alice", &document).unwrap();

        let err = store.load("alice").unwrap_err();
        assert!(matches!(err, PlannerError::Storage(_)));
        assert!(err.to_string().contains("item_1"));
    }
}
