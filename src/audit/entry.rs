//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::BudgetItem;

use super::diff::generate_diff;

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    /// ID of the affected item
    pub item_id: String,

    /// Name of the affected item at the time of the operation
    pub item_name: String,

    /// The item before the operation (updates and deletes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// The item after the operation (creates and updates)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    /// Human-readable diff summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    /// Entry for a newly added item
    pub fn create(item: &BudgetItem) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Create,
            item_id: item.id.to_string(),
            item_name: item.name.clone(),
            before: None,
            after: serde_json::to_value(item).ok(),
            diff_summary: None,
        }
    }

    /// Entry for an updated item, with a diff of the changed fields
    pub fn update(before: &BudgetItem, after: &BudgetItem) -> Self {
        let before_json = serde_json::to_value(before).ok();
        let after_json = serde_json::to_value(after).ok();
        let diff_summary = match (&before_json, &after_json) {
            (Some(b), Some(a)) => generate_diff(b, a),
            _ => None,
        };

        Self {
            timestamp: Utc::now(),
            operation: Operation::Update,
            item_id: after.id.to_string(),
            item_name: after.name.clone(),
            before: before_json,
            after: after_json,
            diff_summary,
        }
    }

    /// Entry for a removed item
    pub fn delete(item: &BudgetItem) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Delete,
            item_id: item.id.to_string(),
            item_name: item.name.clone(),
            before: serde_json::to_value(item).ok(),
            after: None,
            diff_summary: None,
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} ({})",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.item_id,
            self.item_name
        );

        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }

        output
    }
}
