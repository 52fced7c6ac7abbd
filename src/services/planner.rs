//! Budget planner service
//!
//! The operation surface of the engine. Each call names the user whose
//! document it works on; mutations load the whole document, change it in
//! memory, and write it back. Validation and not-found problems come back
//! as `success: false` results, while storage problems propagate as errors.

use serde::{Deserialize, Serialize};

use crate::audit::AuditEntry;
use crate::error::{PlannerError, PlannerResult};
use crate::models::{
    BudgetItem, IdGenerator, IdStrategy, ItemDraft, ItemId, ItemPatch, ItemValidationError,
};
use crate::reports::Dashboard;
use crate::storage::{BudgetDocument, BudgetStore};

use super::filter::{available_years, filter_by_months, items_for_year, MonthlyItems};

/// Items of a user, optionally narrowed to a year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetInfo {
    pub items: Vec<BudgetItem>,
    pub available_years: Vec<i32>,
}

/// Outcome of adding an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddItemResult {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<ItemId>,
}

impl AddItemResult {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            item_id: None,
        }
    }
}

/// Outcome of updating an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateItemResult {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<BudgetItem>,
}

impl UpdateItemResult {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            item: None,
        }
    }
}

/// Outcome of deleting an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteItemResult {
    pub success: bool,
    pub message: String,
}

/// Service for per-user budget planning
pub struct BudgetPlanner<'a> {
    store: &'a dyn BudgetStore,
    ids: IdGenerator,
}

impl<'a> BudgetPlanner<'a> {
    /// Create a planner over a store, generating ids with `strategy`
    pub fn new(store: &'a dyn BudgetStore, strategy: IdStrategy) -> Self {
        Self {
            store,
            ids: IdGenerator::new(strategy),
        }
    }

    /// All of a user's items, or only those counting towards `year`
    ///
    /// `available_years` always covers the whole document so a caller can
    /// offer the other years as choices.
    pub fn get_user_budget_info(&self, user: &str, year: Option<i32>) -> PlannerResult<BudgetInfo> {
        let document = self.store.load(user)?;
        let available_years = available_years(&document.items);

        let items = match year {
            Some(year) => items_for_year(document.items, year),
            None => document.items,
        };
        tracing::debug!(user, ?year, items = items.len(), "selected budget items");

        Ok(BudgetInfo {
            items,
            available_years,
        })
    }

    /// Validate a draft and append it to the user's document
    pub fn add_budget_item(&self, user: &str, draft: &ItemDraft) -> PlannerResult<AddItemResult> {
        let fields = match draft.validate() {
            Ok(fields) => fields,
            Err(e) => {
                tracing::debug!(user, error = %e, "rejected new budget item");
                return Ok(AddItemResult::failure(e.to_string()));
            }
        };

        let mut document = self.store.load(user)?;
        let id = self
            .ids
            .generate(document.items.iter().map(|item| &item.id));
        let item = BudgetItem::new(id.clone(), fields);

        if item.scope.is_fallback() {
            tracing::warn!(
                item_id = %item.id,
                scope = item.scope.as_str(),
                "scope not recognized, item will count as permanent"
            );
        }

        document.items.push(item.clone());
        self.store.save(user, &document)?;
        self.record(user, AuditEntry::create(&item));

        tracing::info!(user, item_id = %id, name = %item.name, "added budget item");

        Ok(AddItemResult {
            success: true,
            message: "Budget item added successfully".to_string(),
            item_id: Some(id),
        })
    }

    /// Change some fields of an existing item
    pub fn update_budget_item(
        &self,
        user: &str,
        item_id: &str,
        patch: &ItemPatch,
    ) -> PlannerResult<UpdateItemResult> {
        if patch.is_empty() {
            return Ok(UpdateItemResult::failure(
                ItemValidationError::NothingToUpdate.to_string(),
            ));
        }

        let mut document = self.store.load(user)?;
        let Some(index) = document.items.iter().position(|item| item.id == item_id) else {
            return Ok(UpdateItemResult::failure(
                PlannerError::item_not_found(item_id).to_string(),
            ));
        };

        let before = document.items[index].clone();
        let after = match patch.apply_to(&before) {
            Ok(after) => after,
            Err(e) => return Ok(UpdateItemResult::failure(e.to_string())),
        };

        document.items[index] = after.clone();
        self.store.save(user, &document)?;
        self.record(user, AuditEntry::update(&before, &after));

        tracing::info!(user, item_id, "updated budget item");

        Ok(UpdateItemResult {
            success: true,
            message: "Budget item updated successfully".to_string(),
            item: Some(after),
        })
    }

    /// Remove the item with the given id
    pub fn delete_budget_item(&self, user: &str, item_id: &str) -> PlannerResult<DeleteItemResult> {
        let document = self.store.load(user)?;
        let (removed, kept): (Vec<_>, Vec<_>) = document
            .items
            .into_iter()
            .partition(|item| item.id == item_id);

        if removed.is_empty() {
            return Ok(DeleteItemResult {
                success: false,
                message: PlannerError::item_not_found(item_id).to_string(),
            });
        }

        self.store.save(user, &BudgetDocument::new(kept))?;
        for item in &removed {
            self.record(user, AuditEntry::delete(item));
        }

        tracing::info!(user, item_id, "deleted budget item");

        Ok(DeleteItemResult {
            success: true,
            message: "Budget item deleted successfully".to_string(),
        })
    }

    /// Year totals over every item counting towards `year`
    pub fn calculate_dashboard(&self, user: &str, year: i32) -> PlannerResult<Dashboard> {
        let items = self.get_user_budget_info(user, Some(year))?.items;
        Dashboard::calculate(year, &items)
    }

    /// Items of `year` visible in the selected months, split by category
    ///
    /// `months == None` means the whole year.
    pub fn get_items_by_month(
        &self,
        user: &str,
        year: i32,
        months: Option<&[u32]>,
    ) -> PlannerResult<MonthlyItems> {
        let items = self.get_user_budget_info(user, Some(year))?.items;
        Ok(filter_by_months(items, months))
    }

    /// The most recent `count` changes to a user's items, oldest first
    pub fn audit_trail(&self, user: &str, count: usize) -> PlannerResult<Vec<AuditEntry>> {
        self.store.audit_trail(user, count)
    }

    // The document is already saved at this point; a lost audit line must
    // not turn the change into a failure.
    fn record(&self, user: &str, entry: AuditEntry) {
        if let Err(e) = self.store.record(user, &entry) {
            tracing::warn!(user, item_id = %entry.item_id, error = %e, "failed to write audit entry");
        }
    }
}
