//! Service layer for the budget planner
//!
//! The service layer provides the operation surface on top of the storage
//! layer: validation, year and month selection, and dashboard totals.

pub mod filter;
pub mod planner;

pub use filter::{
    available_years, filter_by_months, includes_item, items_for_year, parse_months, MonthlyItems,
};
pub use planner::{
    AddItemResult, BudgetInfo, BudgetPlanner, DeleteItemResult, UpdateItemResult,
};
