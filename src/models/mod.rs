//! Core data models for the budget planner
//!
//! This module contains the data structures of the budgeting domain:
//! budget items, their temporal scopes, and identifiers.

pub mod ids;
pub mod item;
pub mod scope;

pub use ids::{IdGenerator, IdStrategy, ItemId};
pub use item::{
    parse_amount, BudgetItem, Category, ItemDraft, ItemFields, ItemPatch, ItemValidationError,
    TimeType,
};
pub use scope::{ItemScope, Scope, ScopeParseError};
