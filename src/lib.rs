//! Budget planner - personal budget rules engine
//!
//! This library keeps a per-user list of income and expense items, each
//! bound to a temporal scope (permanent, a year, or a month of a year) and a
//! recurrence type (monthly or one-off). On top of that list it answers
//! three questions: which items apply to a year, which apply to a set of
//! months, and what the year's totals look like once monthly items are
//! annualized.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and settings
//! - `error`: Custom error types
//! - `models`: Budget items, scopes and ids
//! - `storage`: Per-user document stores (JSON files or memory)
//! - `services`: The planner operations and year/month selection
//! - `reports`: The year dashboard
//! - `audit`: Audit trail of item changes
//! - `cli`: Command handlers for the `budget` binary
//!
//! # Example
//!
//! ```rust
//! use budget_planner::models::{IdStrategy, ItemDraft};
//! use budget_planner::services::BudgetPlanner;
//! use budget_planner::storage::MemoryStore;
//!
//! let store = MemoryStore::new();
//! let planner = BudgetPlanner::new(&store, IdStrategy::Sequential);
//!
//! let draft = ItemDraft::new("Salary", "Permanent", "Monthly", "Income", 5000);
//! let added = planner.add_budget_item("alice", &draft).unwrap();
//! assert!(added.success);
//!
//! let dashboard = planner.calculate_dashboard("alice", 2025).unwrap();
//! assert_eq!(dashboard.total_income.to_string(), "60000");
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{PlannerError, PlannerResult};
pub use services::BudgetPlanner;
