//! Reports for the budget planner
//!
//! Provides the year dashboard: annualized income, expense and surplus.

pub mod dashboard;

pub use dashboard::Dashboard;
