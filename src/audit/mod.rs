//! Audit trail of budget item changes
//!
//! Records every create, update and delete with before/after snapshots in
//! an append-only, line-delimited JSON log kept next to each user's
//! budget document.
//!
//! - `AuditEntry`: one logged operation with timestamp, item identity and
//!   optional before/after values.
//! - `AuditLogger`: appends entries to a JSONL file and reads them back.
//! - `generate_diff`: field-level summary of what an update changed.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
