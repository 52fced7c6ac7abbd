//! Budget item identifiers
//!
//! Ids look like `item_20251201_093015_3`: a local timestamp followed by a
//! suffix, so they sort by creation time. The sequential strategy uses the
//! store's item count as the suffix; the random strategy uses a UUID
//! fragment for writers in separate processes.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Prefix of every generated id
pub const ID_PREFIX: &str = "item_";

/// strftime format of the timestamp part of an id
pub const ID_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Identifier of a budget item, unique within one user's store
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Get the id text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether the id is empty
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl PartialEq<str> for ItemId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ItemId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// How the suffix of a new id is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// Current item count, bumped past any collision
    #[default]
    Sequential,
    /// Eight hex characters of a random UUID
    Random,
}

/// Generates ids for new budget items
#[derive(Debug, Clone, Copy, Default)]
pub struct IdGenerator {
    strategy: IdStrategy,
}

impl IdGenerator {
    /// Create a generator using the given strategy
    pub fn new(strategy: IdStrategy) -> Self {
        Self { strategy }
    }

    /// Generate an id not present in `existing`, stamped with the current time
    pub fn generate<'a, I>(&self, existing: I) -> ItemId
    where
        I: IntoIterator<Item = &'a ItemId>,
        I::IntoIter: Clone,
    {
        self.generate_at(Local::now().naive_local(), existing)
    }

    /// Generate an id not present in `existing`, stamped with `now`
    pub fn generate_at<'a, I>(&self, now: NaiveDateTime, existing: I) -> ItemId
    where
        I: IntoIterator<Item = &'a ItemId>,
        I::IntoIter: Clone,
    {
        let existing = existing.into_iter();
        let stamp = now.format(ID_TIMESTAMP_FORMAT).to_string();
        let taken = |candidate: &str| existing.clone().any(|id| id == candidate);

        match self.strategy {
            IdStrategy::Sequential => {
                let mut suffix = existing.clone().count();
                loop {
                    let candidate = format!("{}{}_{}", ID_PREFIX, stamp, suffix);
                    if !taken(&candidate) {
                        return ItemId(candidate);
                    }
                    suffix += 1;
                }
            }
            IdStrategy::Random => loop {
                let token = Uuid::new_v4().simple().to_string();
                let candidate = format!("{}{}_{}", ID_PREFIX, stamp, &token[..8]);
                if !taken(&candidate) {
                    return ItemId(candidate);
                }
            },
        }
    }
}
