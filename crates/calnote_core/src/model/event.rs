//! Persisted event record.
//!
//! # Invariants
//! - `text` is a single trimmed, non-empty line.
//! - Records for one date are ordered by `id` (insertion order).

use crate::model::date_key::DateKey;
use serde::Serialize;

/// One stored line of user text for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventRecord {
    /// Surrogate row id (`events.id`).
    pub id: i64,
    pub date: DateKey,
    pub text: String,
}
