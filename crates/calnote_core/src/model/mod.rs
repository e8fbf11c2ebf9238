//! Calendar domain model.
//!
//! # Responsibility
//! - Define the date key that correlates grid cells with stored rows.
//! - Define the persisted event record shape.
//!
//! # Invariants
//! - A `DateKey` always names a real day of the proleptic Gregorian calendar.
//! - The textual key form is `{year}-{month+1}-{day}` without zero-padding.

pub mod date_key;
pub mod event;
