//! Month grid arithmetic.
//!
//! # Responsibility
//! - Compute the weekday of the first day and the day count of a month.
//! - Expand a month into Sunday-first week rows for renderers.
//!
//! # Invariants
//! - Proleptic Gregorian rules apply to every `i64` year, including year 0
//!   and negative (astronomical) years.
//! - All functions are pure and reentrant.

mod month_layout;

pub use month_layout::{days_in_month, is_leap_year, layout, weekday_of, MonthLayout, Week};
