//! Core of the calnote desktop calendar.
//!
//! Month grid arithmetic, date-keyed event storage on SQLite, and the
//! UI-agnostic controller/editor pair that front ends drive.

pub mod controller;
pub mod db;
pub mod editor;
pub mod grid;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use controller::{
    CalendarController, ControllerError, DayCell, EditOutcome, Mode, MonthView, Selection,
};
pub use editor::{split_lines, EventEditor};
pub use grid::{days_in_month, is_leap_year, layout, MonthLayout};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::date_key::{DateKey, DateKeyError, Month};
pub use model::event::EventRecord;
pub use repo::event_repo::{EventRepository, RepoError, RepoResult, SqliteEventRepository};
pub use service::event_service::{DayMarker, EventService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
