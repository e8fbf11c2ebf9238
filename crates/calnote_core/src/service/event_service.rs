//! Event use-case service.
//!
//! # Responsibility
//! - Provide per-date read/write entry points for the controller and editor.
//! - Apply the recoverable storage error policy: log, then fall back.
//!
//! # Invariants
//! - Read failures never panic and never masquerade as "no events"; they
//!   surface as `DayMarker::Unavailable` or an explicit error.
//! - Event text is never written to logs; only date keys and counts are.

use crate::model::date_key::DateKey;
use crate::repo::event_repo::{EventRepository, RepoResult};
use log::{error, info};
use serde::Serialize;

/// Event state of one day as shown on the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DayMarker {
    /// At least one line is stored. `tooltip` joins the lines with `\n`
    /// and is `None` when the lines themselves could not be read.
    HasEvents { tooltip: Option<String> },
    Empty,
    /// The store could not be queried; rendered like `Empty` but flagged.
    Unavailable,
}

impl DayMarker {
    pub fn has_events(&self) -> bool {
        matches!(self, Self::HasEvents { .. })
    }
}

/// Service wrapper owning the event repository.
pub struct EventService<R: EventRepository> {
    repo: R,
}

impl<R: EventRepository> EventService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Read-only access to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Runs the idempotent schema bootstrap on the repository.
    pub fn init(&mut self) -> RepoResult<()> {
        self.repo.init().inspect_err(|err| {
            error!(
                "event=store_init module=service status=error error_code=init_failed error={}",
                err
            );
        })
    }

    pub fn has_events(&self, date: &DateKey) -> RepoResult<bool> {
        self.repo.has_events(date).inspect_err(|err| {
            error!(
                "event=events_query module=service status=error op=has_events date={} error={}",
                date, err
            );
        })
    }

    pub fn list_events(&self, date: &DateKey) -> RepoResult<Vec<String>> {
        self.repo.list_events(date).inspect_err(|err| {
            error!(
                "event=events_query module=service status=error op=list_events date={} error={}",
                date, err
            );
        })
    }

    /// Replaces the full line set for `date` and returns the stored lines.
    ///
    /// Blank lines are dropped and the rest trimmed before storage.
    pub fn replace_events(
        &mut self,
        date: &DateKey,
        lines: &[String],
    ) -> RepoResult<Vec<String>> {
        match self.repo.replace_events(date, lines) {
            Ok(stored) => {
                info!(
                    "event=events_replace module=service status=ok date={} lines={}",
                    date,
                    stored.len()
                );
                Ok(stored)
            }
            Err(err) => {
                error!(
                    "event=events_replace module=service status=error date={} error={}",
                    date, err
                );
                Err(err)
            }
        }
    }

    /// Computes the grid marker for `date`.
    ///
    /// Falls back to `Unavailable` when the store cannot be queried.
    pub fn day_marker(&self, date: &DateKey) -> DayMarker {
        match self.has_events(date) {
            Ok(true) => DayMarker::HasEvents {
                tooltip: self.list_events(date).ok().map(|lines| lines.join("\n")),
            },
            Ok(false) => DayMarker::Empty,
            Err(_) => DayMarker::Unavailable,
        }
    }
}
