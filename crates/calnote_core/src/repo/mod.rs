//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the date-keyed data access contract.
//! - Isolate SQLite query details from service/controller orchestration.
//!
//! # Invariants
//! - Repository APIs return storage failures as errors; fallback policy
//!   belongs to the service layer.

pub mod event_repo;
