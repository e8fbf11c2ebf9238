//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep the controller and front ends decoupled from storage details.

pub mod event_service;
