//! Domain model for the rating management system.
//!
//! # Responsibility
//! - Define the five persisted entities and their caller-input shapes.
//! - Own the closed enumerations and request-shape constraint checks.
//!
//! # Invariants
//! - Every entity is identified by a storage-assigned integer id.
//! - Timestamps are epoch milliseconds assigned by storage, never by callers.

pub mod content;
pub mod project;
pub mod rasa;
pub mod rating;
pub mod user;
pub mod validation;
