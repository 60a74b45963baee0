//! Domain model for reservation data.
//!
//! # Responsibility
//! - Define the record shape handed back to callers of the repository.
//!
//! # Invariants
//! - Records are immutable once built.

pub mod entry;
