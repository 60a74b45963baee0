//! Repository layer for reservation reads.
//!
//! # Responsibility
//! - Define the read contract callers depend on.
//! - Isolate query shape and driver details from the CLI.
//!
//! # Invariants
//! - The layer is read-only; there are no insert/update/delete paths.
//! - Errors are typed per stage (config, connection, query, row data).

pub mod entry_repo;
pub mod query;
