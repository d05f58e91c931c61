//! Domain model for the ordered menu catalog.
//!
//! # Responsibility
//! - Define the canonical category/product records used by core logic.
//! - Keep the rank key as the single ordering attribute on every record.
//!
//! # Invariants
//! - Every record is identified by a stable UUID.
//! - Display order is encoded only in `rank`; no integer index is persisted.
//! - Deletion is represented by soft-delete tombstones, not hard delete.

pub mod menu;
