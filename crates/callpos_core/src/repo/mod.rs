//! Persistence layer for the ordered menu catalog.
//!
//! # Responsibility
//! - Keep SQL details and rank-key bookkeeping inside the repository boundary.
//!
//! # Invariants
//! - Listing order is deterministic: `rank ASC, uuid ASC`.
//! - A move touches exactly one row regardless of collection size.

pub mod catalog_repo;
