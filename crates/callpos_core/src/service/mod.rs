//! Use-case services layered above the repositories.
//!
//! # Responsibility
//! - Validate caller input before it reaches SQL or rank arithmetic.
//! - Map repository errors into caller-facing service errors.

pub mod catalog_service;
