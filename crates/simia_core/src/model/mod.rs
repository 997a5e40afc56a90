//! Flat entity records held by the agency store.
//!
//! # Responsibility
//! - Define the canonical shapes of every entity the views and services use.
//! - Own field-level validation shared by repositories and services.
//!
//! # Invariants
//! - Entities reference each other by loose string ids only.
//! - Entities are never hard-deleted; emails use tombstone flags.

pub mod chat;
pub mod client;
pub mod email;
pub mod ledger;
pub mod policy;
pub mod task;
pub mod user;
pub mod validation;

/// Whole Kenyan shillings.
pub type Kes = i64;
