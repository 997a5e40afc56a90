//! Read-only view models, one per back-office screen.
//!
//! # Responsibility
//! - Derive filtered, sorted and paginated lists from store slices.
//! - Compute screen aggregates (counts, totals, trends).
//!
//! # Invariants
//! - Views never mutate the store.
//! - Time-relative views take `today` from the caller.

pub mod accounting;
pub mod claims;
pub mod dashboard;
pub mod renewals;
pub mod tasks;
pub mod team;
