//! Use-case services.
//!
//! # Responsibility
//! - Implement mutating workflows over repository traits.
//! - Enforce role guards and workflow transitions above the repository layer.
//!
//! # Invariants
//! - Services never reach into `MemoryStore` directly.
//! - Repository not-found errors surface as semantic service variants.

pub mod accounting_service;
pub mod client_service;
pub mod inbox_service;
pub mod renewal_service;
pub mod session_service;
pub mod task_service;

/// Trims a form value, treating blank input as absent.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
