//! Mailbox screen state.
//!
//! # Responsibility
//! - Hold one local copy of the mailbox for optimistic updates.
//! - Derive the visible list from filter and search on demand.
//!
//! # Invariants
//! - Each email exists exactly once in `InboxState::emails`.
//! - Selection holds no duplicates.
//! - Archived and deleted emails leave the selection in the same transition.

pub mod filter;
pub mod state;

pub use filter::{visible_emails, EmailFilter};
pub use state::{BulkOp, InboxAction, InboxState};
