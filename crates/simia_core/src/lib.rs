//! Core domain logic for the Simia agency back office.
//! This crate is the single source of truth for business invariants.

pub mod chat;
pub mod config;
pub mod dates;
pub mod export;
pub mod format;
pub mod inbox;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod seed;
pub mod service;
pub mod store;
pub mod views;

pub use config::{AgencyConfig, ConfigError};
pub use logging::{init_logging, logging_status, LogLevel, LoggingError};
pub use model::user::{Role, User};
pub use model::Kes;
pub use query::{Page, PageRequest, SortDirection};
pub use repo::{RepoError, RepoResult};
pub use seed::{demo_snapshot, demo_store, SeedError};
pub use service::session_service::{Capabilities, SessionError, SessionService};
pub use store::{MemoryStore, StoreSnapshot};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
