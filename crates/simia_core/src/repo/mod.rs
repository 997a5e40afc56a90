//! Repository contracts between services and the store.
//!
//! # Responsibility
//! - Define use-case oriented data access traits.
//! - Keep collection handling inside `MemoryStore` implementations.
//!
//! # Invariants
//! - Writes call the entity's `validate()` before mutating the store.
//! - Mutations on unknown ids return `RepoError::NotFound`.
//! - Every trait is implemented for `&mut R`, so services can borrow a store.

pub mod ledger_repo;
pub mod mail_repo;
pub mod party_repo;
pub mod policy_repo;
pub mod task_repo;

use crate::config::AgencyConfig;
use crate::model::validation::ModelValidationError;
use crate::store::MemoryStore;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use ledger_repo::LedgerRepository;
pub use mail_repo::MailRepository;
pub use party_repo::PartyRepository;
pub use policy_repo::PolicyRepository;
pub use task_repo::TaskRepository;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by every entity collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    Validation(ModelValidationError),
    NotFound { kind: &'static str, id: String },
    Duplicate { kind: &'static str, id: String },
}

impl RepoError {
    pub(crate) fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub(crate) fn duplicate(kind: &'static str, id: impl Into<String>) -> Self {
        Self::Duplicate {
            kind,
            id: id.into(),
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::Duplicate { kind, id } => write!(f, "{kind} already exists: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound { .. } | Self::Duplicate { .. } => None,
        }
    }
}

impl From<ModelValidationError> for RepoError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Store-wide facilities every repository exposes.
pub trait StoreContext {
    fn agency_config(&self) -> &AgencyConfig;
    fn next_id(&mut self, prefix: &str) -> String;
}

impl StoreContext for MemoryStore {
    fn agency_config(&self) -> &AgencyConfig {
        self.config()
    }

    fn next_id(&mut self, prefix: &str) -> String {
        MemoryStore::next_id(self, prefix)
    }
}

impl<T: StoreContext + ?Sized> StoreContext for &mut T {
    fn agency_config(&self) -> &AgencyConfig {
        (**self).agency_config()
    }

    fn next_id(&mut self, prefix: &str) -> String {
        (**self).next_id(prefix)
    }
}

/// Index of the first record whose id equals `id`.
pub(crate) fn position_by_id<T>(items: &[T], id: &str, key: impl Fn(&T) -> &str) -> Option<usize> {
    items.iter().position(|item| key(item) == id)
}
