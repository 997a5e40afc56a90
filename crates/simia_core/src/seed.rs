//! Bundled demo data for the agency.
//!
//! # Responsibility
//! - Provide a populated store for the CLI and for tests.
//!
//! # Invariants
//! - Every seeded entity passes its model validation.
//! - Seeded stores start logged out.

use crate::config::AgencyConfig;
use crate::model::validation::ModelValidationError;
use crate::store::{MemoryStore, StoreSnapshot};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

const SEED_JSON: &str = include_str!("../fixtures/seed.json");

/// Seed fixture failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedError {
    Parse(String),
    Invalid(String),
}

impl Display for SeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(message) => write!(f, "seed data is not valid JSON: {message}"),
            Self::Invalid(message) => write!(f, "seed data failed validation: {message}"),
        }
    }
}

impl Error for SeedError {}

/// Parses the bundled fixture.
pub fn demo_snapshot() -> Result<StoreSnapshot, SeedError> {
    let snapshot: StoreSnapshot = serde_json::from_str(SEED_JSON).map_err(|err| {
        error!("event=seed_load module=seed status=error error_code=parse");
        SeedError::Parse(err.to_string())
    })?;
    validate_snapshot(&snapshot)?;
    Ok(snapshot)
}

/// Builds a logged-out store over the bundled fixture.
pub fn demo_store(config: AgencyConfig) -> Result<MemoryStore, SeedError> {
    let snapshot = demo_snapshot()?;
    info!(
        "event=seed_load module=seed status=ok users={} tasks={} claims={} renewals={} emails={}",
        snapshot.users.len(),
        snapshot.tasks.len(),
        snapshot.claims.len(),
        snapshot.renewals.len(),
        snapshot.emails.len()
    );
    Ok(MemoryStore::from_snapshot(config, snapshot))
}

fn validate_snapshot(snapshot: &StoreSnapshot) -> Result<(), SeedError> {
    let invalid = |err: ModelValidationError| SeedError::Invalid(err.to_string());
    for user in &snapshot.users {
        user.validate().map_err(invalid)?;
    }
    for task in &snapshot.tasks {
        task.validate().map_err(invalid)?;
    }
    for claim in &snapshot.claims {
        claim.validate().map_err(invalid)?;
    }
    for renewal in &snapshot.renewals {
        renewal.validate().map_err(invalid)?;
    }
    for client in &snapshot.clients {
        client.validate().map_err(invalid)?;
    }
    for invoice in &snapshot.invoices {
        invoice.validate().map_err(invalid)?;
    }
    for expense in &snapshot.expenses {
        expense.validate().map_err(invalid)?;
    }
    for email in &snapshot.emails {
        email.validate().map_err(invalid)?;
    }
    Ok(())
}
