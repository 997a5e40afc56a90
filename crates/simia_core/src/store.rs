//! In-memory agency store.
//!
//! # Responsibility
//! - Own the session user and every entity collection.
//! - Issue unique timestamp ids.
//!
//! # Invariants
//! - Ids issued by one store are strictly increasing per store, even within
//!   the same millisecond.
//! - Collections keep insertion order; views derive their own ordering.

use crate::config::AgencyConfig;
use crate::model::client::Client;
use crate::model::email::Email;
use crate::model::ledger::{Expense, Invoice};
use crate::model::policy::{Claim, Renewal};
use crate::model::task::Task;
use crate::model::user::{MemberProfile, User, UserId};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Serializable contents of a store, as loaded from fixtures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreSnapshot {
    pub users: Vec<User>,
    pub profiles: Vec<MemberProfile>,
    pub tasks: Vec<Task>,
    pub claims: Vec<Claim>,
    pub renewals: Vec<Renewal>,
    pub clients: Vec<Client>,
    pub invoices: Vec<Invoice>,
    pub expenses: Vec<Expense>,
    pub emails: Vec<Email>,
}

/// Single shared state container.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    config: AgencyConfig,
    current_user: Option<UserId>,
    last_id_millis: i64,
    pub(crate) users: Vec<User>,
    pub(crate) profiles: Vec<MemberProfile>,
    pub(crate) tasks: Vec<Task>,
    pub(crate) claims: Vec<Claim>,
    pub(crate) renewals: Vec<Renewal>,
    pub(crate) clients: Vec<Client>,
    pub(crate) invoices: Vec<Invoice>,
    pub(crate) expenses: Vec<Expense>,
    pub(crate) emails: Vec<Email>,
}

impl MemoryStore {
    pub fn new(config: AgencyConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Builds a store with no session user from snapshot contents.
    pub fn from_snapshot(config: AgencyConfig, snapshot: StoreSnapshot) -> Self {
        Self {
            config,
            current_user: None,
            last_id_millis: 0,
            users: snapshot.users,
            profiles: snapshot.profiles,
            tasks: snapshot.tasks,
            claims: snapshot.claims,
            renewals: snapshot.renewals,
            clients: snapshot.clients,
            invoices: snapshot.invoices,
            expenses: snapshot.expenses,
            emails: snapshot.emails,
        }
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            users: self.users.clone(),
            profiles: self.profiles.clone(),
            tasks: self.tasks.clone(),
            claims: self.claims.clone(),
            renewals: self.renewals.clone(),
            clients: self.clients.clone(),
            invoices: self.invoices.clone(),
            expenses: self.expenses.clone(),
            emails: self.emails.clone(),
        }
    }

    pub fn config(&self) -> &AgencyConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: AgencyConfig) {
        self.config = config;
    }

    /// Session user, if someone is logged in.
    pub fn current_user(&self) -> Option<&User> {
        let id = self.current_user.as_deref()?;
        self.users.iter().find(|user| user.id == id)
    }

    pub(crate) fn set_current_user_id(&mut self, id: Option<UserId>) {
        self.current_user = id;
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn profiles(&self) -> &[MemberProfile] {
        &self.profiles
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    pub fn renewals(&self) -> &[Renewal] {
        &self.renewals
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn invoices(&self) -> &[Invoice] {
        &self.invoices
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn emails(&self) -> &[Email] {
        &self.emails
    }

    /// Issues `<prefix>-<epoch millis>`, bumping past the last issued value.
    pub fn next_id(&mut self, prefix: &str) -> String {
        let now = Utc::now().timestamp_millis();
        let millis = if now <= self.last_id_millis {
            self.last_id_millis + 1
        } else {
            now
        };
        self.last_id_millis = millis;
        format!("{prefix}-{millis}")
    }
}
