//! Inbox actions with store write-back.
//!
//! # Responsibility
//! - Run inbox actions through the local reducer.
//! - Persist read, starred, archived and trashed flags through `MailRepository`.
//!
//! # Invariants
//! - Actions naming an unknown email are rejected before any state changes.

use crate::inbox::{BulkOp, InboxAction, InboxState};
use crate::model::email::{Email, EmailId};
use crate::repo::{MailRepository, RepoError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboxServiceError {
    EmailNotFound(EmailId),
    Repo(RepoError),
}

impl Display for InboxServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmailNotFound(id) => write!(f, "email not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for InboxServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::EmailNotFound(_) => None,
        }
    }
}

impl From<RepoError> for InboxServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { kind: "email", id } => Self::EmailNotFound(id),
            other => Self::Repo(other),
        }
    }
}

pub struct InboxService<R: MailRepository> {
    repo: R,
    state: InboxState,
}

impl<R: MailRepository> InboxService<R> {
    /// Loads the mailbox from the repository.
    pub fn new(repo: R) -> Self {
        let state = InboxState::new(repo.list_emails());
        Self { repo, state }
    }

    pub fn state(&self) -> &InboxState {
        &self.state
    }

    pub fn visible(&self) -> Vec<&Email> {
        self.state.visible()
    }

    /// Applies `action` locally, then writes changed flags back.
    pub fn dispatch(&mut self, action: InboxAction) -> Result<(), InboxServiceError> {
        let touched = flag_targets(&action);
        if let Some(missing) = touched.iter().find(|id| self.state.email(id).is_none()) {
            return Err(InboxServiceError::EmailNotFound(missing.clone()));
        }
        self.state.apply(action);
        self.persist(&touched)
    }

    /// Runs a toolbar action on the selection, else the open email.
    pub fn bulk(&mut self, op: BulkOp) -> Result<Vec<EmailId>, InboxServiceError> {
        let targets = self.state.apply_bulk(op);
        self.persist(&targets)?;
        info!(
            "event=inbox_bulk module=inbox status=ok op={:?} count={}",
            op,
            targets.len()
        );
        Ok(targets)
    }

    /// Reloads the mailbox from the repository, keeping filter and search.
    pub fn refresh(&mut self) {
        self.state.apply(InboxAction::SetRefreshing(true));
        self.state.apply(InboxAction::SetEmails(self.repo.list_emails()));
        self.state.apply(InboxAction::SetRefreshing(false));
        info!(
            "event=inbox_refresh module=inbox status=ok count={}",
            self.state.emails.len()
        );
    }

    fn persist(&mut self, ids: &[EmailId]) -> Result<(), InboxServiceError> {
        for id in ids {
            if let Some(email) = self.state.email(id) {
                self.repo.update_email(email)?;
            }
        }
        Ok(())
    }
}

/// Emails whose stored flags `action` changes.
fn flag_targets(action: &InboxAction) -> Vec<EmailId> {
    match action {
        InboxAction::ToggleStar(id) => vec![id.clone()],
        InboxAction::OpenEmail(Some(id)) => vec![id.clone()],
        InboxAction::MarkAsRead(ids)
        | InboxAction::MarkAsUnread(ids)
        | InboxAction::Archive(ids)
        | InboxAction::Delete(ids) => ids.clone(),
        _ => Vec::new(),
    }
}
