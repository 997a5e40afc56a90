//! Session user selection and role capabilities.

use crate::model::user::{Role, User};
use crate::repo::{PartyRepository, RepoError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// No staff account holds the requested role.
    NoUserWithRole(Role),
    UserNotFound(String),
    NotLoggedIn,
    Repo(RepoError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoUserWithRole(role) => write!(f, "no user with role {role}"),
            Self::UserNotFound(id) => write!(f, "user not found: {id}"),
            Self::NotLoggedIn => write!(f, "no user is logged in"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for SessionError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { kind: "user", id } => Self::UserNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// What the session user may see and do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub see_revenue: bool,
    pub create_tasks: bool,
    pub process_renewals: bool,
    pub invoice_renewals: bool,
    pub own_tasks_only: bool,
}

impl Capabilities {
    pub fn for_role(role: Role) -> Self {
        Self {
            see_revenue: role.can_see_revenue(),
            create_tasks: role.can_create_tasks(),
            process_renewals: role.can_process_renewals(),
            invoice_renewals: role.can_invoice_renewals(),
            own_tasks_only: role.sees_only_own_tasks(),
        }
    }
}

pub struct SessionService<R: PartyRepository> {
    repo: R,
}

impl<R: PartyRepository> SessionService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Logs in as the first staff account holding `role`.
    pub fn login_as_role(&mut self, role: Role) -> Result<User, SessionError> {
        let user = self
            .repo
            .list_users()
            .into_iter()
            .find(|user| user.role == role)
            .ok_or(SessionError::NoUserWithRole(role))?;
        self.login(&user.id)
    }

    pub fn login(&mut self, user_id: &str) -> Result<User, SessionError> {
        self.repo.set_current_user(Some(user_id))?;
        let user = self
            .repo
            .current_user()
            .ok_or_else(|| SessionError::UserNotFound(user_id.to_string()))?;
        info!(
            "event=session_login module=session status=ok user_id={} role={}",
            user.id, user.role
        );
        Ok(user)
    }

    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.repo.set_current_user(None)?;
        info!("event=session_logout module=session status=ok");
        Ok(())
    }

    pub fn current_user(&self) -> Result<User, SessionError> {
        self.repo.current_user().ok_or(SessionError::NotLoggedIn)
    }

    pub fn capabilities(&self) -> Result<Capabilities, SessionError> {
        Ok(Capabilities::for_role(self.current_user()?.role))
    }
}
