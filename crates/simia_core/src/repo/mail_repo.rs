//! Mailbox persistence contract.

use crate::model::email::Email;
use crate::repo::{position_by_id, RepoError, RepoResult, StoreContext};
use crate::store::MemoryStore;

pub trait MailRepository: StoreContext {
    fn get_email(&self, id: &str) -> Option<Email>;
    fn list_emails(&self) -> Vec<Email>;
    /// Replaces the stored copy of an existing email.
    fn update_email(&mut self, email: &Email) -> RepoResult<()>;
}

impl MailRepository for MemoryStore {
    fn get_email(&self, id: &str) -> Option<Email> {
        self.emails.iter().find(|email| email.id == id).cloned()
    }

    fn list_emails(&self) -> Vec<Email> {
        self.emails.clone()
    }

    fn update_email(&mut self, email: &Email) -> RepoResult<()> {
        email.validate()?;
        let index = position_by_id(&self.emails, &email.id, |e| e.id.as_str())
            .ok_or_else(|| RepoError::not_found("email", email.id.clone()))?;
        self.emails[index] = email.clone();
        Ok(())
    }
}

impl<T: MailRepository + ?Sized> MailRepository for &mut T {
    fn get_email(&self, id: &str) -> Option<Email> {
        (**self).get_email(id)
    }

    fn list_emails(&self) -> Vec<Email> {
        (**self).list_emails()
    }

    fn update_email(&mut self, email: &Email) -> RepoResult<()> {
        (**self).update_email(email)
    }
}
