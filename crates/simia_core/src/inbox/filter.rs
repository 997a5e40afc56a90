//! Mailbox folders and search.

use crate::model::email::Email;
use crate::query::Searchable;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

impl Searchable for Email {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.subject.as_str(), self.from.as_str(), self.body.as_str()];
        fields.extend(self.labels.iter().map(|label| label.display_name()));
        fields
    }
}

/// Sidebar folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EmailFilter {
    #[default]
    All,
    Unread,
    Starred,
    Archived,
    Sent,
    Drafts,
    Trash,
}

impl EmailFilter {
    pub const ALL: [EmailFilter; 7] = [
        EmailFilter::All,
        EmailFilter::Unread,
        EmailFilter::Starred,
        EmailFilter::Archived,
        EmailFilter::Sent,
        EmailFilter::Drafts,
        EmailFilter::Trash,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Unread => "unread",
            Self::Starred => "starred",
            Self::Archived => "archived",
            Self::Sent => "sent",
            Self::Drafts => "drafts",
            Self::Trash => "trash",
        }
    }

    /// Trashed mail only shows in Trash; archived mail only in Archived.
    pub fn admits(self, email: &Email) -> bool {
        match self {
            Self::Trash => email.is_trashed,
            _ if email.is_trashed => false,
            Self::Archived => email.is_archived,
            _ if email.is_archived => false,
            Self::All => true,
            Self::Unread => !email.is_read,
            Self::Starred => email.is_starred,
            Self::Sent => email.is_sent,
            Self::Drafts => email.is_draft,
        }
    }
}

impl Display for EmailFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmailFilter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|filter| filter.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| format!("unknown mail folder `{}`", value.trim()))
    }
}

/// Emails in `filter` matching `search`, newest first.
pub fn visible_emails<'a>(emails: &'a [Email], filter: EmailFilter, search: &str) -> Vec<&'a Email> {
    let mut visible = emails
        .iter()
        .filter(|email| filter.admits(email) && email.matches_term(search))
        .collect::<Vec<_>>();
    visible.sort_by(|a, b| b.date.cmp(&a.date));
    visible
}
