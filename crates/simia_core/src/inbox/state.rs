//! Inbox reducer.

use crate::inbox::filter::{visible_emails, EmailFilter};
use crate::model::email::{Email, EmailId};

/// Every transition the inbox screen can request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboxAction {
    SetEmails(Vec<Email>),
    SelectEmail(EmailId),
    DeselectEmail(EmailId),
    ToggleSelect(EmailId),
    SelectAll,
    DeselectAll,
    ToggleSelectAll,
    ToggleStar(EmailId),
    MarkAsRead(Vec<EmailId>),
    MarkAsUnread(Vec<EmailId>),
    Archive(Vec<EmailId>),
    /// Moves to trash.
    Delete(Vec<EmailId>),
    SetSearchQuery(String),
    SetActiveFilter(EmailFilter),
    /// Opens an email and marks it read; `None` closes the reader.
    OpenEmail(Option<EmailId>),
    SetComposeOpen(bool),
    SetPreviewOpen(bool),
    SetLoading(bool),
    SetRefreshing(bool),
    SetError(Option<String>),
    LoadMore(Vec<Email>),
    SetHasMore(bool),
}

/// Toolbar operations applied to the current targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkOp {
    MarkAsRead,
    MarkAsUnread,
    Archive,
    Delete,
}

impl BulkOp {
    fn into_action(self, ids: Vec<EmailId>) -> InboxAction {
        match self {
            Self::MarkAsRead => InboxAction::MarkAsRead(ids),
            Self::MarkAsUnread => InboxAction::MarkAsUnread(ids),
            Self::Archive => InboxAction::Archive(ids),
            Self::Delete => InboxAction::Delete(ids),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboxState {
    pub emails: Vec<Email>,
    pub selected: Vec<EmailId>,
    pub current_page: usize,
    pub has_more: bool,
    pub is_loading: bool,
    pub is_refreshing: bool,
    pub error: Option<String>,
    pub search_query: String,
    pub active_filter: EmailFilter,
    pub open_email: Option<EmailId>,
    pub is_compose_open: bool,
    pub is_preview_open: bool,
}

impl Default for InboxState {
    fn default() -> Self {
        Self {
            emails: Vec::new(),
            selected: Vec::new(),
            current_page: 1,
            has_more: false,
            is_loading: false,
            is_refreshing: false,
            error: None,
            search_query: String::new(),
            active_filter: EmailFilter::All,
            open_email: None,
            is_compose_open: false,
            is_preview_open: false,
        }
    }
}

impl InboxState {
    pub fn new(emails: Vec<Email>) -> Self {
        Self::default().reduce(InboxAction::SetEmails(emails))
    }

    /// Returns the state after `action`.
    pub fn reduce(mut self, action: InboxAction) -> Self {
        self.apply(action);
        self
    }

    /// In-place form of `reduce`.
    pub fn apply(&mut self, action: InboxAction) {
        match action {
            InboxAction::SetEmails(emails) => {
                self.emails = dedup_by_id(emails);
                let emails = &self.emails;
                self.selected.retain(|id| emails.iter().any(|email| &email.id == id));
                if self
                    .open_email
                    .as_ref()
                    .is_some_and(|id| !self.emails.iter().any(|email| &email.id == id))
                {
                    self.open_email = None;
                }
            }
            InboxAction::SelectEmail(id) => self.select(id),
            InboxAction::DeselectEmail(id) => self.selected.retain(|selected| selected != &id),
            InboxAction::ToggleSelect(id) => {
                if self.is_selected(&id) {
                    self.selected.retain(|selected| selected != &id);
                } else {
                    self.select(id);
                }
            }
            InboxAction::SelectAll => self.selected = self.visible_ids(),
            InboxAction::DeselectAll => self.selected.clear(),
            InboxAction::ToggleSelectAll => {
                if self.all_visible_selected() {
                    self.selected.clear();
                } else {
                    self.selected = self.visible_ids();
                }
            }
            InboxAction::ToggleStar(id) => {
                self.update(&[id], |email| email.is_starred = !email.is_starred);
            }
            InboxAction::MarkAsRead(ids) => self.update(&ids, |email| email.is_read = true),
            InboxAction::MarkAsUnread(ids) => self.update(&ids, |email| email.is_read = false),
            InboxAction::Archive(ids) => {
                self.update(&ids, |email| email.is_archived = true);
                self.selected.retain(|id| !ids.contains(id));
            }
            InboxAction::Delete(ids) => {
                self.update(&ids, |email| email.is_trashed = true);
                self.selected.retain(|id| !ids.contains(id));
            }
            InboxAction::SetSearchQuery(query) => self.search_query = query,
            InboxAction::SetActiveFilter(filter) => {
                self.active_filter = filter;
                self.current_page = 1;
            }
            InboxAction::OpenEmail(id) => {
                if let Some(id) = &id {
                    self.update(std::slice::from_ref(id), |email| email.is_read = true);
                }
                self.open_email = id.filter(|id| self.email(id).is_some());
            }
            InboxAction::SetComposeOpen(open) => self.is_compose_open = open,
            InboxAction::SetPreviewOpen(open) => self.is_preview_open = open,
            InboxAction::SetLoading(loading) => self.is_loading = loading,
            InboxAction::SetRefreshing(refreshing) => self.is_refreshing = refreshing,
            InboxAction::SetError(error) => self.error = error,
            InboxAction::LoadMore(emails) => {
                for email in emails {
                    if self.email(&email.id).is_none() {
                        self.emails.push(email);
                    }
                }
                self.current_page += 1;
            }
            InboxAction::SetHasMore(has_more) => self.has_more = has_more,
        }
    }

    /// Selection when non-empty, else the open email.
    pub fn action_targets(&self) -> Vec<EmailId> {
        if !self.selected.is_empty() {
            return self.selected.clone();
        }
        self.open_email.iter().cloned().collect()
    }

    /// Applies `op` to the current targets and clears the selection.
    ///
    /// Returns the ids that were targeted.
    pub fn apply_bulk(&mut self, op: BulkOp) -> Vec<EmailId> {
        let targets = self.action_targets();
        if !targets.is_empty() {
            self.apply(op.into_action(targets.clone()));
        }
        self.selected.clear();
        targets
    }

    pub fn visible(&self) -> Vec<&Email> {
        visible_emails(&self.emails, self.active_filter, &self.search_query)
    }

    pub fn email(&self, id: &str) -> Option<&Email> {
        self.emails.iter().find(|email| email.id == id)
    }

    pub fn opened(&self) -> Option<&Email> {
        self.open_email.as_deref().and_then(|id| self.email(id))
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|selected| selected == id)
    }

    pub fn all_visible_selected(&self) -> bool {
        let visible = self.visible();
        !visible.is_empty() && visible.iter().all(|email| self.is_selected(&email.id))
    }

    /// Unread mail still in the inbox proper.
    pub fn unread_count(&self) -> usize {
        self.emails
            .iter()
            .filter(|email| !email.is_read && !email.is_archived && !email.is_trashed)
            .count()
    }

    fn visible_ids(&self) -> Vec<EmailId> {
        self.visible().into_iter().map(|email| email.id.clone()).collect()
    }

    fn select(&mut self, id: EmailId) {
        if !self.is_selected(&id) && self.email(&id).is_some() {
            self.selected.push(id);
        }
    }

    fn update(&mut self, ids: &[EmailId], mut change: impl FnMut(&mut Email)) {
        for email in self.emails.iter_mut().filter(|email| ids.contains(&email.id)) {
            change(email);
        }
    }
}

fn dedup_by_id(emails: Vec<Email>) -> Vec<Email> {
    let mut unique: Vec<Email> = Vec::with_capacity(emails.len());
    for email in emails {
        if !unique.iter().any(|existing| existing.id == email.id) {
            unique.push(email);
        }
    }
    unique
}
