//! Inbox messages.

use crate::model::validation::{require_text, ModelValidationError};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub type EmailId = String;

const PREVIEW_CHARS: usize = 100;
const VISIBLE_LABEL_BADGES: usize = 2;

static SENDER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?P<name>[^<]*?)\s*<(?P<addr>[^>]+)>\s*$").expect("valid sender regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailLabel {
    Work,
    Personal,
    Important,
    Travel,
    Finance,
    Social,
}

impl EmailLabel {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::Personal => "Personal",
            Self::Important => "Important",
            Self::Travel => "Travel",
            Self::Finance => "Finance",
            Self::Social => "Social",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailAttachment {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub size: u64,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Email {
    pub id: EmailId,
    pub from: String,
    #[serde(default)]
    pub to: Vec<String>,
    #[serde(default)]
    pub cc: Vec<String>,
    pub subject: String,
    pub body: String,
    #[serde(default)]
    pub snippet: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub is_starred: bool,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default)]
    pub is_trashed: bool,
    #[serde(default)]
    pub is_draft: bool,
    #[serde(default)]
    pub is_sent: bool,
    #[serde(default)]
    pub labels: Vec<EmailLabel>,
    #[serde(default)]
    pub attachments: Vec<EmailAttachment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
}

impl Email {
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_text("email.id", &self.id)?;
        require_text("email.from", &self.from)?;
        Ok(())
    }

    /// `Jane Doe <jane@x.com>` → `Jane Doe`; bare addresses are returned as-is.
    pub fn sender_name(&self) -> &str {
        sender_display_name(&self.from)
    }

    /// Address part of the sender field.
    pub fn sender_address(&self) -> &str {
        SENDER_RE
            .captures(&self.from)
            .and_then(|caps| caps.name("addr"))
            .map(|m| m.as_str().trim())
            .unwrap_or_else(|| self.from.trim())
    }

    pub fn subject_or_placeholder(&self) -> &str {
        if self.subject.trim().is_empty() {
            "(No subject)"
        } else {
            &self.subject
        }
    }

    /// Snippet, else the first 100 characters of the body; `...` marks a longer body.
    pub fn preview(&self) -> String {
        let mut preview = if self.snippet.trim().is_empty() {
            self.body.chars().take(PREVIEW_CHARS).collect::<String>()
        } else {
            self.snippet.clone()
        };
        if self.body.chars().count() > PREVIEW_CHARS {
            preview.push_str("...");
        }
        preview
    }

    /// First two label names plus the count of labels not shown.
    pub fn label_badges(&self) -> (Vec<&'static str>, usize) {
        let shown = self
            .labels
            .iter()
            .take(VISIBLE_LABEL_BADGES)
            .map(|label| label.display_name())
            .collect();
        let hidden = self.labels.len().saturating_sub(VISIBLE_LABEL_BADGES);
        (shown, hidden)
    }

    pub fn has_attachments(&self) -> bool {
        !self.attachments.is_empty()
    }
}

pub fn sender_display_name(from: &str) -> &str {
    match SENDER_RE.captures(from).and_then(|caps| caps.name("name")) {
        Some(name) if !name.as_str().is_empty() => name.as_str(),
        _ => from.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::sender_display_name;

    #[test]
    fn sender_name_strips_address() {
        assert_eq!(sender_display_name("Jane Doe <jane@x.com>"), "Jane Doe");
        assert_eq!(sender_display_name("client@techcorp.com"), "client@techcorp.com");
        assert_eq!(sender_display_name("<jane@x.com>"), "<jane@x.com>");
    }
}
