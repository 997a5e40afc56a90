//! One-to-one chat thread.
//!
//! # Invariants
//! - Message text is trimmed and never blank.
//! - Delivery status only moves forward: sending, delivered, read.

use crate::format::format_long_date;
use crate::model::chat::{ChatMessage, DeliveryStatus, MessageId};
use crate::model::user::UserId;
use chrono::{DateTime, NaiveDate, Utc};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Quick reactions offered under each message.
pub const REACTIONS: [&str; 6] = ["👍", "❤️", "😂", "😮", "😢", "🎉"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    BlankMessage,
    MessageNotFound(MessageId),
}

impl Display for ChatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankMessage => write!(f, "message must not be blank"),
            Self::MessageNotFound(id) => write!(f, "message not found: {id}"),
        }
    }
}

impl Error for ChatError {}

/// Messages of one calendar day under a display heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayGroup<'a> {
    pub day: NaiveDate,
    pub heading: String,
    pub messages: Vec<&'a ChatMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatThread {
    pub me: UserId,
    pub peer: UserId,
    messages: Vec<ChatMessage>,
    next_seq: u64,
}

impl ChatThread {
    pub fn new(me: impl Into<UserId>, peer: impl Into<UserId>) -> Self {
        Self {
            me: me.into(),
            peer: peer.into(),
            messages: Vec::new(),
            next_seq: 1,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn message(&self, id: &str) -> Option<&ChatMessage> {
        self.messages.iter().find(|message| message.id == id)
    }

    /// Queues an outgoing message in `Sending` state.
    pub fn send(&mut self, text: &str, at: DateTime<Utc>) -> Result<MessageId, ChatError> {
        let sender = self.me.clone();
        self.push(sender, text, at, DeliveryStatus::Sending)
    }

    /// Moves a message one delivery step forward; read messages stay read.
    pub fn advance(&mut self, id: &str) -> Result<DeliveryStatus, ChatError> {
        let message = self.message_mut(id)?;
        if let Some(next) = message.status.advance() {
            message.status = next;
        }
        Ok(message.status)
    }

    /// Peer answers `Reply to: <text>`; the original message becomes read.
    pub fn simulate_reply(&mut self, to: &str, at: DateTime<Utc>) -> Result<MessageId, ChatError> {
        let original = self.message_mut(to)?;
        original.status = DeliveryStatus::Read;
        let reply = format!("Reply to: {}", original.text);
        let peer = self.peer.clone();
        self.push(peer, &reply, at, DeliveryStatus::Read)
    }

    pub fn toggle_reaction(&mut self, id: &str, emoji: &str, user_id: &str) -> Result<(), ChatError> {
        self.message_mut(id)?.toggle_reaction(emoji, user_id);
        Ok(())
    }

    /// Messages grouped per calendar day, oldest day first.
    pub fn grouped_by_day(&self, today: NaiveDate) -> Vec<DayGroup<'_>> {
        let mut ordered = self.messages.iter().collect::<Vec<_>>();
        ordered.sort_by_key(|message| message.sent_at);
        let mut groups: Vec<DayGroup<'_>> = Vec::new();
        for message in ordered {
            let day = message.sent_at.date_naive();
            if let Some(group) = groups.last_mut().filter(|group| group.day == day) {
                group.messages.push(message);
                continue;
            }
            groups.push(DayGroup {
                day,
                heading: day_heading(day, today),
                messages: vec![message],
            });
        }
        groups
    }

    fn push(
        &mut self,
        sender: UserId,
        text: &str,
        at: DateTime<Utc>,
        status: DeliveryStatus,
    ) -> Result<MessageId, ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::BlankMessage);
        }
        let id = format!("m-{}", self.next_seq);
        self.next_seq += 1;
        self.messages.push(ChatMessage {
            id: id.clone(),
            sender_id: sender,
            text: text.to_string(),
            sent_at: at,
            status,
            reactions: Vec::new(),
        });
        debug!(
            "event=chat_message module=chat status=ok message_id={} chars={}",
            id,
            text.chars().count()
        );
        Ok(id)
    }

    fn message_mut(&mut self, id: &str) -> Result<&mut ChatMessage, ChatError> {
        self.messages
            .iter_mut()
            .find(|message| message.id == id)
            .ok_or_else(|| ChatError::MessageNotFound(id.to_string()))
    }
}

/// `Today`, `Yesterday` or `March 5, 2024`.
pub fn day_heading(day: NaiveDate, today: NaiveDate) -> String {
    if day == today {
        "Today".to_string()
    } else if today.pred_opt() == Some(day) {
        "Yesterday".to_string()
    } else {
        format_long_date(day)
    }
}
