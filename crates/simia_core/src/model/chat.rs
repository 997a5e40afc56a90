//! Direct messages between two staff members.

use crate::model::user::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type MessageId = String;

/// Delivery progress of an outgoing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Sending,
    Delivered,
    Read,
}

impl DeliveryStatus {
    /// Next step, or `None` once read.
    pub fn advance(self) -> Option<Self> {
        match self {
            Self::Sending => Some(Self::Delivered),
            Self::Delivered => Some(Self::Read),
            Self::Read => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reaction {
    pub emoji: String,
    pub user_ids: Vec<UserId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: MessageId,
    pub sender_id: UserId,
    pub text: String,
    pub sent_at: DateTime<Utc>,
    pub status: DeliveryStatus,
    #[serde(default)]
    pub reactions: Vec<Reaction>,
}

impl ChatMessage {
    /// Adds `user_id` to the `emoji` reaction, or removes it when already present.
    ///
    /// Reactions with no remaining users are dropped.
    pub fn toggle_reaction(&mut self, emoji: &str, user_id: &str) {
        match self.reactions.iter_mut().find(|r| r.emoji == emoji) {
            Some(reaction) => {
                if let Some(index) = reaction.user_ids.iter().position(|id| id == user_id) {
                    reaction.user_ids.remove(index);
                } else {
                    reaction.user_ids.push(user_id.to_string());
                }
            }
            None => self.reactions.push(Reaction {
                emoji: emoji.to_string(),
                user_ids: vec![user_id.to_string()],
            }),
        }
        self.reactions.retain(|reaction| !reaction.user_ids.is_empty());
    }

    pub fn reaction_count(&self, emoji: &str) -> usize {
        self.reactions
            .iter()
            .find(|r| r.emoji == emoji)
            .map_or(0, |r| r.user_ids.len())
    }
}
