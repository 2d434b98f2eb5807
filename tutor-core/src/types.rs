//! Core types: chat message, sender, subject context and learner profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::FlowError;

/// Position of a message in its conversation. Assigned by the store, strictly increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MessageId(pub u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The learner.
    User,
    /// The tutor (model replies and fallback notices).
    System,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => f.write_str("user"),
            Sender::System => f.write_str("system"),
        }
    }
}

/// Payload kind. Only text is ever produced; `Image` is reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Text,
    Image,
}

/// One immutable entry of a conversation. Content is never blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    kind: MessageKind,
    sender: Sender,
    content: String,
    created_at: DateTime<Utc>,
}

impl Message {
    /// Builds a text message. Blank content is rejected with [`FlowError::EmptyInput`].
    pub fn text(id: MessageId, sender: Sender, content: impl Into<String>) -> Result<Self, FlowError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(FlowError::EmptyInput);
        }
        Ok(Self {
            id,
            kind: MessageKind::Text,
            sender,
            content,
            created_at: Utc::now(),
        })
    }

    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// The subject the learner is currently working in. Written at subject selection, read everywhere else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveSubject {
    pub subject_id: String,
    pub subject_name: String,
}

impl ActiveSubject {
    pub fn new(subject_id: impl Into<String>, subject_name: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            subject_name: subject_name.into(),
        }
    }
}

/// Learner data that shapes the tutor instruction. `grade_range` is the onboarding value ("1", "2", "3").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnerProfile {
    pub grade_range: String,
}

impl Default for LearnerProfile {
    fn default() -> Self {
        Self {
            grade_range: "1".to_string(),
        }
    }
}
