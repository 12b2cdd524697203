//! Message, Attachment and Conversation domain types.
//!
//! These are the core value objects that flow through the entire system:
//! user uploads documents → Attachment Codec builds attachments → a user
//! message is appended → the model replies with text and generated files.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a conversation (a review project).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationId(pub String);

impl ConversationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Default for ConversationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConversationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The role of a message sender in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The reviewer using the assistant
    User,
    /// The remote language model
    Model,
}

/// A file carried through the conversation as a base64 payload.
///
/// Either a user upload (after ingestion) or a model-generated file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub name: String,
    pub mime_type: String,
    /// Base64-encoded bytes
    pub data: String,
}

impl Attachment {
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        data: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Approximate decoded size in bytes.
    pub fn decoded_len(&self) -> usize {
        let padding = self.data.bytes().rev().take_while(|b| *b == b'=').count();
        (self.data.len() / 4 * 3).saturating_sub(padding)
    }
}

/// A single message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique message ID
    pub id: String,

    /// Who sent this message
    pub role: Role,

    /// The text content
    pub text: String,

    /// Timestamp
    pub timestamp: DateTime<Utc>,

    /// Input documents (user messages only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,

    /// Files produced by the model (model messages only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub generated_files: Vec<Attachment>,
}

impl Message {
    /// Create a new user message.
    pub fn user(text: impl Into<String>, attachments: Vec<Attachment>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::User,
            text: text.into(),
            timestamp: Utc::now(),
            attachments,
            generated_files: Vec::new(),
        }
    }

    /// Create a new model message.
    pub fn model(text: impl Into<String>, generated_files: Vec<Attachment>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::Model,
            text: text.into(),
            timestamp: Utc::now(),
            attachments: Vec::new(),
            generated_files,
        }
    }
}

/// A review project: an append-only log of messages plus the attachments
/// staged for the next turn.
///
/// Messages can only be appended. There is no way to edit or remove a
/// message once it has been pushed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    /// Unique conversation ID
    pub id: ConversationId,

    /// Project name
    pub title: String,

    /// When this conversation was created
    pub created_at: DateTime<Utc>,

    /// When the last message was added
    pub updated_at: DateTime<Utc>,

    messages: Vec<Message>,

    /// Attachments uploaded but not yet submitted
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    draft_attachments: Vec<Attachment>,
}

impl Conversation {
    /// Create a new empty conversation.
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: ConversationId::new(),
            title: title.into(),
            created_at: now,
            updated_at: now,
            messages: Vec::new(),
            draft_attachments: Vec::new(),
        }
    }

    /// Append a message to the log.
    pub fn push(&mut self, message: Message) {
        self.updated_at = Utc::now();
        self.messages.push(message);
    }

    /// All messages, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Stage attachments for the next submitted turn.
    pub fn stage(&mut self, attachments: impl IntoIterator<Item = Attachment>) {
        self.draft_attachments.extend(attachments);
    }

    pub fn drafts(&self) -> &[Attachment] {
        &self.draft_attachments
    }

    /// Take the staged attachments, leaving none behind.
    pub fn take_drafts(&mut self) -> Vec<Attachment> {
        std::mem::take(&mut self.draft_attachments)
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new("Untitled project")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_user_message() {
        let msg = Message::user("Review this contract", vec![]);
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.text, "Review this contract");
        assert!(msg.generated_files.is_empty());
    }

    #[test]
    fn conversation_tracks_updates() {
        let mut conv = Conversation::new("Q3 audit");
        let created = conv.created_at;

        conv.push(Message::user("First message", vec![]));
        assert_eq!(conv.len(), 1);
        assert!(conv.updated_at >= created);
    }

    #[test]
    fn conversation_preserves_append_order() {
        let mut conv = Conversation::default();
        conv.push(Message::user("one", vec![]));
        conv.push(Message::model("two", vec![]));
        conv.push(Message::user("three", vec![]));
        let texts: Vec<&str> = conv.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
    }

    #[test]
    fn drafts_are_taken_once() {
        let mut conv = Conversation::default();
        conv.stage([Attachment::new("a.txt", "text/plain", "YQ==")]);
        assert_eq!(conv.drafts().len(), 1);
        let taken = conv.take_drafts();
        assert_eq!(taken.len(), 1);
        assert!(conv.drafts().is_empty());
    }

    #[test]
    fn message_serialization_uses_camel_case() {
        let msg = Message::model(
            "Here is your file",
            vec![Attachment::new("out.txt", "text/plain", "aGk=")],
        );
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "model");
        assert_eq!(json["generatedFiles"][0]["mimeType"], "text/plain");
        assert!(json.get("attachments").is_none());

        let back: Message = serde_json::from_value(json).unwrap();
        assert_eq!(back.generated_files.len(), 1);
    }

    #[test]
    fn decoded_len_accounts_for_padding() {
        assert_eq!(Attachment::new("a", "text/plain", "aGk=").decoded_len(), 2);
        assert_eq!(Attachment::new("a", "text/plain", "aGV5").decoded_len(), 3);
    }
}
