//! Conversation content blocks — what a single model invocation sees.
//!
//! A turn is a role-tagged list of parts. Parts are either inline binary
//! payloads (an attachment's base64 data plus its MIME type) or text.

use serde::{Deserialize, Serialize};

use crate::message::{Attachment, Role};

/// Transcript role for a content turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentRole {
    User,
    Model,
}

impl From<&Role> for ContentRole {
    fn from(role: &Role) -> Self {
        match role {
            Role::User => ContentRole::User,
            Role::Model => ContentRole::Model,
        }
    }
}

/// Inline base64 payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

/// A single content block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    Text {
        text: String,
    },
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, Part::InlineData { .. })
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Part::Text { text } => Some(text),
            Part::InlineData { .. } => None,
        }
    }
}

impl From<&Attachment> for Part {
    fn from(att: &Attachment) -> Self {
        Part::InlineData {
            inline_data: InlineData {
                mime_type: att.mime_type.clone(),
                data: att.data.clone(),
            },
        }
    }
}

/// One role-tagged turn of the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    pub role: ContentRole,
    pub parts: Vec<Part>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_part_serializes_camel_case() {
        let att = Attachment::new("notes.pdf", "application/pdf", "JVBERi0=");
        let json = serde_json::to_value(Part::from(&att)).unwrap();
        assert_eq!(json["inlineData"]["mimeType"], "application/pdf");
        assert_eq!(json["inlineData"]["data"], "JVBERi0=");
    }

    #[test]
    fn text_part_serializes_bare() {
        let json = serde_json::to_string(&Part::text("hello")).unwrap();
        assert_eq!(json, r#"{"text":"hello"}"#);
    }

    #[test]
    fn role_mapping() {
        assert_eq!(ContentRole::from(&Role::User), ContentRole::User);
        assert_eq!(ContentRole::from(&Role::Model), ContentRole::Model);
    }
}
