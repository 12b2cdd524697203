//! Conversation assembly: prior messages plus the in-flight turn, flattened
//! into the role-tagged content list the model receives.
//!
//! Within every turn the inline documents come first and the text last.
//! Turns keep their chronological order and the new turn is always the
//! final entry.

use reviewdesk_core::content::{Content, ContentRole, Part};
use reviewdesk_core::message::{Attachment, Message};
use reviewdesk_core::mode::{OutputMode, RequestedFileType};
use tracing::trace;

use crate::policy::policy_for;

/// Build the model transcript.
///
/// `history` must not contain the new turn; it is appended here from
/// `new_text` and `new_attachments`.
pub fn assemble(
    history: &[Message],
    new_text: &str,
    new_attachments: &[Attachment],
    mode: OutputMode,
    requested: RequestedFileType,
) -> Vec<Content> {
    let mut contents: Vec<Content> = history
        .iter()
        .filter_map(|msg| {
            let content = history_turn(msg);
            if content.parts.is_empty() {
                trace!(message_id = %msg.id, "Skipping history message with nothing to send");
                return None;
            }
            Some(content)
        })
        .collect();

    let mut parts: Vec<Part> = new_attachments.iter().map(Part::from).collect();
    let mut instruction = new_text.to_string();
    if let Some(steering) = policy_for(mode, requested).steering {
        instruction.push_str(&steering);
    }
    if !instruction.is_empty() {
        parts.push(Part::text(instruction));
    }
    contents.push(Content {
        role: ContentRole::User,
        parts,
    });

    contents
}

fn history_turn(msg: &Message) -> Content {
    let mut parts: Vec<Part> = msg.attachments.iter().map(Part::from).collect();
    if !msg.text.is_empty() {
        parts.push(Part::text(msg.text.as_str()));
    }
    Content {
        role: ContentRole::from(&msg.role),
        parts,
    }
}
