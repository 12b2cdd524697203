//! A review project driven turn by turn.
//!
//! The session is the calling context around the [`Orchestrator`]: it
//! appends the user message before the model call and the reply after it.
//! A user message is never retracted, even when the turn fails.

use reviewdesk_core::message::{Attachment, Conversation, Message};
use reviewdesk_core::mode::{OutputMode, RequestedFileType};

use crate::orchestrator::{Orchestrator, TurnReply, TurnRequest};

pub struct ReviewSession {
    orchestrator: Orchestrator,
    conversation: Conversation,
    mode: OutputMode,
    requested_type: RequestedFileType,
}

impl ReviewSession {
    pub fn new(orchestrator: Orchestrator, conversation: Conversation) -> Self {
        Self {
            orchestrator,
            conversation,
            mode: OutputMode::default(),
            requested_type: RequestedFileType::default(),
        }
    }

    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_requested_type(mut self, requested: RequestedFileType) -> Self {
        self.requested_type = requested;
        self
    }

    pub fn set_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    pub fn set_requested_type(&mut self, requested: RequestedFileType) {
        self.requested_type = requested;
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn requested_type(&self) -> RequestedFileType {
        self.requested_type
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Stage uploads for the next submission.
    pub fn stage(&mut self, attachments: impl IntoIterator<Item = Attachment>) {
        self.conversation.stage(attachments);
    }

    /// Submit `text` with whatever is staged, and record the reply.
    ///
    /// Returns `None` when there is neither text nor a staged attachment.
    pub async fn submit(&mut self, text: &str) -> Option<TurnReply> {
        if text.trim().is_empty() && self.conversation.drafts().is_empty() {
            return None;
        }

        let attachments = self.conversation.take_drafts();
        let turn = TurnRequest::new(text)
            .with_attachments(attachments.clone())
            .with_mode(self.mode)
            .with_requested_type(self.requested_type);

        let prior = self.conversation.len();
        self.conversation.push(Message::user(text, attachments));

        let history = &self.conversation.messages()[..prior];
        let reply = self.orchestrator.run_turn(history, &turn).await;
        self.conversation.push(reply.clone().into_message());
        Some(reply)
    }

    pub fn into_conversation(self) -> Conversation {
        self.conversation
    }
}
