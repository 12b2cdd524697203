//! The per-turn state machine.
//!
//! ```text
//! Idle → Assembling → AwaitingModel → ParsingReply → Encoding → Done
//!                          └──────────────→ Failed
//! ```
//!
//! A turn makes exactly one model call and always resolves to a
//! [`TurnReply`]. Errors become readable text in place of the answer.
//! The orchestrator never touches conversation history; the caller appends
//! the user message before the turn and the reply after it.

use std::sync::Arc;

use chrono::Utc;
use reviewdesk_codec::egress;
use reviewdesk_config::AppConfig;
use reviewdesk_core::error::Error;
use reviewdesk_core::event::{DomainEvent, EventBus};
use reviewdesk_core::message::{Attachment, Message};
use reviewdesk_core::mode::{OutputMode, RequestedFileType};
use reviewdesk_core::provider::{Provider, ProviderRequest, ProviderResponse, ReplyPart};
use reviewdesk_core::tool::FunctionCall;
use tracing::{debug, info, warn};

use crate::assembler::assemble;
use crate::contract::{GenerateFileArgs, generate_file_definition};
use crate::policy::policy_for;

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

pub const FILE_ONLY_FALLBACK: &str = "File generated successfully.";
pub const EMPTY_REPLY_FALLBACK: &str = "No response generated.";

pub const DEFAULT_SYSTEM_INSTRUCTION: &str = "\
You are an expert document reviewer.
Your job is to review, summarize, analyze and critique the documents the user uploads.
- Give clear, professional and well-structured answers.
- When the user asks for a particular kind of review (tone, compliance, technical), stay strictly on it.
- If a document is unclear or cannot be processed, ask clarifying questions.
- Format answers with Markdown (bullet points, bold for key insights).
- Keep a helpful, objective and analytical tone.
- When producing files, ONLY use the provided 'generate_file' tool. Never paste file content into the chat.
";

/// Where a turn is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    Idle,
    Assembling,
    AwaitingModel,
    ParsingReply,
    Encoding,
    Done,
    Failed,
}

/// One user submission.
#[derive(Debug, Clone, Default)]
pub struct TurnRequest {
    pub text: String,
    pub attachments: Vec<Attachment>,
    pub mode: OutputMode,
    pub requested_type: RequestedFileType,
}

impl TurnRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = attachments;
        self
    }

    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_requested_type(mut self, requested: RequestedFileType) -> Self {
        self.requested_type = requested;
        self
    }
}

/// The outcome of a turn.
#[derive(Debug, Clone)]
pub struct TurnReply {
    pub text: String,
    pub generated_files: Vec<Attachment>,
    /// `Done` or `Failed`
    pub state: TurnState,
}

impl TurnReply {
    pub fn is_failed(&self) -> bool {
        self.state == TurnState::Failed
    }

    /// The model message to append to history.
    pub fn into_message(self) -> Message {
        Message::model(self.text, self.generated_files)
    }
}

/// Runs review turns against a model provider.
pub struct Orchestrator {
    provider: Arc<dyn Provider>,
    model: String,
    temperature: f32,
    max_output_tokens: Option<u32>,
    system_instruction: String,
    event_bus: Option<Arc<EventBus>>,
}

impl Orchestrator {
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self {
            provider,
            model: DEFAULT_MODEL.into(),
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: None,
            system_instruction: DEFAULT_SYSTEM_INSTRUCTION.into(),
            event_bus: None,
        }
    }

    /// Build from loaded configuration.
    pub fn from_config(provider: Arc<dyn Provider>, config: &AppConfig) -> Self {
        let mut orchestrator = Self::new(provider)
            .with_model(&config.model)
            .with_temperature(config.temperature);
        if let Some(max) = config.max_output_tokens {
            orchestrator = orchestrator.with_max_output_tokens(max);
        }
        if let Some(instruction) = &config.review.system_instruction
            && !instruction.trim().is_empty()
        {
            orchestrator = orchestrator.with_system_instruction(instruction);
        }
        orchestrator
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_output_tokens(mut self, max: u32) -> Self {
        self.max_output_tokens = Some(max);
        self
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = instruction.into();
        self
    }

    /// Publish turn lifecycle events to `bus`.
    pub fn with_event_bus(mut self, bus: Arc<EventBus>) -> Self {
        self.event_bus = Some(bus);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn publish(&self, event: DomainEvent) {
        if let Some(bus) = &self.event_bus {
            bus.publish(event);
        }
    }

    fn enter(&self, state: TurnState) {
        debug!(?state, "Turn state");
    }

    /// Run one turn. `history` excludes the turn being submitted.
    ///
    /// A turn with no text, attachments or steering note fails without
    /// calling the provider.
    pub async fn run_turn(&self, history: &[Message], turn: &TurnRequest) -> TurnReply {
        self.enter(TurnState::Idle);
        info!(
            mode = %turn.mode,
            requested = %turn.requested_type,
            history = history.len(),
            attachments = turn.attachments.len(),
            "Starting review turn"
        );
        self.publish(DomainEvent::TurnStarted {
            mode: turn.mode.to_string(),
            attachments: turn.attachments.len(),
            history_len: history.len(),
            timestamp: Utc::now(),
        });

        match self.try_turn(history, turn).await {
            Ok((text, generated_files)) => {
                self.enter(TurnState::Done);
                let text = if !text.is_empty() {
                    text
                } else if !generated_files.is_empty() {
                    FILE_ONLY_FALLBACK.to_string()
                } else {
                    EMPTY_REPLY_FALLBACK.to_string()
                };
                self.publish(DomainEvent::TurnCompleted {
                    text_len: text.len(),
                    files: generated_files.len(),
                    timestamp: Utc::now(),
                });
                TurnReply {
                    text,
                    generated_files,
                    state: TurnState::Done,
                }
            }
            Err(e) => {
                self.enter(TurnState::Failed);
                warn!("Review turn failed: {e}");
                let error_message = e.to_string();
                self.publish(DomainEvent::TurnFailed {
                    error_message: error_message.clone(),
                    timestamp: Utc::now(),
                });
                TurnReply {
                    text: format!("Error during processing: {error_message}"),
                    generated_files: Vec::new(),
                    state: TurnState::Failed,
                }
            }
        }
    }

    async fn try_turn(
        &self,
        history: &[Message],
        turn: &TurnRequest,
    ) -> Result<(String, Vec<Attachment>), Error> {
        self.enter(TurnState::Assembling);
        let policy = policy_for(turn.mode, turn.requested_type);
        let contents = assemble(
            history,
            &turn.text,
            &turn.attachments,
            turn.mode,
            turn.requested_type,
        );
        // Gemini rejects a turn with no parts.
        if contents.last().is_none_or(|c| c.parts.is_empty()) {
            return Err(Error::EmptyTurn);
        }
        let tools = if policy.offer_tool {
            vec![generate_file_definition()]
        } else {
            Vec::new()
        };

        self.enter(TurnState::AwaitingModel);
        let request = ProviderRequest {
            model: self.model.clone(),
            contents,
            system_instruction: self.system_instruction.clone(),
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
            tools,
        };
        let response = self.provider.complete(request).await?;

        self.enter(TurnState::ParsingReply);
        let (text, calls) = parse_reply(&response, policy.offer_tool);
        self.publish(DomainEvent::ModelResponded {
            model: response.model.clone(),
            tokens_used: response.usage.as_ref().map_or(0, |u| u.total_tokens),
            tool_calls: calls.len(),
            timestamp: Utc::now(),
        });
        debug!(
            provider = self.provider.name(),
            model = %response.model,
            text_len = text.len(),
            file_calls = calls.len(),
            "Model replied"
        );

        self.enter(TurnState::Encoding);
        let files = self.encode_files(&calls);
        Ok((text, files))
    }

    /// Encode each requested file on its own; a failure drops only that file.
    fn encode_files(&self, calls: &[GenerateFileArgs]) -> Vec<Attachment> {
        calls
            .iter()
            .filter_map(|args| {
                match egress::encode(&args.filename, &args.content, args.mime_type.as_deref()) {
                    Ok(file) => {
                        self.publish(DomainEvent::FileGenerated {
                            name: file.name.clone(),
                            mime_type: file.mime_type.clone(),
                            bytes: file.decoded_len(),
                            timestamp: Utc::now(),
                        });
                        Some(file)
                    }
                    Err(e) => {
                        warn!(file = %args.filename, "Dropping generated file: {e}");
                        self.publish(DomainEvent::FileDropped {
                            name: args.filename.clone(),
                            reason: e.to_string(),
                            timestamp: Utc::now(),
                        });
                        None
                    }
                }
            })
            .collect()
    }
}

/// Concatenated text plus the `generate_file` calls of the first candidate.
/// Calls are only honoured when the tool was offered.
fn parse_reply(response: &ProviderResponse, tool_offered: bool) -> (String, Vec<GenerateFileArgs>) {
    let Some(candidate) = response.first_candidate() else {
        return (String::new(), Vec::new());
    };

    let mut text = String::new();
    let mut calls = Vec::new();
    for part in &candidate.parts {
        match part {
            ReplyPart::Text(fragment) => text.push_str(fragment),
            ReplyPart::FunctionCall(call) => {
                if let Some(args) = accept_call(call, tool_offered) {
                    calls.push(args);
                }
            }
        }
    }
    (text, calls)
}

fn accept_call(call: &FunctionCall, tool_offered: bool) -> Option<GenerateFileArgs> {
    if !tool_offered {
        debug!(tool = %call.name, "Ignoring tool call; no tool was offered");
        return None;
    }
    let args = GenerateFileArgs::from_call(call);
    if args.is_none() {
        debug!(tool = %call.name, "Ignoring call to undeclared tool");
    }
    args
}
