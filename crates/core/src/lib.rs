//! # ReviewDesk Core
//!
//! Domain types, traits, and error definitions for the ReviewDesk
//! document-review assistant. This crate has **no framework dependencies**.
//! It defines the domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every seam to the outside world is a trait here (the model provider).
//! Implementations live in their respective crates. This enables:
//! - Swapping the remote model through configuration
//! - Testing the whole pipeline against scripted providers
//! - A clean dependency graph (all crates depend inward on core)

pub mod content;
pub mod error;
pub mod event;
pub mod message;
pub mod mode;
pub mod provider;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use content::{Content, ContentRole, InlineData, Part};
pub use error::{CodecError, Error, ProviderError};
pub use event::{DomainEvent, EventBus};
pub use message::{Attachment, Conversation, ConversationId, Message, Role};
pub use mode::{OutputMode, RequestedFileType};
pub use provider::{Candidate, Provider, ProviderRequest, ProviderResponse, ReplyPart, Usage};
pub use tool::{FunctionCall, ToolDefinition};
