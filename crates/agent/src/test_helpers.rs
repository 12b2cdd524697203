//! Shared test helpers for orchestrator tests.

use reviewdesk_core::error::ProviderError;
use reviewdesk_core::provider::{
    Candidate, Provider, ProviderRequest, ProviderResponse, ReplyPart, Usage,
};
use reviewdesk_core::tool::FunctionCall;
use std::sync::Mutex;

/// A mock provider that replays scripted outcomes and records every request.
///
/// Panics if more calls are made than outcomes provided.
pub struct ScriptedProvider {
    outcomes: Mutex<Vec<Result<ProviderResponse, ProviderError>>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl ScriptedProvider {
    pub fn new(outcomes: Vec<Result<ProviderResponse, ProviderError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn single_text(text: &str) -> Self {
        Self::new(vec![Ok(response_with_parts(vec![ReplyPart::Text(text.into())]))])
    }

    pub fn failing(error: ProviderError) -> Self {
        Self::new(vec![Err(error)])
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted_mock"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let mut requests = self.requests.lock().unwrap();
        let outcomes = self.outcomes.lock().unwrap();
        let index = requests.len();
        if index >= outcomes.len() {
            panic!(
                "ScriptedProvider: no more outcomes (call #{}, have {})",
                index,
                outcomes.len()
            );
        }
        requests.push(request);
        outcomes[index].clone()
    }
}

/// A single-candidate response with the given parts.
pub fn response_with_parts(parts: Vec<ReplyPart>) -> ProviderResponse {
    ProviderResponse {
        candidates: vec![Candidate {
            parts,
            finish_reason: Some("STOP".into()),
        }],
        usage: Some(Usage {
            prompt_tokens: 10,
            completion_tokens: 5,
            total_tokens: 15,
        }),
        model: "mock-model".into(),
    }
}

/// A `generate_file` call part.
pub fn file_call(filename: &str, content: &str, mime_type: &str) -> ReplyPart {
    ReplyPart::FunctionCall(FunctionCall::new(
        "generate_file",
        serde_json::json!({
            "filename": filename,
            "content": content,
            "mimeType": mime_type,
        }),
    ))
}
