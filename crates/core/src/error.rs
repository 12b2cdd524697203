//! Error types for the ReviewDesk domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error enum.

use thiserror::Error;

/// The top-level error type for a review turn.
#[derive(Debug, Error)]
pub enum Error {
    // --- Provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Turn errors ---
    #[error("Nothing to send: the turn has no text or attachments")]
    EmptyTurn,
}

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Clone, Error)]
pub enum CodecError {
    #[error("Failed to read {name}: {reason}")]
    Read { name: String, reason: String },

    #[error("Failed to parse spreadsheet {name}: {reason}")]
    Spreadsheet { name: String, reason: String },

    #[error("Malformed CSV: {0}")]
    Csv(String),

    #[error("Failed to build file container: {0}")]
    Container(String),

    #[error("Invalid base64 payload: {0}")]
    Base64(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_displays_correctly() {
        let err = Error::Provider(ProviderError::ApiError {
            status_code: 429,
            message: "Too many requests".into(),
        });
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("Too many requests"));
    }

    #[test]
    fn codec_error_names_the_file() {
        let err = CodecError::Spreadsheet {
            name: "budget.xlsx".into(),
            reason: "invalid zip header".into(),
        };
        assert!(err.to_string().contains("budget.xlsx"));
        assert!(err.to_string().contains("invalid zip header"));
    }

    #[test]
    fn provider_error_converts_with_question_mark() {
        fn call() -> Result<(), Error> {
            Err(ProviderError::NotConfigured("no API key".into()))?
        }
        assert!(matches!(call(), Err(Error::Provider(ProviderError::NotConfigured(_)))));
    }
}
