//! Remote model providers for ReviewDesk.
//!
//! All providers implement the `reviewdesk_core::Provider` trait.
//! [`build_from_config`] selects and configures one from `AppConfig`.

pub mod gemini;

use std::sync::Arc;

use reviewdesk_config::AppConfig;
use reviewdesk_core::provider::Provider;

pub use gemini::GeminiProvider;

/// Build the configured provider.
pub fn build_from_config(config: &AppConfig) -> Arc<dyn Provider> {
    let api_key = config.api_key.clone().unwrap_or_default();
    let provider = GeminiProvider::new(api_key)
        .with_base_url(&config.provider.api_url)
        .with_timeout(config.provider.timeout_secs);
    Arc::new(provider)
}
