//! Subcommand implementations.

pub mod chat;
pub mod config_cmd;
pub mod doctor;
pub mod generate;
pub mod ingest;
pub mod onboard;
pub mod output;
pub mod review;
pub mod schema;

use std::path::PathBuf;
use std::sync::Arc;

use reviewdesk_agent::Orchestrator;
use reviewdesk_config::AppConfig;
use reviewdesk_core::event::EventBus;

/// Load the config and fail early, with setup hints, when no key is set.
pub fn load_ready_config() -> Result<AppConfig, Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    if !config.has_api_key() {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set one of these environment variables:");
        eprintln!("    REVIEWDESK_API_KEY=...   (recommended)");
        eprintln!("    GEMINI_API_KEY=...");
        eprintln!("    API_KEY=...");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    }

    Ok(config)
}

/// Orchestrator wired to the configured provider.
pub fn build_orchestrator(config: &AppConfig, event_bus: Option<Arc<EventBus>>) -> Orchestrator {
    let provider = reviewdesk_providers::build_from_config(config);
    let orchestrator = Orchestrator::from_config(provider, config);
    match event_bus {
        Some(bus) => orchestrator.with_event_bus(bus),
        None => orchestrator,
    }
}

/// `--out` if given, else the configured output directory.
pub fn output_dir(out: Option<PathBuf>, config: &AppConfig) -> PathBuf {
    out.unwrap_or_else(|| PathBuf::from(&config.review.output_dir))
}
