//! `reviewdesk generate` — Encode a file the way a `generate_file` call would.

use std::path::PathBuf;

use reviewdesk_codec::encode;
use reviewdesk_config::AppConfig;

use super::{output, output_dir};

pub async fn run(
    filename: String,
    content_file: PathBuf,
    out: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = tokio::fs::read_to_string(&content_file)
        .await
        .map_err(|e| format!("Failed to read {}: {e}", content_file.display()))?;

    let attachment = encode(&filename, &content, None)?;
    println!("  {} → {}", attachment.name, attachment.mime_type);

    let dir = match out {
        Some(dir) => dir,
        None => output_dir(None, &AppConfig::load().unwrap_or_default()),
    };
    let saved = output::save_files(&dir, &[attachment])?;
    output::report(&saved);
    if !saved.failed.is_empty() {
        return Err("File could not be saved".into());
    }
    Ok(())
}
