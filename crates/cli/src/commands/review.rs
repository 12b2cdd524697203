//! `reviewdesk review` — One review turn over the given documents.

use std::path::PathBuf;

use reviewdesk_agent::ReviewSession;
use reviewdesk_codec::ingest_paths;
use reviewdesk_core::message::Conversation;
use reviewdesk_core::mode::{OutputMode, RequestedFileType};

use super::{build_orchestrator, load_ready_config, output, output_dir};

pub async fn run(
    message: String,
    attachments: Vec<PathBuf>,
    mode: Option<OutputMode>,
    file_type: Option<RequestedFileType>,
    out: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_ready_config()?;

    let uploads = ingest_paths(&attachments).await;
    if uploads.len() < attachments.len() {
        eprintln!(
            "  ⚠️  {} of {} file(s) could not be read and were skipped",
            attachments.len() - uploads.len(),
            attachments.len()
        );
    }
    if message.trim().is_empty() && uploads.is_empty() {
        return Err("Nothing to review: pass --message and/or --attach".into());
    }

    let mut session = ReviewSession::new(build_orchestrator(&config, None), Conversation::default())
        .with_mode(mode.unwrap_or(config.review.default_output_mode))
        .with_requested_type(file_type.unwrap_or(config.review.default_file_type));
    session.stage(uploads);

    eprint!("  Reviewing...");
    let reply = session.submit(&message).await.ok_or("Nothing to submit")?;
    eprint!("\r              \r");

    println!("{}", reply.text);
    let saved = output::save_files(&output_dir(out, &config), &reply.generated_files)?;
    output::report(&saved);

    if reply.is_failed() {
        return Err("Review turn failed".into());
    }
    if !saved.failed.is_empty() {
        return Err(format!("{} generated file(s) could not be saved", saved.failed.len()).into());
    }
    Ok(())
}
