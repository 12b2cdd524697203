//! `reviewdesk ingest` — Show what the model would receive for some files.

use std::path::PathBuf;

use reviewdesk_codec::{encoding, ingest_paths};
use reviewdesk_core::message::Attachment;

pub async fn run(paths: Vec<PathBuf>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if paths.is_empty() {
        return Err("No files given".into());
    }

    let attachments = ingest_paths(&paths).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&attachments)?);
        return Ok(());
    }

    for att in &attachments {
        println!("📄 {}", att.name);
        println!("   MIME:   {}", att.mime_type);
        println!("   Bytes:  {}", att.decoded_len());
        if let Some(preview) = text_preview(att) {
            println!("   Text:   {preview}");
        }
        println!();
    }

    let skipped = paths.len() - attachments.len();
    if skipped > 0 {
        println!("⚠️  {skipped} file(s) skipped (see log for details)");
    }
    Ok(())
}

/// First lines of a textual attachment. Bytes that are not UTF-8 are
/// shown as replacement characters.
fn text_preview(att: &Attachment) -> Option<String> {
    if !(att.mime_type.starts_with("text/") || att.mime_type == "application/json") {
        return None;
    }
    let bytes = encoding::decode(&att.data).ok()?;
    let text = String::from_utf8_lossy(&bytes);
    Some(text.lines().take(8).collect::<Vec<_>>().join("\n      "))
}
