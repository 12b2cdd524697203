//! Attachment Codec (ingress): uploaded files to model-readable attachments.
//!
//! - `.json` files (or anything declared `application/json`) are decoded as
//!   text and re-encoded, labelled `application/json`.
//! - `.xlsx` / `.xls` workbooks are flattened to one text blob, every sheet
//!   rendered as CSV under a `--- Sheet: <name> ---` header, labelled
//!   `text/plain`.
//! - Everything else passes through as raw bytes with its reported MIME
//!   type (`application/octet-stream` when none was reported).
//!
//! A batch never fails as a whole: a file that cannot be converted is
//! logged and left out, and the survivors keep their input order.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use futures::future::join_all;
use reviewdesk_core::error::CodecError;
use reviewdesk_core::message::Attachment;
use tracing::{debug, warn};

use crate::{encoding, mime, sheet};

pub const JSON_MIME: &str = "application/json";
pub const FALLBACK_MIME: &str = "application/octet-stream";

/// A raw uploaded file.
#[derive(Debug, Clone)]
pub struct Upload {
    pub name: String,
    /// MIME type reported by the host; may be empty
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UploadKind {
    Json,
    Spreadsheet,
    Binary,
}

impl UploadKind {
    /// JSON wins over spreadsheet, spreadsheet over everything else.
    fn classify(upload: &Upload) -> Self {
        if upload.name.ends_with(".json") || upload.mime_type == JSON_MIME {
            UploadKind::Json
        } else if upload.name.ends_with(".xlsx") || upload.name.ends_with(".xls") {
            UploadKind::Spreadsheet
        } else {
            UploadKind::Binary
        }
    }
}

/// Convert one upload.
pub fn ingest(upload: &Upload) -> Result<Attachment, CodecError> {
    let kind = UploadKind::classify(upload);
    debug!(file = %upload.name, ?kind, bytes = upload.bytes.len(), "Ingesting upload");

    match kind {
        UploadKind::Json => {
            let text = String::from_utf8_lossy(&upload.bytes);
            Ok(Attachment::new(&upload.name, JSON_MIME, encoding::encode_text(&text)))
        }
        UploadKind::Spreadsheet => {
            let text = extract_spreadsheet_text(&upload.name, &upload.bytes)?;
            Ok(Attachment::new(
                &upload.name,
                "text/plain",
                encoding::encode_text(&text),
            ))
        }
        UploadKind::Binary => {
            let mime_type = if upload.mime_type.is_empty() {
                FALLBACK_MIME
            } else {
                upload.mime_type.as_str()
            };
            Ok(Attachment::new(
                &upload.name,
                mime_type,
                encoding::encode_bytes(&upload.bytes),
            ))
        }
    }
}

/// Convert a batch, dropping (and logging) failures.
pub fn ingest_all(uploads: &[Upload]) -> Vec<Attachment> {
    uploads
        .iter()
        .filter_map(|upload| match ingest(upload) {
            Ok(att) => Some(att),
            Err(e) => {
                warn!(file = %upload.name, "Failed to process file: {e}");
                None
            }
        })
        .collect()
}

/// Flatten every sheet of a workbook into CSV sections.
pub fn extract_spreadsheet_text(name: &str, bytes: &[u8]) -> Result<String, CodecError> {
    let spreadsheet_err = |reason: String| CodecError::Spreadsheet {
        name: name.to_string(),
        reason,
    };

    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| spreadsheet_err(e.to_string()))?;

    let mut text = format!("Filename: {name}\n\n");
    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    for sheet_name in sheet_names {
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| spreadsheet_err(e.to_string()))?;

        // Only the used range is rendered; a sheet starting at C5 starts at C5.
        let grid: Vec<Vec<String>> = range
            .rows()
            .map(|row| row.iter().map(cell_text).collect())
            .collect();

        let csv = sheet::render_csv(&grid)?;
        text.push_str(&format!("--- Sheet: {sheet_name} ---\n{csv}\n\n"));
    }
    Ok(text)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(true) => "TRUE".into(),
        Data::Bool(false) => "FALSE".into(),
        other => other.to_string(),
    }
}

/// Read a file from disk as an upload, guessing its MIME type.
pub async fn read_upload(path: &Path) -> Result<Upload, CodecError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let bytes = tokio::fs::read(path).await.map_err(|e| CodecError::Read {
        name: name.clone(),
        reason: e.to_string(),
    })?;

    Ok(Upload::new(name, mime::guess(path), bytes))
}

/// Read and convert files concurrently. Output order matches input order;
/// unreadable or unconvertible files are dropped.
pub async fn ingest_paths(paths: &[PathBuf]) -> Vec<Attachment> {
    let results = join_all(paths.iter().map(|path| async move {
        let upload = read_upload(path).await?;
        ingest(&upload)
    }))
    .await;

    paths
        .iter()
        .zip(results)
        .filter_map(|(path, result)| match result {
            Ok(att) => Some(att),
            Err(e) => {
                warn!(file = %path.display(), "Failed to process file: {e}");
                None
            }
        })
        .collect()
}
