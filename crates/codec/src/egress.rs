//! File Codec (egress): model-declared file contents to downloadable bytes.
//!
//! Dispatch is on the filename suffix only. The MIME type the model
//! declares is advisory and never decides the encoding.

use reviewdesk_core::error::CodecError;
use reviewdesk_core::message::Attachment;
use tracing::debug;

use crate::encoding;
use crate::sheet;
use crate::xlsx::WorkbookWriter;

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const MSWORD_MIME: &str = "application/msword";
pub const TEXT_MIME: &str = "text/plain";

/// Sheet name used for generated workbooks.
pub const GENERATED_SHEET_NAME: &str = "Sheet1";

/// Which encoder a filename selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// `.xlsx`: content is CSV
    Spreadsheet,
    /// `.doc` / `.docx`: content is HTML body markup
    WordDoc,
    /// Anything else: content is literal text
    PlainText,
}

impl FileKind {
    /// Case-sensitive suffix match.
    pub fn from_filename(filename: &str) -> Self {
        if filename.ends_with(".xlsx") {
            FileKind::Spreadsheet
        } else if filename.ends_with(".doc") || filename.ends_with(".docx") {
            FileKind::WordDoc
        } else {
            FileKind::PlainText
        }
    }

    /// The MIME type the produced file is labelled with.
    pub fn mime_type(&self) -> &'static str {
        match self {
            FileKind::Spreadsheet => XLSX_MIME,
            FileKind::WordDoc => MSWORD_MIME,
            FileKind::PlainText => TEXT_MIME,
        }
    }
}

/// Encode one generated file.
///
/// The returned attachment keeps `filename` unchanged, including a `.docx`
/// suffix on what is really an HTML-bodied `.doc`.
pub fn encode(
    filename: &str,
    content: &str,
    declared_mime: Option<&str>,
) -> Result<Attachment, CodecError> {
    let kind = FileKind::from_filename(filename);
    if let Some(declared) = declared_mime
        && declared != kind.mime_type()
    {
        debug!(file = %filename, declared, actual = kind.mime_type(), "Ignoring declared MIME type");
    }

    let data = match kind {
        FileKind::Spreadsheet => spreadsheet_base64(content)?,
        FileKind::WordDoc => encoding::encode_text(&word_document_html(content)),
        FileKind::PlainText => encoding::encode_text(content),
    };

    Ok(Attachment::new(filename, kind.mime_type(), data))
}

/// CSV text to a single-sheet workbook, base64-encoded.
pub fn spreadsheet_base64(csv_content: &str) -> Result<String, CodecError> {
    let rows = sheet::parse_csv(csv_content)?;
    let mut writer = WorkbookWriter::new();
    writer.add_sheet(GENERATED_SHEET_NAME, rows);
    Ok(encoding::encode_bytes(&writer.to_bytes()?))
}

/// Wrap body markup in an HTML shell carrying the Office namespaces, which
/// word processors open as a native document.
pub fn word_document_html(body: &str) -> String {
    format!(
        concat!(
            "<html xmlns:o='urn:schemas-microsoft-com:office:office' ",
            "xmlns:w='urn:schemas-microsoft-com:office:word' ",
            "xmlns='http://www.w3.org/TR/REC-html40'>\n",
            "<head><meta charset='utf-8'><title>Document</title></head>\n",
            "<body>{}</body>\n",
            "</html>\n",
        ),
        body
    )
}
