//! Extension-based MIME lookup for files read from disk.

use std::path::Path;

/// Guess a MIME type from the file extension. Unknown extensions yield an
/// empty string, which ingestion treats as `application/octet-stream`.
pub fn guess(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "pdf" => "application/pdf",
        "txt" | "log" => "text/plain",
        "md" | "markdown" => "text/markdown",
        "csv" => "text/csv",
        "html" | "htm" => "text/html",
        "xml" => "application/xml",
        "json" => "application/json",
        "rtf" => "application/rtf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions() {
        assert_eq!(guess(Path::new("contract.PDF")), "application/pdf");
        assert_eq!(guess(Path::new("data.json")), "application/json");
        assert_eq!(guess(Path::new("/tmp/scan.jpeg")), "image/jpeg");
    }

    #[test]
    fn unknown_extension_is_empty() {
        assert_eq!(guess(Path::new("archive.7z")), "");
        assert_eq!(guess(Path::new("Makefile")), "");
    }
}
