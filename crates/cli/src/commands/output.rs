//! Saving generated files to disk.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use reviewdesk_codec::encoding;
use reviewdesk_core::message::Attachment;
use tracing::{debug, warn};

const FALLBACK_NAME: &str = "output.txt";

/// What happened to each generated file.
#[derive(Debug, Default)]
pub struct Saved {
    pub written: Vec<PathBuf>,
    /// `(name, reason)` for every file that could not be written
    pub failed: Vec<(String, String)>,
}

/// Decode each attachment and write it into `dir`, creating `dir` if needed.
///
/// Only the final path component of a model-chosen name is used, so a
/// file can never land outside `dir`. Names repeated within one reply get
/// a ` (2)`, ` (3)` suffix. One failed file does not stop the rest.
pub fn save_files(dir: &Path, files: &[Attachment]) -> Result<Saved, Box<dyn std::error::Error>> {
    let mut saved = Saved::default();
    if files.is_empty() {
        return Ok(saved);
    }
    std::fs::create_dir_all(dir)?;

    let mut taken = HashSet::new();
    for file in files {
        let name = unique_name(&safe_name(&file.name), &mut taken);
        let path = dir.join(&name);
        let result = encoding::decode(&file.data)
            .map_err(|e| e.to_string())
            .and_then(|bytes| {
                std::fs::write(&path, &bytes).map_err(|e| e.to_string())?;
                Ok(bytes.len())
            });
        match result {
            Ok(len) => {
                debug!(path = %path.display(), bytes = len, mime = %file.mime_type, "Saved generated file");
                saved.written.push(path);
            }
            Err(reason) => {
                warn!(file = %name, "Could not save generated file: {reason}");
                saved.failed.push((name, reason));
            }
        }
    }
    Ok(saved)
}

fn safe_name(name: &str) -> String {
    Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty() && n != "..")
        .unwrap_or_else(|| FALLBACK_NAME.to_string())
}

/// `report.txt`, then `report (2).txt`, `report (3).txt`, ...
fn unique_name(name: &str, taken: &mut HashSet<String>) -> String {
    if taken.insert(name.to_string()) {
        return name.to_string();
    }
    let (stem, ext) = match name.rfind('.') {
        Some(dot) if dot > 0 => name.split_at(dot),
        _ => (name, ""),
    };
    let mut n = 2;
    loop {
        let candidate = format!("{stem} ({n}){ext}");
        if taken.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

/// Print the saved paths, then any files that could not be saved.
pub fn report(saved: &Saved) {
    if !saved.written.is_empty() {
        println!();
        println!("  Generated files:");
        for path in &saved.written {
            println!("    {}", path.display());
        }
    }
    for (name, reason) in &saved.failed {
        eprintln!("  [Error] Could not save {name}: {reason}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_confined_to_the_directory() {
        assert_eq!(safe_name("report.doc"), "report.doc");
        assert_eq!(safe_name("../../etc/passwd"), "passwd");
        assert_eq!(safe_name("/abs/path/data.xlsx"), "data.xlsx");
        assert_eq!(safe_name(".."), FALLBACK_NAME);
        assert_eq!(safe_name(""), FALLBACK_NAME);
    }

    fn text_file(name: &str, body: &str) -> Attachment {
        Attachment::new(name, "text/plain", encoding::encode_text(body))
    }

    #[test]
    fn repeated_names_are_all_kept() {
        let dir = tempfile::tempdir().unwrap();
        let files = [
            text_file("a.txt", "one"),
            text_file("a.txt", "two"),
            text_file("../a.txt", "three"),
        ];
        let saved = save_files(dir.path(), &files).unwrap();
        assert!(saved.failed.is_empty());
        assert_eq!(
            saved.written,
            vec![
                dir.path().join("a.txt"),
                dir.path().join("a (2).txt"),
                dir.path().join("a (3).txt"),
            ]
        );
        assert_eq!(std::fs::read_to_string(dir.path().join("a.txt")).unwrap(), "one");
        assert_eq!(std::fs::read_to_string(dir.path().join("a (2).txt")).unwrap(), "two");
        assert_eq!(std::fs::read_to_string(dir.path().join("a (3).txt")).unwrap(), "three");
    }

    #[test]
    fn one_bad_payload_does_not_stop_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        let files = [
            Attachment::new("broken.xlsx", "text/plain", "%%% not base64 %%%"),
            text_file("notes.txt", "kept"),
        ];
        let saved = save_files(dir.path(), &files).unwrap();
        assert_eq!(saved.written, vec![dir.path().join("notes.txt")]);
        assert_eq!(saved.failed.len(), 1);
        assert_eq!(saved.failed[0].0, "broken.xlsx");
        assert!(!dir.path().join("broken.xlsx").exists());
    }

    #[test]
    fn suffix_goes_before_the_extension() {
        let mut taken = HashSet::new();
        assert_eq!(unique_name("report", &mut taken), "report");
        assert_eq!(unique_name("report", &mut taken), "report (2)");
        assert_eq!(unique_name(".env", &mut taken), ".env");
        assert_eq!(unique_name(".env", &mut taken), ".env (2)");
        assert_eq!(unique_name("data.tar.gz", &mut taken), "data.tar.gz");
        assert_eq!(unique_name("data.tar.gz", &mut taken), "data.tar (2).gz");
    }
}
