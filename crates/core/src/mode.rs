//! Per-turn output settings chosen by the user.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether the model may (or must) produce a downloadable file this turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    #[default]
    TextOnly,
    FileOnly,
    TextAndFile,
}

impl OutputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputMode::TextOnly => "text_only",
            OutputMode::FileOnly => "file_only",
            OutputMode::TextAndFile => "text_and_file",
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text_only" => Ok(OutputMode::TextOnly),
            "file_only" => Ok(OutputMode::FileOnly),
            "text_and_file" => Ok(OutputMode::TextAndFile),
            other => Err(format!(
                "unknown output mode '{other}' (expected text_only, file_only or text_and_file)"
            )),
        }
    }
}

/// File type hint for `file_only` turns. The model's chosen filename
/// decides the actual encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestedFileType {
    Doc,
    Xlsx,
    #[default]
    Txt,
    Auto,
}

impl RequestedFileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestedFileType::Doc => "doc",
            RequestedFileType::Xlsx => "xlsx",
            RequestedFileType::Txt => "txt",
            RequestedFileType::Auto => "auto",
        }
    }
}

impl fmt::Display for RequestedFileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestedFileType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "doc" => Ok(RequestedFileType::Doc),
            "xlsx" => Ok(RequestedFileType::Xlsx),
            "txt" => Ok(RequestedFileType::Txt),
            "auto" => Ok(RequestedFileType::Auto),
            other => Err(format!(
                "unknown file type '{other}' (expected doc, xlsx, txt or auto)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_mode_parses_and_displays() {
        for mode in [OutputMode::TextOnly, OutputMode::FileOnly, OutputMode::TextAndFile] {
            assert_eq!(mode.to_string().parse::<OutputMode>().unwrap(), mode);
        }
        assert!("both".parse::<OutputMode>().is_err());
    }

    #[test]
    fn output_mode_serde_matches_display() {
        let json = serde_json::to_string(&OutputMode::TextAndFile).unwrap();
        assert_eq!(json, "\"text_and_file\"");
    }

    #[test]
    fn file_type_parses() {
        assert_eq!("xlsx".parse::<RequestedFileType>().unwrap(), RequestedFileType::Xlsx);
        assert_eq!(RequestedFileType::default(), RequestedFileType::Txt);
        assert!("pdf".parse::<RequestedFileType>().is_err());
    }
}
