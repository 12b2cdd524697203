//! The `generate_file` tool: its declaration and argument handling.
//!
//! Arguments come from the model and are untrusted. Missing values are
//! defaulted rather than rejected so every call yields some file.

use reviewdesk_core::tool::{FunctionCall, ToolDefinition};
use serde_json::{Value, json};

pub const GENERATE_FILE: &str = "generate_file";
pub const DEFAULT_FILENAME: &str = "output.txt";

/// The declaration attached to model calls when the tool is offered.
pub fn generate_file_definition() -> ToolDefinition {
    ToolDefinition {
        name: GENERATE_FILE.into(),
        description: "Generates a downloadable file for the user. Use this when the user \
                      requests a file output or the mode requires it."
            .into(),
        parameters: json!({
            "type": "object",
            "properties": {
                "filename": {
                    "type": "string",
                    "description": "Name of the file including extension. Supported extensions: \
                                    .doc, .xlsx, .txt. For .doc, the content must be HTML \
                                    structure. For .xlsx, content must be CSV."
                },
                "content": {
                    "type": "string",
                    "description": "The content of the file. If filename is .xlsx, this must be \
                                    CSV data. If .doc, this must be HTML body content. If .txt, \
                                    plain text."
                },
                "mimeType": {
                    "type": "string",
                    "description": "The mime type of the content being passed. \"text/csv\" for \
                                    excel, \"text/html\" for word, \"text/plain\" for text."
                }
            },
            "required": ["filename", "content", "mimeType"]
        }),
    }
}

/// Normalized arguments of one `generate_file` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateFileArgs {
    pub filename: String,
    pub content: String,
    /// Advisory only
    pub mime_type: Option<String>,
}

impl GenerateFileArgs {
    pub fn from_value(args: &Value) -> Self {
        let filename = match args.get("filename").and_then(Value::as_str) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => DEFAULT_FILENAME.to_string(),
        };
        let content = match args.get("content") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            // Non-string content is kept as its JSON text
            Some(other) => other.to_string(),
        };
        let mime_type = args
            .get("mimeType")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .map(str::to_string);

        Self {
            filename,
            content,
            mime_type,
        }
    }

    /// `None` for calls to any other tool name.
    pub fn from_call(call: &FunctionCall) -> Option<Self> {
        (call.name == GENERATE_FILE).then(|| Self::from_value(&call.args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definition_requires_all_three_arguments() {
        let def = generate_file_definition();
        assert_eq!(def.name, "generate_file");
        let required: Vec<&str> = def.parameters["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(required, vec!["filename", "content", "mimeType"]);
        for key in required {
            assert_eq!(def.parameters["properties"][key]["type"], "string");
        }
    }

    #[test]
    fn full_arguments() {
        let args = GenerateFileArgs::from_value(&json!({
            "filename": "fees.xlsx",
            "content": "item,fee\nAudit,1200",
            "mimeType": "text/csv"
        }));
        assert_eq!(args.filename, "fees.xlsx");
        assert_eq!(args.content, "item,fee\nAudit,1200");
        assert_eq!(args.mime_type.as_deref(), Some("text/csv"));
    }

    #[test]
    fn missing_arguments_are_defaulted() {
        let args = GenerateFileArgs::from_value(&json!({}));
        assert_eq!(args.filename, DEFAULT_FILENAME);
        assert_eq!(args.content, "");
        assert!(args.mime_type.is_none());

        let args = GenerateFileArgs::from_value(&Value::Null);
        assert_eq!(args.filename, DEFAULT_FILENAME);
    }

    #[test]
    fn empty_filename_is_defaulted() {
        let args = GenerateFileArgs::from_value(&json!({"filename": "", "content": "x"}));
        assert_eq!(args.filename, DEFAULT_FILENAME);
        assert_eq!(args.content, "x");
    }

    #[test]
    fn other_tool_names_are_ignored() {
        let call = FunctionCall::new("delete_files", json!({"filename": "a.txt"}));
        assert!(GenerateFileArgs::from_call(&call).is_none());

        let call = FunctionCall::new(GENERATE_FILE, json!({"filename": "a.txt"}));
        assert_eq!(GenerateFileArgs::from_call(&call).unwrap().filename, "a.txt");
    }
}
