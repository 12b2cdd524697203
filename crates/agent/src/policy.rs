//! Output-mode policy: whether the file tool is offered and which steering
//! note is appended to the user's instruction.

use reviewdesk_core::mode::{OutputMode, RequestedFileType};

/// The decision for one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPolicy {
    /// Attach the `generate_file` declaration to the model call
    pub offer_tool: bool,
    /// Appended verbatim to the new turn's text
    pub steering: Option<String>,
}

/// Pure decision table over the selected mode.
pub fn policy_for(mode: OutputMode, requested: RequestedFileType) -> OutputPolicy {
    match mode {
        OutputMode::TextOnly => OutputPolicy {
            offer_tool: false,
            steering: None,
        },
        OutputMode::FileOnly => OutputPolicy {
            offer_tool: true,
            steering: Some(format!(
                "\n[SYSTEM: The user requested ONLY a file output. File type: {requested}. \
                 Generate the file using the 'generate_file' tool. \
                 Keep your text response very brief (e.g., \"Here is your file\").]"
            )),
        },
        OutputMode::TextAndFile => OutputPolicy {
            offer_tool: true,
            steering: Some(
                "\n[SYSTEM: The user requested BOTH text explanation and a downloadable file. \
                 Decide the best file type (doc, xlsx, or txt) based on the content \
                 (e.g. xlsx for tables, doc for formal reports). \
                 Use 'generate_file' tool to create it.]"
                    .to_string(),
            ),
        },
    }
}
