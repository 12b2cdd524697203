//! `reviewdesk schema` — Print the `generate_file` tool declaration.

use reviewdesk_agent::generate_file_definition;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(&generate_file_definition())?);
    Ok(())
}
