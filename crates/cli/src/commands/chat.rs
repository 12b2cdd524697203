//! `reviewdesk chat` — Interactive review project.
//!
//! Lines starting with `/` are session commands; anything else is
//! submitted together with the staged attachments.

use std::io::Write;
use std::path::PathBuf;

use reviewdesk_agent::ReviewSession;
use reviewdesk_codec::ingest_paths;
use reviewdesk_core::message::Conversation;
use reviewdesk_core::mode::{OutputMode, RequestedFileType};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::{build_orchestrator, load_ready_config, output, output_dir};

/// A parsed input line.
#[derive(Debug, PartialEq)]
enum Input {
    Attach(Vec<PathBuf>),
    Mode(Result<OutputMode, String>),
    FileType(Result<RequestedFileType, String>),
    Files,
    Help,
    Exit,
    Unknown(String),
    Message(String),
}

fn parse_input(line: &str) -> Input {
    let line = line.trim();
    if !line.starts_with('/') {
        return Input::Message(line.to_string());
    }
    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();
    match command {
        "/attach" => Input::Attach(rest.split_whitespace().map(PathBuf::from).collect()),
        "/mode" => Input::Mode(rest.parse()),
        "/type" => Input::FileType(rest.parse()),
        "/files" => Input::Files,
        "/help" => Input::Help,
        "/exit" | "/quit" => Input::Exit,
        other => Input::Unknown(other.to_string()),
    }
}

fn print_help() {
    println!("  /attach PATH...   stage documents for the next message");
    println!("  /mode MODE        text_only | file_only | text_and_file");
    println!("  /type TYPE        doc | xlsx | txt | auto");
    println!("  /files            list staged documents");
    println!("  /exit             leave the session");
}

pub async fn run(
    title: Option<String>,
    mode: Option<OutputMode>,
    file_type: Option<RequestedFileType>,
    out: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_ready_config()?;
    let out_dir = output_dir(out, &config);

    let conversation = title.map(Conversation::new).unwrap_or_default();
    let mut session = ReviewSession::new(build_orchestrator(&config, None), conversation)
        .with_mode(mode.unwrap_or(config.review.default_output_mode))
        .with_requested_type(file_type.unwrap_or(config.review.default_file_type));

    println!();
    println!("  ╔══════════════════════════════════════════════╗");
    println!("  ║        ReviewDesk — Interactive Review       ║");
    println!("  ╚══════════════════════════════════════════════╝");
    println!();
    println!("  Project:   {}", session.conversation().title);
    println!("  Model:     {}", config.model);
    println!("  Mode:      {} ({})", session.mode(), session.requested_type());
    println!("  Output:    {}", out_dir.display());
    println!();
    println!("  Type a message and press Enter. /help lists commands.");
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("  You > ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_input(&line) {
            Input::Exit => break,
            Input::Help => print_help(),
            Input::Files => {
                let drafts = session.conversation().drafts();
                if drafts.is_empty() {
                    println!("  (nothing staged)");
                }
                for att in drafts {
                    println!("  - {} ({}, {} bytes)", att.name, att.mime_type, att.decoded_len());
                }
            }
            Input::Attach(paths) if paths.is_empty() => println!("  Usage: /attach PATH..."),
            Input::Attach(paths) => {
                let attachments = ingest_paths(&paths).await;
                println!("  Staged {} of {} file(s)", attachments.len(), paths.len());
                session.stage(attachments);
            }
            Input::Mode(Ok(mode)) => {
                session.set_mode(mode);
                println!("  Mode set to {mode}");
            }
            Input::FileType(Ok(requested)) => {
                session.set_requested_type(requested);
                println!("  File type set to {requested}");
            }
            Input::Mode(Err(e)) | Input::FileType(Err(e)) => println!("  [Error] {e}"),
            Input::Unknown(command) => println!("  Unknown command {command}; try /help"),
            Input::Message(text) => {
                eprint!("  ...");
                let Some(reply) = session.submit(&text).await else {
                    eprint!("\r     \r");
                    continue;
                };
                eprint!("\r     \r");
                println!();
                for line in reply.text.lines() {
                    println!("  Reviewer > {line}");
                }
                match output::save_files(&out_dir, &reply.generated_files) {
                    Ok(saved) => output::report(&saved),
                    Err(e) => eprintln!("  [Error] Could not create {}: {e}", out_dir.display()),
                }
                println!();
            }
        }
    }

    println!();
    println!("  {} message(s) in this project. Goodbye!", session.conversation().len());
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_lines_are_messages() {
        assert_eq!(parse_input("  Summarize section 2 "), Input::Message("Summarize section 2".into()));
    }

    #[test]
    fn session_commands() {
        assert_eq!(
            parse_input("/attach a.pdf  b.xlsx"),
            Input::Attach(vec![PathBuf::from("a.pdf"), PathBuf::from("b.xlsx")])
        );
        assert_eq!(parse_input("/mode file_only"), Input::Mode(Ok(OutputMode::FileOnly)));
        assert_eq!(parse_input("/type xlsx"), Input::FileType(Ok(RequestedFileType::Xlsx)));
        assert!(matches!(parse_input("/mode loud"), Input::Mode(Err(_))));
        assert_eq!(parse_input("/files"), Input::Files);
        assert_eq!(parse_input("/quit"), Input::Exit);
        assert_eq!(parse_input("/nope"), Input::Unknown("/nope".into()));
    }
}
