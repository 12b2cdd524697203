//! ReviewDesk CLI — the main entry point.
//!
//! Commands:
//! - `review`   — One review turn over the given documents
//! - `chat`     — Interactive review project
//! - `ingest`   — Show what the model would receive for some files
//! - `generate` — Encode a file the way a `generate_file` call would
//! - `schema`   — Print the `generate_file` tool declaration
//! - `onboard`  — Initialize config
//! - `config`   — Show, locate or validate the config
//! - `doctor`   — Diagnose setup problems

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use reviewdesk_core::mode::{OutputMode, RequestedFileType};

mod commands;

#[derive(Parser)]
#[command(
    name = "reviewdesk",
    about = "ReviewDesk — document review with downloadable results",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single review turn
    Review {
        /// Instruction for the reviewer
        #[arg(short, long, default_value = "")]
        message: String,

        /// Documents to attach (repeatable)
        #[arg(short, long = "attach")]
        attachments: Vec<PathBuf>,

        /// text_only, file_only or text_and_file
        #[arg(long)]
        mode: Option<OutputMode>,

        /// doc, xlsx, txt or auto
        #[arg(long = "file-type")]
        file_type: Option<RequestedFileType>,

        /// Where generated files are written
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Start an interactive review project
    Chat {
        /// Project name
        #[arg(short, long)]
        title: Option<String>,

        /// Initial output mode
        #[arg(long)]
        mode: Option<OutputMode>,

        /// Initial file type hint
        #[arg(long = "file-type")]
        file_type: Option<RequestedFileType>,

        /// Where generated files are written
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Convert files to attachments without calling the model
    Ingest {
        paths: Vec<PathBuf>,

        /// Print the full attachments as JSON
        #[arg(long)]
        json: bool,
    },

    /// Encode content into a downloadable file
    Generate {
        /// Output filename; its extension picks the encoding
        #[arg(short, long)]
        filename: String,

        /// File holding the content (CSV, HTML body or text)
        #[arg(short, long)]
        content_file: PathBuf,

        /// Where the file is written
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Print the generate_file tool declaration
    Schema,

    /// Initialize configuration
    Onboard,

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Diagnose setup problems
    Doctor,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Print the config file location
    Path,
    /// Check the configuration for problems
    Validate,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing; stdout is reserved for command output
    let filter = if cli.verbose { "debug" } else { "info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    if cli.json_logs {
        builder.json().init();
    } else {
        builder.init();
    }

    match cli.command {
        Commands::Review {
            message,
            attachments,
            mode,
            file_type,
            out,
        } => commands::review::run(message, attachments, mode, file_type, out).await?,
        Commands::Chat {
            title,
            mode,
            file_type,
            out,
        } => commands::chat::run(title, mode, file_type, out).await?,
        Commands::Ingest { paths, json } => commands::ingest::run(paths, json).await?,
        Commands::Generate {
            filename,
            content_file,
            out,
        } => commands::generate::run(filename, content_file, out).await?,
        Commands::Schema => commands::schema::run().await?,
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config_cmd::show().await?,
            ConfigAction::Path => commands::config_cmd::path().await?,
            ConfigAction::Validate => commands::config_cmd::validate().await?,
        },
        Commands::Doctor => commands::doctor::run().await?,
    }

    Ok(())
}
