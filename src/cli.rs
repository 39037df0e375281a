//! Command-line front end.
//!
//! Stands in for the CMS editor: each invocation loads the field value,
//! performs one session operation, and prints the outcome.

use crate::config::{self, Config};
use crate::content::{self, ContentType, QUICK_PROMPTS};
use crate::field::{FieldHost, FieldSession, FileFieldHost, SessionStatus};
use crate::llm::{GeminiClient, MaybeRetrying};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Generate CMS field copy with Gemini.
///
/// The field value is stored as JSON (default: the user config dir), the
/// same shape the field plugin persists in the CMS.
#[derive(Parser, Debug)]
#[command(name = "promptblok")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Field value file (overrides PROMPTBLOK_FIELD_PATH).
    #[arg(long, global = true)]
    pub field: Option<PathBuf>,

    /// Story JSON used as generation context (`{"story": {...}}`).
    #[arg(long, global = true)]
    pub story: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate content from an instruction and store it in the field.
    Generate(GenerateArgs),

    /// Run the stored prompt again.
    Regenerate,

    /// Replace the generated text with your own edit.
    Edit {
        /// New text for the field.
        text: String,
    },

    /// Change the field's content type.
    SetType {
        /// Content type tag (see `types`).
        content_type: String,
    },

    /// Print the stored field value as JSON.
    Show,

    /// List content types and quick prompts.
    Types,

    /// Save the Gemini API key to the OS keychain.
    SetKey {
        api_key: String,
    },
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Content type tag; defaults to the field's current type.
    #[arg(short = 't', long = "type")]
    pub content_type: Option<String>,

    /// Use a quick prompt preset by id instead of typing an instruction.
    #[arg(short, long, conflicts_with = "instruction")]
    pub quick: Option<String>,

    /// What to write.
    #[arg(trailing_var_arg = true)]
    pub instruction: Vec<String>,
}

/// Execute one CLI command. Returns the user-facing error on failure.
pub async fn dispatch(cli: Cli, mut config: Config) -> Result<(), String> {
    if let Some(path) = cli.field {
        config.field_path = path;
    }

    let mut host = FileFieldHost::new(&config.field_path);
    if let Some(story) = cli.story {
        host = host.with_story_file(story);
    }

    match cli.command {
        Command::Types => {
            print_types();
            Ok(())
        }
        Command::SetKey { api_key } => config::save_api_key(api_key.trim()),
        Command::Show => {
            let json = serde_json::to_string_pretty(&host.current()).map_err(|e| e.to_string())?;
            println!("{}", json);
            Ok(())
        }
        command => {
            let generator = MaybeRetrying::new(GeminiClient::from_config(&config), config.retry);
            let mut session = FieldSession::new(host, generator);
            run_session_command(&mut session, command).await
        }
    }
}

async fn run_session_command<H, G>(
    session: &mut FieldSession<H, G>,
    command: Command,
) -> Result<(), String>
where
    H: FieldHost,
    G: crate::llm::TextGenerator,
{
    let status = match command {
        Command::Generate(args) => {
            if let Some(tag) = &args.content_type {
                session.change_type(ContentType::from_tag(tag));
            }
            let instruction = match &args.quick {
                Some(id) => {
                    let qp = content::quick_prompt(id)
                        .ok_or_else(|| format!("Unknown quick prompt: {}", id))?;
                    session.apply_quick_prompt(qp);
                    session.draft_prompt().to_string()
                }
                None => args.instruction.join(" "),
            };
            if instruction.trim().is_empty() {
                return Err("Enter an instruction or pick a quick prompt with --quick".to_string());
            }
            session.generate(&instruction).await.clone()
        }
        Command::Regenerate => {
            if session.current().original_prompt.is_empty() {
                return Err("Nothing to regenerate yet".to_string());
            }
            session.regenerate().await.clone()
        }
        Command::Edit { text } => session.edit(&text).clone(),
        Command::SetType { content_type } => session.change_type(ContentType::from_tag(&content_type)).clone(),
        Command::Show | Command::Types | Command::SetKey { .. } => return Ok(()),
    };

    match status {
        SessionStatus::Failed(message) => Err(message),
        SessionStatus::Succeeded(message) => {
            eprintln!("{}", message);
            println!("{}", session.current().generated_text);
            Ok(())
        }
        SessionStatus::Idle | SessionStatus::Submitting => {
            let value = session.current();
            eprintln!("Saved ({}).", value.content_type);
            Ok(())
        }
    }
}

fn print_types() {
    println!("Content types:");
    for ct in ContentType::all() {
        println!("  {} {:<12} {}", ct.icon(), ct.as_str(), ct.label());
    }
    println!();
    println!("Quick prompts:");
    for qp in QUICK_PROMPTS {
        println!("  {} {:<20} [{}] {}", qp.icon, qp.id, qp.content_type, qp.label);
    }
}
