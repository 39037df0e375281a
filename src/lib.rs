//! promptblok — AI copy generation for a headless CMS text field.
//!
//! The user picks a content type and types an instruction; Gemini writes
//! the copy; the sanitizer forces it into the requested shape; the field
//! value goes back to the host.
//!
//! Modules:
//!   - content.rs — content types + quick-prompt presets
//!   - llm/       — prompts, sanitizer, Gemini client, orchestrator
//!   - field/     — stored field value, host adapters, session state
//!   - error.rs   — error taxonomy + user-facing messages
//!   - retry.rs   — opt-in exponential backoff
//!   - config.rs  — env files, API key, model selection
//!   - cli.rs     — command-line front end

pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod field;
pub mod llm;
pub mod retry;

use clap::Parser;
use std::process::ExitCode;

/// Entry point — called by the `promptblok` binary.
pub fn run() -> ExitCode {
    // Load .env.local → .env from the working directory.
    if let Ok(cwd) = std::env::current_dir() {
        config::load_env_files(&cwd);
    }

    env_logger::init();

    let cli = cli::Cli::parse();
    let config = config::Config::from_env();
    log::info!(
        "[STARTUP] Model: {}, API key configured: {}",
        config.model,
        config.has_api_key()
    );

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to start async runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(cli::dispatch(cli, config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("Error: {}", message);
            ExitCode::FAILURE
        }
    }
}
