//! Runtime configuration — env files, API key resolution, model choice.
//!
//! Resolution order for the Gemini key:
//! 1. GEMINI_API_KEY env var
//! 2. VITE_GEMINI_API_KEY env var (name used by the browser build)
//! 3. OS keychain entry `promptblok` / `gemini`
//!
//! A missing key is not a startup error: generation reports it instead.

use crate::llm::gemini::DEFAULT_API_BASE;
use crate::llm::prompts::GEMINI_MODEL;
use crate::retry::RetryPolicy;
use std::path::{Path, PathBuf};

const KEYCHAIN_SERVICE: &str = "promptblok";
const KEYCHAIN_ACCOUNT: &str = "gemini";
const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "VITE_GEMINI_API_KEY"];

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
    /// `None` leaves generation un-retried.
    pub retry: Option<RetryPolicy>,
    pub field_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: GEMINI_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            retry: None,
            field_path: default_field_path(),
        }
    }
}

impl Config {
    /// Build the config from the process environment, falling back to the
    /// OS keychain for the API key.
    pub fn from_env() -> Self {
        let mut config = Self::from_vars(|name| std::env::var(name).ok());
        if config.api_key.is_none() {
            config.api_key = keychain_api_key();
        }
        config
    }

    /// Build the config from an arbitrary variable lookup. Never touches
    /// the keychain.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let retry = non_empty("PROMPTBLOK_MAX_RETRIES").and_then(|raw| match raw.trim().parse::<u32>() {
            Ok(n) => Some(RetryPolicy::with_attempts(n)),
            Err(_) => {
                log::warn!("[CONFIG] Ignoring invalid PROMPTBLOK_MAX_RETRIES: {}", raw);
                None
            }
        });

        Self {
            api_key: API_KEY_VARS.iter().find_map(|name| non_empty(*name)),
            model: non_empty("GEMINI_MODEL").unwrap_or(defaults.model),
            api_base: non_empty("GEMINI_API_BASE").unwrap_or(defaults.api_base),
            retry,
            field_path: non_empty("PROMPTBLOK_FIELD_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.field_path),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Default location of the stored field value.
pub fn default_field_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("promptblok")
        .join("field.json")
}

/// Load `.env.local`, then `.env`, from `dir`. The first file found wins.
///
/// Returns the path that was loaded, if any.
pub fn load_env_files(dir: &Path) -> Option<PathBuf> {
    for env_file in [".env.local", ".env"] {
        let path = dir.join(env_file);
        if !path.exists() {
            continue;
        }
        match dotenvy::from_path(&path) {
            Ok(_) => {
                eprintln!("[STARTUP] Loaded {}", path.display());
                return Some(path);
            }
            Err(e) => eprintln!("[STARTUP] Failed to load {}: {}", path.display(), e),
        }
    }
    None
}

fn keychain_api_key() -> Option<String> {
    read_keychain_key(KEYCHAIN_SERVICE, KEYCHAIN_ACCOUNT)
}

fn read_keychain_key(service: &str, account: &str) -> Option<String> {
    let entry = keyring::Entry::new(service, account).ok()?;
    match entry.get_password() {
        Ok(key) if !key.trim().is_empty() => {
            log::info!("[CONFIG] Loaded Gemini key from OS keychain");
            Some(key)
        }
        Ok(_) => None,
        Err(keyring::Error::NoEntry) => None,
        Err(e) => {
            log::warn!("[CONFIG] Keychain read failed: {}", e);
            None
        }
    }
}

/// Store the Gemini key in the OS keychain.
pub fn save_api_key(api_key: &str) -> Result<(), String> {
    write_keychain_key(KEYCHAIN_SERVICE, KEYCHAIN_ACCOUNT, api_key)
}

fn write_keychain_key(service: &str, account: &str, api_key: &str) -> Result<(), String> {
    let entry = keyring::Entry::new(service, account).map_err(|e| format!("Keyring error: {}", e))?;
    entry
        .set_password(api_key)
        .map_err(|e| format!("Failed to save key: {}", e))?;
    log::info!("[CONFIG] Gemini key saved to OS keychain");
    Ok(())
}
