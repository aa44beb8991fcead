use std::{env, path::PathBuf, time::Duration};

use crate::{
    conversation::DEFAULT_HISTORY_LIMIT,
    errors::Error,
    formatting::DEFAULT_EMBED_COLOR,
    languages::{LanguageTable, DEFAULT_CODES, DEFAULT_NAMES},
    model::types::CompletionConfig,
    Result,
};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Typed configuration, read once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    // Credentials
    pub discord_token: String,
    pub openai_api_key: String,

    // Completion backend
    pub openai_base_url: String,
    pub completion: CompletionConfig,
    pub request_timeout: Duration,

    // Relay behavior
    pub history_limit: usize,
    pub languages: LanguageTable,
    pub embed_color: u32,
}

impl Config {
    pub fn load() -> Result<Self> {
        // A missing .env is fine; real env vars always win.
        check_dotenv(dotenvy::dotenv())?;

        let discord_token = env_str("DISCORD_TOKEN").and_then(non_empty).ok_or_else(|| {
            Error::Config("DISCORD_TOKEN environment variable is required".to_string())
        })?;
        let openai_api_key = env_str("OPENAI_API_KEY").and_then(non_empty).ok_or_else(|| {
            Error::Config("OPENAI_API_KEY environment variable is required".to_string())
        })?;

        let openai_base_url = env_str("OPENAI_BASE_URL")
            .and_then(non_empty)
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string());

        let defaults = CompletionConfig::default();
        let completion = CompletionConfig {
            model: env_str("OPENAI_MODEL")
                .and_then(non_empty)
                .unwrap_or(defaults.model),
            temperature: env_f32("OPENAI_TEMPERATURE")
                .map(|t| t.clamp(0.0, 2.0))
                .unwrap_or(defaults.temperature),
        };
        let request_timeout = Duration::from_secs(env_u64("OPENAI_TIMEOUT_SECS").unwrap_or(60));

        let history_limit = env_usize("CONVERSATION_HISTORY_LIMIT")
            .unwrap_or(DEFAULT_HISTORY_LIMIT)
            .max(2);

        let codes = parse_csv_lower(env_str("LANGUAGE_CODES"));
        let codes = if codes.is_empty() {
            DEFAULT_CODES.iter().map(|c| c.to_string()).collect()
        } else {
            codes
        };
        let names = parse_language_names(env_str("LANGUAGE_NAMES")).unwrap_or_else(|| {
            DEFAULT_NAMES
                .iter()
                .map(|(n, c)| (n.to_string(), c.to_string()))
                .collect()
        });
        let languages = LanguageTable::new(codes, names);

        let embed_color = match env_str("EMBED_COLOR").and_then(non_empty) {
            Some(raw) => parse_hex_color(&raw)
                .ok_or_else(|| Error::Config(format!("EMBED_COLOR is not a hex color: {raw}")))?,
            None => DEFAULT_EMBED_COLOR,
        };

        Ok(Self {
            discord_token,
            openai_api_key,
            openai_base_url,
            completion,
            request_timeout,
            history_limit,
            languages,
            embed_color,
        })
    }
}

fn check_dotenv(loaded: dotenvy::Result<PathBuf>) -> Result<()> {
    match loaded {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(Error::Config(format!("failed to load .env: {e}"))),
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn env_u64(key: &str) -> Option<u64> {
    env_str(key).and_then(|s| s.trim().parse::<u64>().ok())
}

fn env_usize(key: &str) -> Option<usize> {
    env_str(key).and_then(|s| s.trim().parse::<usize>().ok())
}

fn env_f32(key: &str) -> Option<f32> {
    env_str(key).and_then(|s| s.trim().parse::<f32>().ok())
}

fn parse_csv_lower(v: Option<String>) -> Vec<String> {
    v.unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// `English=en,Dari=fa,...` in priority order. `None` when unset or nothing parses.
fn parse_language_names(v: Option<String>) -> Option<Vec<(String, String)>> {
    let v = v?;
    let out = v
        .split(',')
        .filter_map(|pair| pair.split_once('='))
        .map(|(name, code)| (name.trim().to_string(), code.trim().to_lowercase()))
        .filter(|(name, code)| !name.is_empty() && !code.is_empty())
        .collect::<Vec<_>>();
    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

fn parse_hex_color(s: &str) -> Option<u32> {
    let s = s.trim();
    let hex = s
        .strip_prefix('#')
        .or_else(|| s.strip_prefix("0x"))
        .unwrap_or(s);
    if hex.is_empty() || hex.len() > 6 {
        return None;
    }
    u32::from_str_radix(hex, 16).ok()
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
