use std::{collections::HashMap, path::Path};

use anyhow::Result;

use crate::{session::DEFAULT_SESSION_MAX_AGE_HOURS, types::PartyFormat};

/// Application configuration, read once at startup.
/// Values come from the process environment first, then `.env`, then defaults.
#[derive(Debug, Clone)]
pub struct Config {
    // OpenRouter
    pub openrouter_api_key: String,
    pub openrouter_base_url: String,
    pub openrouter_model: String,
    /// Sent as `HTTP-Referer` to identify the calling app.
    pub openrouter_referer: String,

    // Drafting
    pub party_format: PartyFormat,
    /// Sessions older than this are discarded.
    pub session_max_age_hours: i64,

    // Web
    pub web_bind: String,
    pub web_port: u16,
}

fn parse_dotenv(path: &Path) -> HashMap<String, String> {
    let mut map = HashMap::new();
    let Ok(contents) = std::fs::read_to_string(path) else {
        return map;
    };
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((k, v)) = line.split_once('=') {
            let v = v.trim();
            let v = v
                .strip_prefix('"')
                .and_then(|s| s.strip_suffix('"'))
                .unwrap_or(v);
            map.insert(k.trim().to_string(), v.to_string());
        }
    }
    map
}

fn get(key: &str, dotenv: &HashMap<String, String>) -> Option<String> {
    std::env::var(key).ok().or_else(|| dotenv.get(key).cloned())
}

fn get_str(key: &str, dotenv: &HashMap<String, String>, default: &str) -> String {
    get(key, dotenv).unwrap_or_else(|| default.to_string())
}

fn get_i64(key: &str, dotenv: &HashMap<String, String>, default: i64) -> i64 {
    get(key, dotenv)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn get_u16(key: &str, dotenv: &HashMap<String, String>, default: u16) -> u16 {
    get(key, dotenv)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_env_with_dotenv(Path::new(".env"))
    }

    pub fn from_env_with_dotenv(dotenv_path: &Path) -> Result<Self> {
        let dotenv = parse_dotenv(dotenv_path);

        let openrouter_api_key = get_str("OPENROUTER_API_KEY", &dotenv, "");
        if openrouter_api_key.is_empty() {
            tracing::warn!("OPENROUTER_API_KEY is not set; clarification requests will fail");
        }

        Ok(Config {
            openrouter_api_key,
            openrouter_base_url: get_str(
                "OPENROUTER_BASE_URL",
                &dotenv,
                "https://openrouter.ai/api/v1",
            ),
            openrouter_model: get_str("OPENROUTER_MODEL", &dotenv, "mistralai/mixtral-8x7b"),
            openrouter_referer: get_str("OPENROUTER_REFERER", &dotenv, "https://your-app.com"),
            party_format: PartyFormat::from_str(&get_str("PARTY_DETAILS_FORMAT", &dotenv, "fields")),
            session_max_age_hours: get_i64(
                "SESSION_MAX_AGE_HOURS",
                &dotenv,
                DEFAULT_SESSION_MAX_AGE_HOURS,
            ),
            web_bind: get_str("WEB_BIND", &dotenv, "127.0.0.1"),
            web_port: get_u16("WEB_PORT", &dotenv, 8501),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.web_bind, self.web_port)
    }
}
