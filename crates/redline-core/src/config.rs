use std::collections::HashMap;

use anyhow::Result;

/// Full application configuration, loaded once at startup from the
/// environment and an optional `.env` file. Service URLs point at the
/// external collaborators; everything with a sensible default has one.
#[derive(Debug, Clone)]
pub struct Config {
    pub assistant_name: String,

    // External collaborators
    /// Analysis/LLM backend (chat, contract review, suggestions).
    pub analysis_url: String,
    /// Clause-generation backend used by playbook creation.
    pub genai_url: String,
    /// PDF-to-text extraction service.
    pub extraction_url: String,
    /// Playbook/clause persistence service.
    pub persistence_url: String,
    /// Object-storage service for uploaded contracts.
    pub storage_url: String,
    pub storage_bucket: String,
    /// Bearer token for the storage service. Env/.env only, never logged.
    pub storage_token: String,

    // HTTP server
    pub web_bind: String,
    pub web_port: u16,
    pub frontend_dist_dir: String,

    // Tuning
    pub request_timeout_s: u64,
    pub session_max_age_hours: i64,
    pub session_sweep_interval_s: u64,
    pub max_upload_mb: usize,
}

fn parse_dotenv() -> HashMap<String, String> {
    let mut map = HashMap::new();
    let Ok(contents) = std::fs::read_to_string(".env") else {
        return map;
    };
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((k, v)) = line.split_once('=') {
            map.insert(k.trim().to_string(), v.trim().to_string());
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

fn get_u64(key: &str, dotenv: &HashMap<String, String>, default: u64) -> u64 {
    get(key, dotenv)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn get_u16(key: &str, dotenv: &HashMap<String, String>, default: u16) -> u16 {
    get(key, dotenv)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn get_usize(key: &str, dotenv: &HashMap<String, String>, default: usize) -> usize {
    get(key, dotenv)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let dotenv = parse_dotenv();

        Ok(Config {
            assistant_name: get_str("ASSISTANT_NAME", &dotenv, "Redline"),
            analysis_url: get_str("ANALYSIS_URL", &dotenv, "http://127.0.0.1:8000"),
            genai_url: get_str("GENAI_URL", &dotenv, "http://127.0.0.1:8001"),
            extraction_url: get_str("EXTRACTION_URL", &dotenv, "http://127.0.0.1:8001"),
            persistence_url: get_str("PERSISTENCE_URL", &dotenv, "http://127.0.0.1:8002"),
            storage_url: get_str("STORAGE_URL", &dotenv, "http://127.0.0.1:8003"),
            storage_bucket: get_str("STORAGE_BUCKET", &dotenv, "contracts"),
            storage_token: get_str("STORAGE_TOKEN", &dotenv, ""),
            web_bind: get_str("WEB_BIND", &dotenv, "127.0.0.1"),
            web_port: get_u16("WEB_PORT", &dotenv, 3000),
            frontend_dist_dir: get_str("FRONTEND_DIST_DIR", &dotenv, "web/dist"),
            request_timeout_s: get_u64("REQUEST_TIMEOUT_S", &dotenv, 60),
            session_max_age_hours: get_i64("SESSION_MAX_AGE_HOURS", &dotenv, 24),
            session_sweep_interval_s: get_u64("SESSION_SWEEP_INTERVAL_S", &dotenv, 300),
            max_upload_mb: get_usize("MAX_UPLOAD_MB", &dotenv, 25),
        })
    }
}
