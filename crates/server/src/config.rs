use std::fs;

use serde::Deserialize;
use tracing::warn;

const CONFIG_FILE: &str = "server.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_bind: String,
    pub sheet_id: Option<String>,
    pub sheet_delay_ms: u64,
    pub max_body_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8443".into(),
            sheet_id: None,
            sheet_delay_ms: 0,
            max_body_bytes: 256 * 1024,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    bind_addr: Option<String>,
    sheet_id: Option<String>,
    sheet_delay_ms: Option<u64>,
    max_body_bytes: Option<usize>,
}

/// Defaults, then `server.toml`, then environment variables.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(CONFIG_FILE) {
        apply_file(&mut settings, &raw);
    }
    apply_env(&mut settings, |key| std::env::var(key).ok());

    settings
}

fn apply_file(settings: &mut Settings, raw: &str) {
    let file_cfg = match toml::from_str::<FileSettings>(raw) {
        Ok(cfg) => cfg,
        Err(error) => {
            warn!(%error, "ignoring unreadable {CONFIG_FILE}");
            return;
        }
    };

    if let Some(v) = file_cfg.bind_addr {
        settings.server_bind = v;
    }
    if let Some(v) = file_cfg.sheet_id {
        settings.sheet_id = Some(v);
    }
    if let Some(v) = file_cfg.sheet_delay_ms {
        settings.sheet_delay_ms = v;
    }
    if let Some(v) = file_cfg.max_body_bytes {
        settings.max_body_bytes = v;
    }
}

fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = var("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = var("APP__SHEET_ID").filter(|v| !v.trim().is_empty()) {
        settings.sheet_id = Some(v);
    }

    if let Some(v) = var("APP__SHEET_DELAY_MS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.sheet_delay_ms = parsed;
        }
    }

    if let Some(v) = var("APP__MAX_BODY_BYTES") {
        if let Ok(parsed) = v.parse::<usize>() {
            settings.max_body_bytes = parsed;
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
