use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "moodmate.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub session_cookie: Option<String>,
    pub reveal_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            session_cookie: None,
            reveal_delay_ms: 10,
        }
    }
}

impl Settings {
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    server_url: Option<String>,
    session_cookie: Option<String>,
    reveal_delay_ms: Option<u64>,
}

/// Defaults, then the config file, then environment overrides.
///
/// An explicit `config_path` must exist; the default `moodmate.toml` is optional.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    load_settings_with(config_path, |key| std::env::var(key).ok())
}

fn load_settings_with(
    config_path: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let path = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => Some(PathBuf::from(DEFAULT_CONFIG_PATH)).filter(|path| path.exists()),
    };
    if let Some(path) = path {
        let file_cfg = read_file_settings(&path)?;
        if let Some(v) = file_cfg.server_url {
            settings.server_url = v;
        }
        if let Some(v) = file_cfg.session_cookie {
            settings.session_cookie = Some(v);
        }
        if let Some(v) = file_cfg.reveal_delay_ms {
            settings.reveal_delay_ms = v;
        }
    }

    if let Some(v) = env("MOODMATE_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = env("MOODMATE_SESSION_COOKIE") {
        settings.session_cookie = Some(v);
    }

    if let Some(v) = env("APP__REVEAL_DELAY_MS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.reveal_delay_ms = parsed;
        }
    }

    Ok(settings)
}

fn read_file_settings(path: &Path) -> anyhow::Result<FileSettings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file '{}'", path.display()))?;
    toml::from_str(&raw)
        .with_context(|| format!("failed to parse config file '{}'", path.display()))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
