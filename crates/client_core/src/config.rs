use std::{fs, path::Path};

use serde::Deserialize;
use tracing::warn;

use crate::gesture::SWIPE_THRESHOLD;

pub const DEFAULT_SETTINGS_FILE: &str = "swipe.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    pub server_url: String,
    pub access_token: Option<String>,
    pub request_timeout_secs: u64,
    pub swipe_threshold: f32,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8000/api/".into(),
            access_token: None,
            request_timeout_secs: 15,
            swipe_threshold: SWIPE_THRESHOLD,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    server_url: Option<String>,
    access_token: Option<String>,
    request_timeout_secs: Option<u64>,
    swipe_threshold: Option<f32>,
}

/// Defaults, then `swipe.toml` (or `path`), then environment overrides.
pub fn load_settings(path: Option<&Path>) -> ClientSettings {
    let mut settings = ClientSettings::default();
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_SETTINGS_FILE));

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => apply_file_settings(&mut settings, file_cfg),
            Err(err) => warn!("ignoring malformed settings file '{}': {err}", path.display()),
        }
    }

    apply_env_overrides(&mut settings, |name| std::env::var(name).ok());
    settings.server_url = normalize_server_url(&settings.server_url);
    settings
}

fn apply_file_settings(settings: &mut ClientSettings, file_cfg: FileSettings) {
    if let Some(v) = file_cfg.server_url {
        settings.server_url = v;
    }
    if let Some(v) = file_cfg.access_token {
        settings.access_token = Some(v);
    }
    if let Some(v) = file_cfg.request_timeout_secs.filter(|v| valid_timeout(*v)) {
        settings.request_timeout_secs = v;
    }
    if let Some(v) = file_cfg.swipe_threshold.filter(|v| valid_threshold(*v)) {
        settings.swipe_threshold = v;
    }
}

pub(crate) fn apply_env_overrides(
    settings: &mut ClientSettings,
    lookup: impl Fn(&str) -> Option<String>,
) {
    let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(v) = non_empty("SWIPE_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = non_empty("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = non_empty("SWIPE_ACCESS_TOKEN") {
        settings.access_token = Some(v);
    }
    if let Some(v) = non_empty("APP__ACCESS_TOKEN") {
        settings.access_token = Some(v);
    }

    if let Some(v) = non_empty("APP__REQUEST_TIMEOUT_SECS") {
        match v.trim().parse::<u64>() {
            Ok(parsed) if valid_timeout(parsed) => settings.request_timeout_secs = parsed,
            _ => warn!("ignoring APP__REQUEST_TIMEOUT_SECS={v:?}: expected a positive integer"),
        }
    }
    if let Some(v) = non_empty("APP__SWIPE_THRESHOLD") {
        match v.trim().parse::<f32>() {
            Ok(parsed) if valid_threshold(parsed) => settings.swipe_threshold = parsed,
            _ => warn!("ignoring APP__SWIPE_THRESHOLD={v:?}: expected a positive finite number"),
        }
    }
}

// A zero timeout fails every request; a NaN threshold never commits.
fn valid_timeout(secs: u64) -> bool {
    secs > 0
}

fn valid_threshold(threshold: f32) -> bool {
    threshold.is_finite() && threshold > 0.0
}

/// Endpoint paths are joined relative to the server url, so it must end in
/// a slash or the last path segment (usually `api`) would be replaced.
pub fn normalize_server_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return ClientSettings::default().server_url;
    }
    if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
