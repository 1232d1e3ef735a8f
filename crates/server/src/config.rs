use std::fs;

use pokeapi_client::DEFAULT_BASE_URL;
use serde::{Deserialize, Deserializer};
use tracing::warn;

const DEFAULT_LISTING_LIMIT: u32 = 5;

/// Keys missing from `server.toml` keep their defaults; unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(alias = "bind_addr")]
    pub server_bind: String,
    pub pokeapi_base_url: String,
    #[serde(deserialize_with = "listing_limit")]
    pub listing_limit: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8080".into(),
            pokeapi_base_url: DEFAULT_BASE_URL.into(),
            listing_limit: DEFAULT_LISTING_LIMIT,
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = fs::read_to_string("server.toml")
        .ok()
        .and_then(|raw| parse_settings_file(&raw))
        .unwrap_or_default();
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());

    settings
}

pub(crate) fn parse_settings_file(raw: &str) -> Option<Settings> {
    match toml::from_str::<Settings>(raw) {
        Ok(settings) => Some(settings),
        Err(error) => {
            warn!(%error, "ignoring unreadable server.toml");
            None
        }
    }
}

pub(crate) fn apply_env_overrides(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = var("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = var("POKEAPI_BASE_URL") {
        settings.pokeapi_base_url = v;
    }
    if let Some(v) = var("APP__POKEAPI_BASE_URL") {
        settings.pokeapi_base_url = v;
    }

    if let Some(v) = var("APP__LISTING_LIMIT") {
        match v.trim().parse::<u32>() {
            Ok(parsed) => settings.listing_limit = parsed,
            Err(_) => warn!(value = %v, "ignoring invalid APP__LISTING_LIMIT"),
        }
    }
}

/// Accepts an integer or a numeric string; anything else keeps the default.
fn listing_limit<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = toml::Value::deserialize(deserializer)?;
    let parsed = match &value {
        toml::Value::Integer(n) => u32::try_from(*n).ok(),
        toml::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(parsed.unwrap_or_else(|| {
        warn!(%value, "ignoring invalid listing_limit in server.toml");
        DEFAULT_LISTING_LIMIT
    }))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
