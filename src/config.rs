use std::{collections::HashMap, env, fs, path::Path};

use thiserror::Error;

use crate::services::geocoding_client::geocoding_service::DEFAULT_GEOCODING_HOST;

pub const DEFAULT_PORT: u16 = 3000;
const QUOTES: &[char] = &['"', '\''];

pub const TOKEN_VARS: [&str; 2] = ["MAPBOX_TOKEN", "NEXT_PUBLIC_MAPBOX_TOKEN"];

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub mapbox_token: Option<String>,
    pub mapbox_host: String,
    pub auth_key: Option<String>,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name: "PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            mapbox_token: map_token(&lookup),
            mapbox_host: lookup("MAPBOX_HOST")
                .filter(|h| !h.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_GEOCODING_HOST.to_string()),
            auth_key: lookup("AUTH_KEY").filter(|k| !k.is_empty()),
            port,
        })
    }
}

/// First non-empty token variable wins.
pub fn map_token(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    TOKEN_VARS
        .iter()
        .filter_map(|name| lookup(*name))
        .find(|t| !t.trim().is_empty())
}

/// Reads `KEY=VALUE` lines, skipping comments and stripping one layer of
/// quotes. A missing file yields an empty map.
pub fn read_env_file(path: &Path) -> HashMap<String, String> {
    fs::read_to_string(path)
        .map(|raw| parse_env(&raw))
        .unwrap_or_default()
}

pub fn parse_env(raw: &str) -> HashMap<String, String> {
    raw.lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .filter(|(key, _)| !key.trim().is_empty())
        .map(|(key, value)| {
            let value = value.trim();
            let value = value.strip_prefix(QUOTES).unwrap_or(value);
            let value = value.strip_suffix(QUOTES).unwrap_or(value);
            (key.trim().to_string(), value.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.mapbox_token, None);
        assert_eq!(config.mapbox_host, "https://api.mapbox.com");
        assert_eq!(config.auth_key, None);
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn reads_values() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("NEXT_PUBLIC_MAPBOX_TOKEN", "pk.public"),
            ("MAPBOX_HOST", "http://localhost:9000"),
            ("AUTH_KEY", "secret"),
            ("PORT", "8080"),
        ]))
        .unwrap();

        assert_eq!(config.mapbox_token.as_deref(), Some("pk.public"));
        assert_eq!(config.mapbox_host, "http://localhost:9000");
        assert_eq!(config.auth_key.as_deref(), Some("secret"));
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn primary_token_variable_wins() {
        let token = map_token(lookup_from(&[
            ("MAPBOX_TOKEN", "pk.primary"),
            ("NEXT_PUBLIC_MAPBOX_TOKEN", "pk.public"),
        ]));

        assert_eq!(token.as_deref(), Some("pk.primary"));
    }

    #[test]
    fn bad_port() {
        let err = AppConfig::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();

        assert_eq!(
            err,
            ConfigError::InvalidValue {
                name: "PORT",
                value: "eighty".to_string()
            }
        );
    }

    #[test]
    fn parses_env_file() {
        let vars = parse_env(
            "# map\nMAPBOX_TOKEN=\"pk.quoted\"\n  OTHER = 'single'\nnot a pair\nEMPTY=\nURL=http://a/b?c=d\n",
        );

        assert_eq!(vars.get("MAPBOX_TOKEN").map(String::as_str), Some("pk.quoted"));
        assert_eq!(vars.get("OTHER").map(String::as_str), Some("single"));
        assert_eq!(vars.get("EMPTY").map(String::as_str), Some(""));
        assert_eq!(vars.get("URL").map(String::as_str), Some("http://a/b?c=d"));
        assert_eq!(vars.len(), 4);
    }

    #[test]
    fn missing_env_file_is_empty() {
        assert!(read_env_file(Path::new("/definitely/not/here/.env.local")).is_empty());
    }
}
