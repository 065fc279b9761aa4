use keel_model::SecureCredential;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const APP_DIR: &str = "keel";
const CONFIG_FILE: &str = "config.json";

pub const ENV_BACKEND_URL: &str = "KEEL_BACKEND_URL";
pub const ENV_API_KEY: &str = "KEEL_API_KEY";
pub const ENV_ACCESS_TOKEN: &str = "KEEL_ACCESS_TOKEN";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to write config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode config: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the backend (REST and auth endpoints hang off it)
    pub backend_url: String,
    /// Project API key sent as the `apikey` header
    pub api_key: String,
    /// Session access token; absent means not signed in
    pub access_token: Option<String>,
    /// Table holding one profile row per user
    pub profile_table: String,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:54321".to_string(),
            api_key: String::new(),
            access_token: None,
            profile_table: "users".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("backend_url", &self.backend_url)
            .field("api_key", &"[REDACTED]")
            .field("has_access_token", &self.access_token.is_some())
            .field("profile_table", &self.profile_table)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl Config {
    /// Defaults, then the user config file, then environment overrides.
    /// A `.env` in the working directory is folded into the environment first.
    pub fn load() -> Self {
        if let Err(e) = dotenvy::dotenv()
            && !e.not_found()
        {
            log::warn!("Ignoring unreadable .env file: {}", e);
        }

        let mut config = match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Read a config file, falling back to defaults when it is missing or
    /// malformed.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<Config>(&content) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!(
                        "Ignoring malformed config {}: {}",
                        path.display(),
                        e
                    );
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Failed to read config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Apply environment-style overrides. Empty values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(ENV_BACKEND_URL) {
            self.backend_url = url;
        }
        if let Some(key) = get(ENV_API_KEY) {
            self.api_key = key;
        }
        if let Some(token) = get(ENV_ACCESS_TOKEN) {
            self.access_token = Some(token);
        }
    }

    pub fn access_token(&self) -> Option<SecureCredential> {
        self.access_token.as_deref().map(SecureCredential::from)
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Drop the access token stored in the file at `path`.
    ///
    /// Only what the file itself holds is rewritten; environment overrides
    /// are never persisted. Nothing is written when the file has no token.
    pub fn clear_stored_token(path: &Path) -> Result<(), ConfigError> {
        let mut stored = Self::load_from(path);
        if stored.access_token.take().is_none() {
            return Ok(());
        }
        stored.save_to(path)
    }

    /// Whether the environment supplies an access token that will be picked
    /// up again on the next load.
    pub fn token_from_env(lookup: impl Fn(&str) -> Option<String>) -> bool {
        lookup(ENV_ACCESS_TOKEN).is_some_and(|v| !v.trim().is_empty())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.json"));
        assert_eq!(config.backend_url, "http://localhost:54321");
        assert_eq!(config.profile_table, "users");
        assert!(config.access_token.is_none());
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"backend_url":"https://db.example.org"}"#)
            .unwrap();

        let config = Config::load_from(&path);
        assert_eq!(config.backend_url, "https://db.example.org");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn malformed_file_is_ignored() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert_eq!(Config::load_from(&path).profile_table, "users");
    }

    #[test]
    fn overrides_replace_file_values_but_skip_blanks() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_BACKEND_URL, "https://override.example.org"),
            (ENV_API_KEY, "   "),
            (ENV_ACCESS_TOKEN, "jwt"),
        ]);
        let mut config = Config {
            api_key: "from-file".into(),
            ..Config::default()
        };
        config.apply_overrides(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.backend_url, "https://override.example.org");
        assert_eq!(config.api_key, "from-file");
        assert_eq!(config.access_token(), Some(SecureCredential::from("jwt")));
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            backend_url: "https://db.example.org".into(),
            profile_table: "profiles".into(),
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path);
        assert_eq!(loaded.backend_url, "https://db.example.org");
        assert_eq!(loaded.profile_table, "profiles");
    }

    #[test]
    fn clearing_token_keeps_file_values_and_skips_overrides() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"backend_url":"https://file.example.org","api_key":"file-key","access_token":"file-jwt"}"#,
        )
        .unwrap();

        // The running process sees env values layered on top of the file.
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_BACKEND_URL, "https://env.example.org"),
            (ENV_API_KEY, "env-key"),
            (ENV_ACCESS_TOKEN, "env-jwt"),
        ]);
        let mut merged = Config::load_from(&path);
        merged.apply_overrides(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(merged.api_key, "env-key");

        Config::clear_stored_token(&path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(!raw.contains("env-key"));
        assert!(!raw.contains("env.example.org"));
        let stored = Config::load_from(&path);
        assert_eq!(stored.access_token, None);
        assert_eq!(stored.api_key, "file-key");
        assert_eq!(stored.backend_url, "https://file.example.org");

        // A token from the environment survives; callers warn about it.
        assert!(Config::token_from_env(|k| {
            env.get(k).map(|v| v.to_string())
        }));
    }

    #[test]
    fn clearing_token_without_a_file_writes_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        Config::clear_stored_token(&path).unwrap();

        assert!(!path.exists());
        assert!(!Config::token_from_env(|_| Some("  ".to_string())));
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let config = Config {
            api_key: "anon-key-value".into(),
            access_token: Some("token-value".into()),
            ..Config::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("anon-key-value"));
        assert!(!debug.contains("token-value"));
    }
}
