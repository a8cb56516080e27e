use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every setting has a default, so a bare environment starts a working server.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Transient storage for uploaded résumés. Created at startup if absent.
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    /// Number of characters of extracted text echoed back as a preview.
    pub preview_chars: usize,
    /// Entity labels whose spans feed the named-entity pass.
    pub entity_labels: Vec<String>,
}

pub const DEFAULT_ENTITY_LABELS: &[&str] = &["SKILL", "PRODUCT", "ORG"];

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            upload_dir: PathBuf::from("uploads"),
            max_upload_bytes: 16 * 1024 * 1024,
            preview_chars: 500,
            entity_labels: DEFAULT_ENTITY_LABELS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            upload_dir: std::env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            preview_chars: parse_env("PREVIEW_CHARS", defaults.preview_chars)?,
            entity_labels: std::env::var("ENTITY_LABELS")
                .map(|raw| parse_labels(&raw))
                .unwrap_or(defaults.entity_labels),
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

/// Splits a comma-separated label list, normalizing to upper case.
fn parse_labels(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|label| label.trim().to_uppercase())
        .filter(|label| !label.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.upload_dir, PathBuf::from("uploads"));
        assert_eq!(config.preview_chars, 500);
        assert_eq!(config.entity_labels, vec!["SKILL", "PRODUCT", "ORG"]);
    }

    #[test]
    fn test_parse_labels_trims_and_uppercases() {
        assert_eq!(parse_labels(" org, product ,,skill"), vec!["ORG", "PRODUCT", "SKILL"]);
        assert!(parse_labels(" , ").is_empty());
    }
}
