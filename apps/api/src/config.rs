use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

/// 10 MiB; a résumé PDF is normally far smaller.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Request body limit for multipart uploads.
    pub max_upload_bytes: usize,
    /// Extra stop words, one per line, appended to the English list.
    pub stopwords_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            stopwords_path: None,
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
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            stopwords_path: std::env::var("STOPWORDS_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let port: u16 = parse_env("RESUME_MATCHER_TEST_UNSET_PORT", 8080).unwrap();
        assert_eq!(port, 8080);
    }

    #[test]
    fn test_parse_env_reads_value() {
        std::env::set_var("RESUME_MATCHER_TEST_LIMIT", " 2048 ");
        let limit: usize = parse_env("RESUME_MATCHER_TEST_LIMIT", 0).unwrap();
        assert_eq!(limit, 2048);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("RESUME_MATCHER_TEST_BAD_PORT", "eighty");
        let err = parse_env::<u16>("RESUME_MATCHER_TEST_BAD_PORT", 8080).unwrap_err();
        assert!(err.to_string().contains("RESUME_MATCHER_TEST_BAD_PORT"));
    }

    #[test]
    fn test_default_upload_limit_is_ten_mebibytes() {
        assert_eq!(Config::default().max_upload_bytes, 10 * 1024 * 1024);
    }
}
