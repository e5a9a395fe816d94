use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_SUMMARY_CHAR_LIMIT: usize = 200_000;
pub const DEFAULT_QA_CHAR_LIMIT: usize = 120_000;

/// Settings shared by the CLI and the HTTP server, read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub summary_char_limit: usize,
    pub qa_char_limit: usize,
    pub bind_addr: String,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_model: DEFAULT_MODEL.to_string(),
            gemini_base_url: DEFAULT_BASE_URL.to_string(),
            temperature: 0.3,
            max_output_tokens: 8192,
            summary_char_limit: DEFAULT_SUMMARY_CHAR_LIMIT,
            qa_char_limit: DEFAULT_QA_CHAR_LIMIT,
            bind_addr: "0.0.0.0:8000".to_string(),
            max_upload_bytes: 50 * 1024 * 1024,
        }
    }
}

impl Config {
    /// Loads `.env` if present, then overlays environment variables on the defaults.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let string = |name: &str, default: String| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(default)
        };

        Ok(Self {
            gemini_api_key: lookup("GEMINI_API_KEY").filter(|v| !v.trim().is_empty()),
            gemini_model: string("GEMINI_MODEL", defaults.gemini_model),
            gemini_base_url: string("GEMINI_BASE_URL", defaults.gemini_base_url)
                .trim_end_matches('/')
                .to_string(),
            temperature: parse_var(&lookup, "GEMINI_TEMPERATURE", defaults.temperature)?,
            max_output_tokens: parse_var(
                &lookup,
                "GEMINI_MAX_OUTPUT_TOKENS",
                defaults.max_output_tokens,
            )?,
            summary_char_limit: parse_var(
                &lookup,
                "SUMMARY_CHAR_LIMIT",
                defaults.summary_char_limit,
            )?,
            qa_char_limit: parse_var(&lookup, "QA_CHAR_LIMIT", defaults.qa_char_limit)?,
            bind_addr: string("BIND_ADDR", defaults.bind_addr),
            max_upload_bytes: parse_var(&lookup, "MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
        })
    }
}

fn parse_var<F, T>(lookup: &F, name: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(name) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {:?}", name, raw)),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        assert!(config.gemini_api_key.is_none());
        assert_eq!(config.gemini_model, DEFAULT_MODEL);
        assert_eq!(config.summary_char_limit, 200_000);
        assert_eq!(config.qa_char_limit, 120_000);
        assert_eq!(config.bind_addr, "0.0.0.0:8000");
    }

    #[test]
    fn overrides_are_applied() {
        let config = Config::from_lookup(lookup_from(&[
            ("GEMINI_API_KEY", "abc123"),
            ("GEMINI_MODEL", "gemini-2.5-pro"),
            ("GEMINI_BASE_URL", "http://localhost:9999/v1beta/"),
            ("QA_CHAR_LIMIT", "500"),
            ("GEMINI_TEMPERATURE", "0.7"),
        ]))
        .unwrap();

        assert_eq!(config.gemini_api_key.as_deref(), Some("abc123"));
        assert_eq!(config.gemini_model, "gemini-2.5-pro");
        assert_eq!(config.gemini_base_url, "http://localhost:9999/v1beta");
        assert_eq!(config.qa_char_limit, 500);
        assert!((config.temperature - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn blank_api_key_is_treated_as_missing() {
        let config = Config::from_lookup(lookup_from(&[("GEMINI_API_KEY", "  ")])).unwrap();
        assert!(config.gemini_api_key.is_none());
    }

    #[test]
    fn malformed_number_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[("SUMMARY_CHAR_LIMIT", "lots")])).unwrap_err();
        assert!(err.to_string().contains("SUMMARY_CHAR_LIMIT"));
    }
}
