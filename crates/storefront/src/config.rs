//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SUPABASE_URL` - Base URL of the Supabase project (e.g., `https://xyz.supabase.co`)
//! - `SUPABASE_ANON_KEY` - Anon API key for the project
//!
//! ## Optional
//! - `REWIRED_REQUEST_TIMEOUT_SECS` - Gateway request timeout (default: 10)

use std::collections::HashMap;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Minimum Shannon entropy for the API key, in bits per character. Real keys
/// are JWT-shaped and clear this comfortably; keyboard mashing does not.
const MIN_SECRET_ENTROPY: f64 = 3.3;

/// Substrings that mark a secret as a copy-paste placeholder (checked
/// case-insensitively).
const PLACEHOLDER_MARKERS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Supabase backend configuration
    pub supabase: SupabaseConfig,
    /// Timeout applied to every gateway request
    pub request_timeout: Duration,
}

/// Supabase backend configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct SupabaseConfig {
    /// Project base URL (e.g., `https://xyz.supabase.co`)
    pub url: String,
    /// Anon API key, sent with every request
    pub anon_key: SecretString,
}

impl std::fmt::Debug for SupabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseConfig")
            .field("url", &self.url)
            .field("anon_key", &"[REDACTED]")
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the API key fails validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let supabase = SupabaseConfig::from_env()?;

        let request_timeout = match optional_env("REWIRED_REQUEST_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.parse::<u64>().map_err(|e| {
                    ConfigError::InvalidEnvVar(
                        "REWIRED_REQUEST_TIMEOUT_SECS".to_owned(),
                        e.to_string(),
                    )
                })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        Ok(Self {
            supabase,
            request_timeout,
        })
    }
}

impl SupabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = require_env("SUPABASE_URL")?;
        validate_base_url(&url, "SUPABASE_URL")?;

        Ok(Self {
            url,
            anon_key: load_secret("SUPABASE_ANON_KEY")?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn require_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_owned()))
}

/// Get an optional environment variable.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Validate that a base URL parses and has an http(s) scheme.
fn validate_base_url(value: &str, var_name: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_owned(), e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_owned(),
            format!("expected http(s) URL, got scheme '{}'", url.scheme()),
        ));
    }

    Ok(())
}

/// Shannon entropy of the string, in bits per character.
fn entropy_bits_per_char(s: &str) -> f64 {
    let mut counts: HashMap<char, f64> = HashMap::new();
    let mut len = 0.0_f64;
    for c in s.chars() {
        *counts.entry(c).or_insert(0.0) += 1.0;
        len += 1.0;
    }
    if len == 0.0 {
        return 0.0;
    }

    counts
        .values()
        .map(|count| {
            let p = count / len;
            -p * p.log2()
        })
        .sum()
}

/// Reject placeholder-looking or low-entropy secrets before they reach the
/// wire.
fn vet_secret(value: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = value.to_lowercase();
    if let Some(marker) = PLACEHOLDER_MARKERS
        .iter()
        .find(|marker| lower.contains(*marker))
    {
        return Err(ConfigError::InsecureSecret(
            var_name.to_owned(),
            format!("appears to be a placeholder (contains '{marker}')"),
        ));
    }

    let entropy = entropy_bits_per_char(value);
    if entropy < MIN_SECRET_ENTROPY {
        return Err(ConfigError::InsecureSecret(
            var_name.to_owned(),
            format!("entropy too low ({entropy:.2} bits/char, need >= {MIN_SECRET_ENTROPY:.1})"),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn load_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = require_env(key)?;
    vet_secret(&value, key)?;
    Ok(SecretString::from(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_entropy_of_empty_and_uniform_strings_is_zero() {
        assert!(entropy_bits_per_char("").abs() < f64::EPSILON);
        assert!(entropy_bits_per_char("aaaaaaa").abs() < f64::EPSILON);
    }

    #[test]
    fn test_entropy_of_random_looking_string_is_high() {
        assert!(entropy_bits_per_char("aB3$xY9!mK2@nL5#") > 3.3);
    }

    #[test]
    fn test_vet_secret_rejects_placeholders() {
        let err = vet_secret("your-api-key-here", "TEST_VAR").unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
        assert!(err.to_string().contains("placeholder"));
    }

    #[test]
    fn test_vet_secret_rejects_low_entropy() {
        let err = vet_secret("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "TEST_VAR").unwrap_err();
        assert!(err.to_string().contains("entropy too low"));
    }

    #[test]
    fn test_vet_secret_accepts_a_real_looking_key() {
        assert!(vet_secret("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6", "TEST_VAR").is_ok());
    }

    #[test]
    fn test_validate_base_url() {
        assert!(validate_base_url("https://xyz.supabase.co", "TEST").is_ok());
        assert!(validate_base_url("http://localhost:54321", "TEST").is_ok());
        assert!(validate_base_url("not a url", "TEST").is_err());
        assert!(validate_base_url("ftp://xyz.supabase.co", "TEST").is_err());
    }

    #[test]
    fn test_supabase_config_debug_redacts_key() {
        let config = SupabaseConfig {
            url: "https://xyz.supabase.co".to_owned(),
            anon_key: SecretString::from("kYq83vN1pR6tW9zL4mD7"),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("xyz.supabase.co"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("kYq83vN1pR6tW9zL4mD7"));
    }
}
