//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CARTWHEEL_PROFILE` - Profile directory holding persisted session
//!   state (default: `.cartwheel`)
//! - `CARTWHEEL_CATALOG` - Path to the catalog JSON file (default:
//!   `catalog.json`)
//! - `CARTWHEEL_USER` - Identity of the signed-in shopper; required for
//!   purchases and checkout

use std::path::PathBuf;

use cartwheel_core::UserId;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),
}

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Profile directory backing the persistence substrate.
    pub profile_dir: PathBuf,
    /// Catalog JSON path (the catalog-API stand-in).
    pub catalog_path: PathBuf,
    /// Signed-in shopper identity, when configured.
    pub user: Option<UserId>,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from a `.env` file if present.
    #[must_use]
    pub fn from_env() -> Self {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self {
            profile_dir: env_or("CARTWHEEL_PROFILE", ".cartwheel").into(),
            catalog_path: env_or("CARTWHEEL_CATALOG", "catalog.json").into(),
            user: std::env::var("CARTWHEEL_USER").ok().map(UserId::new),
        }
    }

    /// The signed-in shopper, required for purchases and checkout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when `CARTWHEEL_USER` is not
    /// set.
    pub fn require_user(&self) -> Result<&UserId, ConfigError> {
        self.user
            .as_ref()
            .ok_or(ConfigError::MissingEnvVar("CARTWHEEL_USER"))
    }
}

/// Get an environment variable with a default value.
fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_require_user() {
        let mut config = CliConfig {
            profile_dir: ".cartwheel".into(),
            catalog_path: "catalog.json".into(),
            user: None,
        };
        assert!(config.require_user().is_err());

        config.user = Some(UserId::new("user-1"));
        assert_eq!(config.require_user().unwrap().as_str(), "user-1");
    }
}
