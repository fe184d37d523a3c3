//! Credentials, base URL and photo fixture location.
//!
//! Loaded from `PETFRIENDS_*` environment variables by the runner; tests
//! build a `Config` directly.

use std::env;
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::types::Credentials;

pub const DEFAULT_BASE_URL: &str = "https://petfriends.skillfactory.ru";
pub const DEFAULT_INVALID_EMAIL: &str = "invalid@petfriends.test";
pub const DEFAULT_INVALID_PASSWORD: &str = "not-a-password";
pub const DEFAULT_IMAGES_DIR: &str = "images";

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub valid: Credentials,
    pub invalid: Credentials,
    pub images_dir: PathBuf,
}

impl Config {
    pub fn new(base_url: impl Into<String>, valid: Credentials) -> Self {
        Self {
            base_url: base_url.into(),
            valid,
            invalid: Credentials::new(DEFAULT_INVALID_EMAIL, DEFAULT_INVALID_PASSWORD),
            images_dir: PathBuf::from(DEFAULT_IMAGES_DIR),
        }
    }

    pub fn with_images_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.images_dir = dir.into();
        self
    }

    /// Load configuration from environment variables.
    ///
    /// - `PETFRIENDS_EMAIL`, `PETFRIENDS_PASSWORD` (required)
    /// - `PETFRIENDS_BASE_URL`
    /// - `PETFRIENDS_INVALID_EMAIL`, `PETFRIENDS_INVALID_PASSWORD`
    /// - `PETFRIENDS_IMAGES_DIR`
    pub fn from_env() -> Result<Self, ConfigError> {
        let email = required("PETFRIENDS_EMAIL")?;
        let password = required("PETFRIENDS_PASSWORD")?;
        let base_url = env::var("PETFRIENDS_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let mut config = Self::new(base_url, Credentials::new(email, password));
        if let Ok(email) = env::var("PETFRIENDS_INVALID_EMAIL") {
            config.invalid.email = email;
        }
        if let Ok(password) = env::var("PETFRIENDS_INVALID_PASSWORD") {
            config.invalid.password = password;
        }
        if let Ok(dir) = env::var("PETFRIENDS_IMAGES_DIR") {
            config.images_dir = PathBuf::from(dir);
        }
        Ok(config)
    }

    /// Path of a photo fixture inside `images_dir`.
    pub fn image(&self, file_name: &str) -> PathBuf {
        self.images_dir.join(file_name)
    }
}

fn required(var: &'static str) -> Result<String, ConfigError> {
    env::var(var).map_err(|_| ConfigError::Missing(var))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_requires_valid_credentials() {
        temp_env::with_vars_unset(["PETFRIENDS_EMAIL", "PETFRIENDS_PASSWORD"], || {
            let err = Config::from_env().unwrap_err();
            assert!(matches!(err, ConfigError::Missing("PETFRIENDS_EMAIL")));
        });
    }

    #[test]
    fn from_env_applies_defaults() {
        temp_env::with_vars(
            [
                ("PETFRIENDS_EMAIL", Some("me@example.com")),
                ("PETFRIENDS_PASSWORD", Some("secret")),
                ("PETFRIENDS_BASE_URL", None),
                ("PETFRIENDS_INVALID_EMAIL", None),
                ("PETFRIENDS_INVALID_PASSWORD", None),
                ("PETFRIENDS_IMAGES_DIR", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.base_url, DEFAULT_BASE_URL);
                assert_eq!(config.valid, Credentials::new("me@example.com", "secret"));
                assert_eq!(
                    config.invalid,
                    Credentials::new(DEFAULT_INVALID_EMAIL, DEFAULT_INVALID_PASSWORD)
                );
                assert_eq!(config.image("cat.jpg"), PathBuf::from("images/cat.jpg"));
            },
        );
    }

    #[test]
    fn from_env_reads_overrides() {
        temp_env::with_vars(
            [
                ("PETFRIENDS_EMAIL", Some("me@example.com")),
                ("PETFRIENDS_PASSWORD", Some("secret")),
                ("PETFRIENDS_BASE_URL", Some("http://127.0.0.1:3000")),
                ("PETFRIENDS_INVALID_EMAIL", Some("nobody@example.com")),
                ("PETFRIENDS_INVALID_PASSWORD", Some("wrong")),
                ("PETFRIENDS_IMAGES_DIR", Some("/tmp/pets")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.base_url, "http://127.0.0.1:3000");
                assert_eq!(config.invalid, Credentials::new("nobody@example.com", "wrong"));
                assert_eq!(config.image("cat.jpg"), PathBuf::from("/tmp/pets/cat.jpg"));
            },
        );
    }
}
