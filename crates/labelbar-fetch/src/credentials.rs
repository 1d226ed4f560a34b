//! Broker credentials.

use labelbar_types::ConfigError;

/// Base URL used when `IG_BASE_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "https://deal.ig.com";

/// Login details for the IG API.
#[derive(Clone)]
pub struct IgCredentials {
    /// Application key sent as `X-IG-API-KEY`.
    pub api_key: String,
    /// Account identifier.
    pub username: String,
    /// Account password.
    pub password: String,
    /// API root, without a trailing slash.
    pub base_url: String,
}

impl std::fmt::Debug for IgCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IgCredentials")
            .field("api_key", &"***")
            .field("username", &self.username)
            .field("password", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl IgCredentials {
    /// Reads `IG_API_KEY`, `IG_USERNAME`, `IG_PASSWORD` and `IG_BASE_URL`
    /// from the environment after loading a `.env` file, if one exists.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnv`] for the first required variable
    /// that is unset or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds credentials from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnv`] for the first required variable
    /// that is unset or empty.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| ConfigError::MissingEnv(key.to_string()))
        };

        Ok(Self {
            api_key: required("IG_API_KEY")?,
            username: required("IG_USERNAME")?,
            password: required("IG_PASSWORD")?,
            base_url: lookup("IG_BASE_URL")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
        })
    }
}
