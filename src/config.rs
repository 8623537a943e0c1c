use std::env;

use url::Url;

use crate::error::AppError;

pub const DEFAULT_API_BASE_URL: &str = "https://kazeserenity.com/api/index.php";

#[derive(Clone, Debug)]
pub struct RemoteConfig {
    pub base_url: Url,
}

impl RemoteConfig {
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        let base_url = Url::parse(base_url)?;
        Ok(Self { base_url })
    }
}

/// The one admin credential. `None` disables local login entirely.
#[derive(Clone, Debug, Default)]
pub struct AdminConfig {
    pub password: Option<String>,
}

impl AdminConfig {
    pub fn new(password: impl Into<String>) -> Self {
        let password = password.into();
        Self {
            password: (!password.is_empty()).then_some(password),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub remote: RemoteConfig,
    pub admin: AdminConfig,
}

impl AppConfig {
    pub fn new(remote: RemoteConfig, admin: AdminConfig) -> Self {
        Self { remote, admin }
    }

    /// Reads `API_BASE_URL` and `ADMIN_PASSWORD` from the process environment.
    pub fn new_from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any variable source.
    ///
    /// A missing or blank `API_BASE_URL` falls back to [`DEFAULT_API_BASE_URL`];
    /// a malformed one is a configuration error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let base_url = lookup("API_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let remote = RemoteConfig::new(base_url.trim())
            .map_err(|e| AppError::Config(format!("API_BASE_URL is not a valid url: {}", e)))?;

        let admin = match lookup("ADMIN_PASSWORD") {
            Some(password) => AdminConfig::new(password),
            None => {
                tracing::warn!("ADMIN_PASSWORD is not set, admin login is disabled");
                AdminConfig::default()
            }
        };

        Ok(Self { remote, admin })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_admin_password_disables_login() {
        assert_eq!(AdminConfig::new("").password, None);
        assert_eq!(AdminConfig::new("s3cret").password.as_deref(), Some("s3cret"));
    }

    #[test]
    fn default_base_url_parses() {
        let remote = RemoteConfig::new(DEFAULT_API_BASE_URL).expect("default url");
        assert_eq!(remote.base_url.path(), "/api/index.php");
    }

    #[test]
    fn rejects_relative_url() {
        assert!(matches!(
            RemoteConfig::new("api/index.php"),
            Err(AppError::InvalidUrl(_))
        ));
    }

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        }
    }

    #[test]
    fn base_url_override_wins() {
        let config = AppConfig::from_lookup(vars(&[
            ("API_BASE_URL", "http://localhost/kaze/api/index.php"),
            ("ADMIN_PASSWORD", "s3cret"),
        ]))
        .expect("valid config");

        assert_eq!(
            config.remote.base_url.as_str(),
            "http://localhost/kaze/api/index.php"
        );
        assert_eq!(config.admin.password.as_deref(), Some("s3cret"));
    }

    #[test]
    fn missing_or_blank_base_url_uses_default() {
        let unset = AppConfig::from_lookup(vars(&[])).expect("valid config");
        assert_eq!(unset.remote.base_url.as_str(), DEFAULT_API_BASE_URL);

        let blank =
            AppConfig::from_lookup(vars(&[("API_BASE_URL", "   ")])).expect("valid config");
        assert_eq!(blank.remote.base_url.as_str(), DEFAULT_API_BASE_URL);
    }

    #[test]
    fn malformed_base_url_is_a_config_error() {
        let result = AppConfig::from_lookup(vars(&[("API_BASE_URL", "not a url")]));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn missing_admin_password_disables_login() {
        let config = AppConfig::from_lookup(vars(&[])).expect("valid config");
        assert_eq!(config.admin.password, None);

        let empty =
            AppConfig::from_lookup(vars(&[("ADMIN_PASSWORD", "")])).expect("valid config");
        assert_eq!(empty.admin.password, None);
    }
}
