use once_cell::sync::Lazy;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub session: SessionConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

/// Connection settings for the upstream dating provider
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub api_key: SecretString,
    pub timeout_secs: u64,
    /// How much of an unparseable upstream body is echoed into the logs
    pub log_preview_chars: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub secure_cookies: bool,
    pub max_age_secs: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Empty list means permissive CORS
    pub cors_origins: Vec<String>,
}

const THIRTY_DAYS_IN_SECONDS: i64 = 60 * 60 * 24 * 30;

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Some(port) = env::var("PAIRLY_BFF_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|v| v.parse().ok())
        {
            self.server.port = port;
        }

        // Upstream overrides
        if let Ok(v) = env::var("DATING_EXTERNAL_API_URL") {
            self.upstream.base_url = v.trim().to_string();
        }
        if let Ok(v) = env::var("DATING_EXTERNAL_API_KEY") {
            self.upstream.api_key = SecretString::from(v);
        }
        if let Ok(v) = env::var("UPSTREAM_TIMEOUT_SECS") {
            self.upstream.timeout_secs = v.parse().unwrap_or(self.upstream.timeout_secs);
        }
        if let Ok(v) = env::var("UPSTREAM_LOG_PREVIEW_CHARS") {
            self.upstream.log_preview_chars = v.parse().unwrap_or(self.upstream.log_preview_chars);
        }

        // Session overrides
        if let Ok(v) = env::var("SESSION_COOKIE_SECURE") {
            self.session.secure_cookies = v.parse().unwrap_or(self.session.secure_cookies);
        }
        if let Ok(v) = env::var("SESSION_MAX_AGE_SECS") {
            self.session.max_age_secs = v.parse().unwrap_or(self.session.max_age_secs);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        self
    }

    /// Startup check for settings that have no usable default
    pub fn validate(&self) -> Result<(), String> {
        if url::Url::parse(&self.upstream.base_url).is_err() {
            return Err(format!(
                "DATING_EXTERNAL_API_URL is not a valid URL: '{}'",
                self.upstream.base_url
            ));
        }

        if self.environment != Environment::Development {
            use secrecy::ExposeSecret;
            if self.upstream.api_key.expose_secret().is_empty() {
                return Err("DATING_EXTERNAL_API_KEY must be set outside development".to_string());
            }
        }

        Ok(())
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig { port: 3000 },
            upstream: UpstreamConfig {
                base_url: "http://localhost:8080".to_string(),
                api_key: SecretString::from(String::new()),
                timeout_secs: 30,
                log_preview_chars: 300,
            },
            session: SessionConfig {
                secure_cookies: false,
                max_age_secs: THIRTY_DAYS_IN_SECONDS,
            },
            security: SecurityConfig {
                cors_origins: vec![
                    "http://localhost:3000".to_string(),
                    "http://localhost:5173".to_string(),
                ],
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig { port: 3000 },
            upstream: UpstreamConfig {
                base_url: String::new(),
                api_key: SecretString::from(String::new()),
                timeout_secs: 15,
                log_preview_chars: 300,
            },
            session: SessionConfig {
                secure_cookies: false,
                max_age_secs: THIRTY_DAYS_IN_SECONDS,
            },
            security: SecurityConfig {
                cors_origins: Vec::new(),
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig { port: 3000 },
            upstream: UpstreamConfig {
                base_url: String::new(),
                api_key: SecretString::from(String::new()),
                timeout_secs: 10,
                log_preview_chars: 120,
            },
            session: SessionConfig {
                secure_cookies: true,
                max_age_secs: THIRTY_DAYS_IN_SECONDS,
            },
            security: SecurityConfig {
                cors_origins: Vec::new(),
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert!(!config.session.secure_cookies);
        assert_eq!(config.session.max_age_secs, 2_592_000);
        assert_eq!(config.upstream.log_preview_chars, 300);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert!(config.session.secure_cookies);
        assert!(config.upstream.api_key.expose_secret().is_empty());
        // No upstream URL until the environment provides one
        assert!(config.validate().is_err());
    }

    #[test]
    fn production_requires_api_key() {
        let mut config = AppConfig::production();
        config.upstream.base_url = "https://api.example.com".to_string();
        assert!(config.validate().unwrap_err().contains("DATING_EXTERNAL_API_KEY"));

        config.upstream.api_key = SecretString::from("k3y".to_string());
        assert!(config.validate().is_ok());
    }
}
