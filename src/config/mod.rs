use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub list: ListConfig,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
    pub controllers: ControllerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListConfig {
    pub default_page_length: u32,
    pub max_page_length: Option<u32>,
    pub debug_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Site database name swapped into DATABASE_URL, if set
    pub site_db: Option<String>,
    pub max_connections: u32,
    pub connection_timeout: u64,
    pub enable_query_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub port: u16,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// YAML file declaring per-doctype list layouts, sort options and filter restrictions
    pub definitions_path: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // List overrides
        if let Ok(v) = env::var("LIST_DEFAULT_PAGE_LENGTH") {
            self.list.default_page_length = v.parse().unwrap_or(self.list.default_page_length);
        }
        if let Ok(v) = env::var("LIST_MAX_PAGE_LENGTH") {
            self.list.max_page_length = v.parse().ok();
        }
        if let Ok(v) = env::var("LIST_DEBUG_LOGGING") {
            self.list.debug_logging = v.parse().unwrap_or(self.list.debug_logging);
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_SITE_DB") {
            self.database.site_db = Some(v).filter(|s| !s.is_empty());
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }
        if let Ok(v) = env::var("DATABASE_ENABLE_QUERY_LOGGING") {
            self.database.enable_query_logging = v.parse().unwrap_or(self.database.enable_query_logging);
        }

        // API overrides
        if let Ok(v) = env::var("API_PORT").or_else(|_| env::var("PORT")) {
            self.api.port = v.parse().unwrap_or(self.api.port);
        }
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("SECURITY_JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }

        // Controller overrides
        if let Ok(v) = env::var("CONTROLLERS_FILE") {
            self.controllers.definitions_path = Some(v).filter(|s| !s.is_empty());
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            list: ListConfig {
                default_page_length: 20,
                max_page_length: Some(1000),
                debug_logging: true,
            },
            database: DatabaseConfig {
                site_db: None,
                max_connections: 10,
                connection_timeout: 30,
                enable_query_logging: true,
            },
            api: ApiConfig {
                port: 3000,
                enable_request_logging: true,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["http://localhost:8080".to_string(), "http://localhost:5173".to_string()],
                jwt_secret: "development-secret".to_string(),
                jwt_expiry_hours: 24 * 7, // 1 week
            },
            controllers: ControllerConfig {
                definitions_path: Some("config/controllers.yaml".to_string()),
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            list: ListConfig {
                default_page_length: 20,
                max_page_length: Some(500),
                debug_logging: false,
            },
            database: DatabaseConfig {
                site_db: None,
                max_connections: 20,
                connection_timeout: 10,
                enable_query_logging: true,
            },
            api: ApiConfig {
                port: 3000,
                enable_request_logging: true,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://crm.staging.example.com".to_string()],
                jwt_secret: String::new(),
                jwt_expiry_hours: 24,
            },
            controllers: ControllerConfig::default(),
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            list: ListConfig {
                default_page_length: 20,
                max_page_length: Some(500),
                debug_logging: false,
            },
            database: DatabaseConfig {
                site_db: None,
                max_connections: 50,
                connection_timeout: 5,
                enable_query_logging: false,
            },
            api: ApiConfig {
                port: 3000,
                enable_request_logging: false,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://crm.example.com".to_string()],
                jwt_secret: String::new(),
                jwt_expiry_hours: 4,
            },
            controllers: ControllerConfig::default(),
        }
    }

    /// Clamp a requested page length to the configured maximum.
    /// Zero asks for every record, so it is clamped too when a maximum is set.
    pub fn cap_page_length(&self, requested: u32) -> u32 {
        match self.list.max_page_length {
            Some(max) if requested == 0 || requested > max => {
                if self.list.debug_logging {
                    tracing::warn!("Page length {} exceeds max {}, capping to max", requested, max);
                }
                max
            }
            _ => requested,
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[macro_export]
macro_rules! is_development {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Development)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.list.default_page_length, 20);
        assert_eq!(config.list.max_page_length, Some(1000));
        assert!(!config.security.jwt_secret.is_empty());
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert_eq!(config.list.max_page_length, Some(500));
        assert!(config.security.jwt_secret.is_empty());
        assert!(config.controllers.definitions_path.is_none());
    }

    #[test]
    fn caps_page_length_to_max() {
        let config = AppConfig::production();
        assert_eq!(config.cap_page_length(20), 20);
        assert_eq!(config.cap_page_length(5000), 500);
        assert_eq!(config.cap_page_length(0), 500);

        let mut unbounded = AppConfig::production();
        unbounded.list.max_page_length = None;
        assert_eq!(unbounded.cap_page_length(0), 0);
    }
}
