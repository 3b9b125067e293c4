use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub upstream: UpstreamConfig,
    pub auth: AuthConfig,
    pub server: ServerConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Backend origin without trailing slash
    pub api_base: Option<String>,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Session cookie names, in precedence order
    pub cookie_names: Vec<String>,
    pub admin_api_key: Option<String>,
    pub api_key: Option<String>,
    pub api_key_header: String,
    /// Forward the raw Cookie header on every upstream call
    pub forward_cookies: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub app_url: Option<String>,
    pub enable_request_logging: bool,
    pub dashboard_dir: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub cors_origins: Vec<String>,
    pub secure_cookies: bool,
    pub login_path: String,
    pub protected_prefixes: Vec<String>,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Backend API base is not configured (set API_BASE or NEXT_PUBLIC_API_BASE)")]
    MissingApiBase,
}

pub const DEFAULT_COOKIE_NAMES: &[&str] = &["accessToken", "token", "cm_admin_token"];

pub const DEFAULT_PROTECTED_PREFIXES: &[&str] = &[
    "/dashboard",
    "/bookings",
    "/customers",
    "/providers",
    "/categories",
    "/services",
    "/promocodes",
    "/notifications",
    "/earnings",
    "/settings",
];

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_overrides(lookup)
    }

    fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        // Upstream
        self.upstream.api_base = non_empty("API_BASE")
            .or_else(|| non_empty("NEXT_PUBLIC_API_BASE"))
            .map(|base| base.trim_end_matches('/').to_string())
            .filter(|base| !base.is_empty());
        if let Some(v) = non_empty("UPSTREAM_TIMEOUT_SECS") {
            self.upstream.timeout_secs = v.parse().unwrap_or(self.upstream.timeout_secs);
        }
        if let Some(v) = non_empty("UPSTREAM_CONNECT_TIMEOUT_SECS") {
            self.upstream.connect_timeout_secs = v.parse().unwrap_or(self.upstream.connect_timeout_secs);
        }

        // Auth
        if let Some(v) = non_empty("AUTH_COOKIE_NAMES") {
            let names = split_list(&v);
            if !names.is_empty() {
                self.auth.cookie_names = names;
            }
        }
        self.auth.admin_api_key = non_empty("ADMIN_API_KEY");
        self.auth.api_key = non_empty("API_KEY");
        if let Some(v) = non_empty("API_KEY_HEADER") {
            self.auth.api_key_header = v.to_ascii_lowercase();
        }
        if let Some(v) = non_empty("FORWARD_COOKIES") {
            self.auth.forward_cookies = parse_flag(&v).unwrap_or(self.auth.forward_cookies);
        }

        // Server
        if let Some(v) = non_empty("GATEWAY_PORT").or_else(|| non_empty("PORT")) {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        self.server.app_url = non_empty("APP_URL")
            .or_else(|| non_empty("NEXT_PUBLIC_APP_URL"))
            .map(|url| url.trim_end_matches('/').to_string());
        if let Some(v) = non_empty("REQUEST_LOGGING") {
            self.server.enable_request_logging = parse_flag(&v).unwrap_or(self.server.enable_request_logging);
        }
        self.server.dashboard_dir = non_empty("DASHBOARD_DIR");

        // Security
        if let Some(v) = non_empty("CORS_ORIGINS") {
            self.security.cors_origins = split_list(&v);
        }
        if let Some(v) = non_empty("SECURE_COOKIES") {
            self.security.secure_cookies = parse_flag(&v).unwrap_or(self.security.secure_cookies);
        }
        if let Some(v) = non_empty("LOGIN_PATH") {
            self.security.login_path = v;
        }
        if let Some(v) = non_empty("PROTECTED_PREFIXES") {
            self.security.protected_prefixes = split_list(&v);
        }

        self
    }

    /// Backend origin every upstream URL is built from.
    pub fn resolve_base(&self) -> Result<&str, ConfigError> {
        self.upstream
            .api_base
            .as_deref()
            .filter(|base| !base.is_empty())
            .ok_or(ConfigError::MissingApiBase)
    }

    /// Copy with every secret masked, for display.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        let mask = |v: &mut Option<String>| {
            if v.is_some() {
                *v = Some("********".to_string());
            }
        };
        mask(&mut copy.auth.admin_api_key);
        mask(&mut copy.auth.api_key);
        copy
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            upstream: UpstreamConfig {
                api_base: None,
                timeout_secs: 30,
                connect_timeout_secs: 5,
            },
            auth: AuthConfig::default(),
            server: ServerConfig {
                port: 3000,
                app_url: None,
                enable_request_logging: true,
                dashboard_dir: None,
            },
            security: SecurityConfig {
                cors_origins: vec!["http://localhost:3000".to_string(), "http://localhost:5173".to_string()],
                secure_cookies: false,
                login_path: "/login".to_string(),
                protected_prefixes: default_protected_prefixes(),
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            upstream: UpstreamConfig {
                api_base: None,
                timeout_secs: 20,
                connect_timeout_secs: 5,
            },
            auth: AuthConfig::default(),
            server: ServerConfig {
                port: 3000,
                app_url: None,
                enable_request_logging: true,
                dashboard_dir: None,
            },
            security: SecurityConfig {
                cors_origins: Vec::new(),
                secure_cookies: true,
                login_path: "/login".to_string(),
                protected_prefixes: default_protected_prefixes(),
            },
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            upstream: UpstreamConfig {
                api_base: None,
                timeout_secs: 15,
                connect_timeout_secs: 3,
            },
            auth: AuthConfig::default(),
            server: ServerConfig {
                port: 3000,
                app_url: None,
                enable_request_logging: false,
                dashboard_dir: None,
            },
            security: SecurityConfig {
                cors_origins: Vec::new(),
                secure_cookies: true,
                login_path: "/login".to_string(),
                protected_prefixes: default_protected_prefixes(),
            },
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            cookie_names: DEFAULT_COOKIE_NAMES.iter().map(|s| s.to_string()).collect(),
            admin_api_key: None,
            api_key: None,
            api_key_header: "x-api-key".to_string(),
            forward_cookies: false,
        }
    }
}

fn default_protected_prefixes() -> Vec<String> {
    DEFAULT_PROTECTED_PREFIXES.iter().map(|s| s.to_string()).collect()
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}
