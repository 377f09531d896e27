// Server configuration loaded from environment variables.
// Decision: Same variable names as the rest of the stack (HOST/PORT, API_PREFIX, CORS_ALLOWED_ORIGINS)
// Decision: Empty API_PREFIX means routes are served at the root

use axum::http::HeaderValue;
use std::net::SocketAddr;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 9000;

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to bind
    pub port: u16,
    /// Prefix for all API routes (e.g. "/api"); `/health` and Swagger UI are never prefixed
    pub api_prefix: String,
    /// Allowed CORS origins. Empty means same-origin only and no CORS layer.
    pub cors_allowed_origins: Vec<HeaderValue>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            api_prefix: String::new(),
            cors_allowed_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Create configuration from environment variables
    ///
    /// Environment variables:
    /// - `HOST`: Bind interface (default: "0.0.0.0")
    /// - `PORT`: Bind port (default: 9000)
    /// - `API_PREFIX`: Route prefix, e.g. "/api" (default: none)
    /// - `CORS_ALLOWED_ORIGINS`: Comma-separated origins (default: none)
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let port = match var("PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(port = %raw, "Invalid PORT, using default {}", DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        Self {
            host: var("HOST")
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            api_prefix: var("API_PREFIX")
                .map(|p| normalize_prefix(&p))
                .unwrap_or_default(),
            cors_allowed_origins: var("CORS_ALLOWED_ORIGINS")
                .filter(|s| !s.is_empty())
                .map(|s| s.split(',').filter_map(|s| s.trim().parse().ok()).collect())
                .unwrap_or_default(),
        }
    }

    /// Address to bind the HTTP listener to
    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        use anyhow::Context;

        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid bind address {}:{}", self.host, self.port))
    }
}

/// "/api/" and "api" both become "/api"; blank becomes empty
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}
