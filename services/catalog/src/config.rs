use catcollector_session::cookie::SESSION_TTL_SECS;

/// Catalog service configuration loaded from environment variables.
#[derive(Debug)]
pub struct CatalogConfig {
    /// Database connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 8000). Env var: `CATALOG_PORT`.
    pub catalog_port: u16,
    /// Mark the session cookie `Secure`. Env var: `COOKIE_SECURE` (`true` or `1`).
    pub cookie_secure: bool,
    /// Session lifetime in seconds (default two weeks). Env var: `SESSION_TTL_SECS`.
    pub session_ttl_secs: u64,
}

impl CatalogConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            catalog_port: std::env::var("CATALOG_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),
            cookie_secure: std::env::var("COOKIE_SECURE")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            session_ttl_secs: std::env::var("SESSION_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(SESSION_TTL_SECS),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "true" | "1")
}
