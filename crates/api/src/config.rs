//! Application configuration loaded from environment variables.

use std::time::Duration;

use domain::CategoryPolicy;
use session_store::StoreOptions;

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `3000`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
/// - `LOG_FORMAT` — `pretty` or `json` (default: `pretty`)
/// - `SESSION_TTL_SECS` — idle lifetime of a session (default: `1440`)
/// - `SESSION_PURGE_SECS` — interval between expired-session sweeps (default: `60`)
/// - `MAX_SESSIONS` — ceiling on live sessions (default: `10000`)
/// - `STRICT_CATEGORIES` — only accept listed categories (default: `false`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_format: LogFormat,
    pub session_ttl: Duration,
    pub session_purge_interval: Duration,
    pub max_sessions: usize,
    pub strict_categories: bool,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// Unparseable values fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let secs = |key: &str, default: Duration| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(default)
        };

        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(defaults.port),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            log_format: match lookup("LOG_FORMAT").as_deref().map(str::trim) {
                Some(f) if f.eq_ignore_ascii_case("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            session_ttl: secs("SESSION_TTL_SECS", defaults.session_ttl),
            session_purge_interval: secs("SESSION_PURGE_SECS", defaults.session_purge_interval),
            max_sessions: lookup("MAX_SESSIONS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.max_sessions),
            strict_categories: lookup("STRICT_CATEGORIES")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.strict_categories),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn store_options(&self) -> StoreOptions {
        StoreOptions::new()
            .with_ttl(self.session_ttl)
            .with_max_sessions(self.max_sessions)
    }

    pub fn category_policy(&self) -> CategoryPolicy {
        if self.strict_categories {
            CategoryPolicy::Strict
        } else {
            CategoryPolicy::Lenient
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let store = StoreOptions::default();
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            session_ttl: store.ttl,
            session_purge_interval: Duration::from_secs(60),
            max_sessions: store.max_sessions,
            strict_categories: false,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
