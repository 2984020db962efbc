use std::str::FromStr;

use chrono::FixedOffset;

/// Paths gated by the session check unless `PROTECTED_PATH_PREFIXES` is set.
pub const DEFAULT_PROTECTED_PREFIXES: &[&str] = &[
    "/dashboard",
    "/equipment",
    "/maintenance",
    "/reports",
    "/documents",
    "/api/v1",
];

pub const DEFAULT_SESSION_COOKIE: &str = "session_token";

/// What the session gate does when a request on a protected path cannot be
/// authenticated (no cookie, unknown or expired session, lookup failure).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPolicy {
    /// Reject with 401.
    #[default]
    FailClosed,
    /// Let the request through without a session.
    FailOpen,
}

impl FromStr for SessionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail-closed" | "closed" => Ok(Self::FailClosed),
            "fail-open" | "open" => Ok(Self::FailOpen),
            other => Err(format!(
                "unknown session policy '{other}' (expected fail-closed or fail-open)"
            )),
        }
    }
}

/// Session gate settings.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub policy: SessionPolicy,
    pub protected_prefixes: Vec<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: DEFAULT_SESSION_COOKIE.to_string(),
            policy: SessionPolicy::default(),
            protected_prefixes: DEFAULT_PROTECTED_PREFIXES
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

impl SessionConfig {
    /// Whether `path` is one of the protected prefixes or below one.
    /// `/api/v1x` does not match `/api/v1`.
    pub fn is_protected(&self, path: &str) -> bool {
        self.protected_prefixes.iter().any(|prefix| {
            path.strip_prefix(prefix.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
        })
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Grace period for in-flight requests after a shutdown signal (default: `30`).
    pub shutdown_timeout_secs: u64,
    pub session: SessionConfig,
    /// Time zone of the business date used in project numbers (default: UTC+9).
    pub project_number_offset: FixedOffset,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                           | Default                    |
    /// |-----------------------------------|----------------------------|
    /// | `HOST`                            | `0.0.0.0`                  |
    /// | `PORT`                            | `3000`                     |
    /// | `CORS_ORIGINS`                    | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`            | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`           | `30`                       |
    /// | `SESSION_COOKIE_NAME`             | `session_token`            |
    /// | `SESSION_POLICY`                  | `fail-closed`              |
    /// | `PROTECTED_PATH_PREFIXES`         | see [`DEFAULT_PROTECTED_PREFIXES`] |
    /// | `PROJECT_NUMBER_UTC_OFFSET_HOURS` | `9`                        |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = split_list(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let mut session = SessionConfig::default();
        if let Ok(name) = std::env::var("SESSION_COOKIE_NAME") {
            session.cookie_name = name;
        }
        if let Ok(policy) = std::env::var("SESSION_POLICY") {
            session.policy = policy
                .parse()
                .unwrap_or_else(|e| panic!("SESSION_POLICY is invalid: {e}"));
        }
        if let Ok(prefixes) = std::env::var("PROTECTED_PATH_PREFIXES") {
            session.protected_prefixes = split_list(&prefixes);
        }

        let offset_hours: i32 = std::env::var("PROJECT_NUMBER_UTC_OFFSET_HOURS")
            .unwrap_or_else(|_| "9".into())
            .parse()
            .expect("PROJECT_NUMBER_UTC_OFFSET_HOURS must be a valid i32");
        let project_number_offset = utc_offset_hours(offset_hours)
            .expect("PROJECT_NUMBER_UTC_OFFSET_HOURS must be between -23 and 23");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            session,
            project_number_offset,
        }
    }
}

/// Split a comma-separated env value, dropping blanks.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// A fixed offset of `hours` east of UTC; `None` outside ±23h.
pub fn utc_offset_hours(hours: i32) -> Option<FixedOffset> {
    FixedOffset::east_opt(hours.checked_mul(3600)?)
}
