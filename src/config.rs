//! Endpoint configuration
//!
//! The analysis backend exposes two endpoints: a read-only results feed and
//! an on-demand analyze endpoint. Both are resolved exactly once at startup
//! with precedence CLI flag > environment variable > documented default.

/// Default results feed (read-only GET).
pub const DEFAULT_FETCH_URL: &str = "http://localhost:8888/analyze";

/// Default on-demand analyze endpoint (POST).
pub const DEFAULT_ANALYZE_URL: &str = "http://localhost:8000/analyze";

pub const FETCH_URL_ENV: &str = "EDAVIEW_FETCH_URL";
pub const ANALYZE_URL_ENV: &str = "EDAVIEW_ANALYZE_URL";

/// Resolved backend endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub fetch_url: String,
    pub analyze_url: String,
}

impl Endpoints {
    /// Resolve from CLI overrides and the process environment.
    pub fn resolve(cli_fetch: Option<&str>, cli_analyze: Option<&str>) -> Self {
        Self::resolve_from(cli_fetch, cli_analyze, |key| std::env::var(key).ok())
    }

    /// Resolution with an injected environment lookup, so precedence is
    /// testable without touching process-global state.
    fn resolve_from(
        cli_fetch: Option<&str>,
        cli_analyze: Option<&str>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let fetch_url = cli_fetch
            .map(str::to_string)
            .or_else(|| env(FETCH_URL_ENV))
            .unwrap_or_else(|| DEFAULT_FETCH_URL.to_string());
        let analyze_url = cli_analyze
            .map(str::to_string)
            .or_else(|| env(ANALYZE_URL_ENV))
            .unwrap_or_else(|| DEFAULT_ANALYZE_URL.to_string());
        Self {
            fetch_url,
            analyze_url,
        }
    }
}
