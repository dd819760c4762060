/// Client configuration, read from the environment in the binary.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the API server, without a trailing slash.
    pub base_url: String,
    /// Bearer token from a previous login, if any.
    pub token: Option<String>,
    /// Per-request timeout.
    pub timeout_secs: u64,
}

impl Config {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout_secs: 10,
        }
    }

    /// Read `FOCAL_API_URL`, `FOCAL_TOKEN` and `FOCAL_HTTP_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("FOCAL_API_URL").unwrap_or_else(|_| "http://localhost:4000".into());
        let token = std::env::var("FOCAL_TOKEN").ok().filter(|t| !t.is_empty());
        let timeout_secs = std::env::var("FOCAL_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        Self {
            base_url,
            token,
            timeout_secs,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}
