use thiserror::Error;

/// Errors surfaced by the REST client and threaded through the stores.
///
/// Cloneable so a pager can keep the last failure around for a retry prompt
/// while also returning it to the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Transport-level failure (connect, timeout, TLS).
    #[error("request failed: {0}")]
    Network(String),

    /// The bearer token is missing, expired, or rejected. Callers route to
    /// the login view on this.
    #[error("unauthorized")]
    Unauthorized,

    /// The server answered with a non-success envelope.
    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The body did not match the expected payload shape.
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Pagination and list fetches treat every failure as retryable: loaded
    /// pages stay visible and the trigger can simply be re-fired. Only an
    /// auth failure is not, since retrying without a new token cannot help.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, ApiError::Unauthorized)
    }
}
