use thiserror::Error;

/// Errors from [`crate::Geocoder`] and [`crate::PlacesProvider`] calls.
///
/// Variants carry enough context to log the failing request. The engine never
/// surfaces these to callers directly; a failed call degrades to an empty
/// result for that query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The query text was empty after trimming.
    #[error("query must not be empty")]
    EmptyQuery,

    /// The request timed out.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// The URL that was requested.
        url: String,
        /// The configured timeout in seconds.
        timeout_secs: u64,
    },

    /// The provider answered with a non-success HTTP status.
    #[error("HTTP {status} from {url}: {message}")]
    HttpError {
        /// The URL that was requested.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },

    /// A transport-level failure such as DNS or connection refusal.
    #[error("network error requesting {url}: {message}")]
    NetworkError {
        /// The URL that was requested.
        url: String,
        /// Error description.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("failed to parse provider response: {message}")]
    ParseError {
        /// Error description.
        message: String,
    },

    /// The provider reported an application-level failure status.
    #[error("provider returned status {status}: {message}")]
    ServiceError {
        /// Provider status code, e.g. `REQUEST_DENIED`.
        status: String,
        /// Provider error message, possibly empty.
        message: String,
    },

    /// A request URL could not be built.
    #[error("invalid request URL: {message}")]
    InvalidUrl {
        /// Error description.
        message: String,
    },
}
