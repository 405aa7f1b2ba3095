//! Connection settings for [`super::GoogleMapsClient`].

use std::time::Duration;

/// Default root for the Google Maps web services.
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

/// Default user agent for Google Maps requests.
pub const DEFAULT_USER_AGENT: &str = "brewscout/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const DEFAULT_LANGUAGE: &str = "en";
const DEFAULT_PHOTO_MAX_WIDTH: u32 = 400;
const DEFAULT_PHOTO_MAX_HEIGHT: u32 = 300;

/// Configuration for [`super::GoogleMapsClient`].
#[derive(Clone)]
pub struct GoogleMapsConfig {
    /// Root URL of the web services, without a trailing `/`.
    pub base_url: String,
    /// API key sent with every request.
    pub api_key: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
    /// Result language code.
    pub language: String,
    /// Maximum photo width in pixels.
    pub photo_max_width: u32,
    /// Maximum photo height in pixels.
    pub photo_max_height: u32,
}

impl std::fmt::Debug for GoogleMapsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleMapsConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("language", &self.language)
            .field("photo_max_width", &self.photo_max_width)
            .field("photo_max_height", &self.photo_max_height)
            .finish()
    }
}

impl Default for GoogleMapsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: String::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            language: DEFAULT_LANGUAGE.to_owned(),
            photo_max_width: DEFAULT_PHOTO_MAX_WIDTH,
            photo_max_height: DEFAULT_PHOTO_MAX_HEIGHT,
        }
    }
}

impl GoogleMapsConfig {
    /// Create a configuration for the public endpoint with `api_key`.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Point the client at another root URL, e.g. a local mock.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the result language.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the maximum photo dimensions.
    #[must_use]
    pub fn with_photo_size(mut self, max_width: u32, max_height: u32) -> Self {
        self.photo_max_width = max_width;
        self.photo_max_height = max_height;
        self
    }

    /// Join `path` onto the base URL.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_target_public_endpoint() {
        let config = GoogleMapsConfig::new("k");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!((config.photo_max_width, config.photo_max_height), (400, 300));
    }

    #[rstest]
    fn endpoint_strips_trailing_slash() {
        let config = GoogleMapsConfig::new("k").with_base_url("http://localhost:8080/");
        assert_eq!(
            config.endpoint("geocode/json"),
            "http://localhost:8080/geocode/json"
        );
    }

    #[rstest]
    fn debug_output_hides_api_key() {
        let config = GoogleMapsConfig::new("super-secret");
        assert!(!format!("{config:?}").contains("super-secret"));
    }
}
