//! Client configuration

use std::time::Duration;

/// Default base for the random obscuring image.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://picsum.photos";

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Timer API base URL, without a trailing slash
    pub base_url: String,
    /// Random-image service base URL
    pub image_base_url: String,
    /// Per-request timeout
    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }

    /// Override the image service base URL
    pub fn with_image_base_url(mut self, url: impl Into<String>) -> Self {
        self.image_base_url = url.into();
        self
    }

    /// Override the request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
