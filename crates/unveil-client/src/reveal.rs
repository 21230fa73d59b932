//! Progressive image reveal
//!
//! The reveal is pure presentation: a fraction derived from the countdown
//! plus one obscuring image fetched per session. A failed fetch degrades to
//! "no image" and never disturbs the countdown.

use async_trait::async_trait;

use crate::error::ClientError;

/// Requested square size for the obscuring image.
const IMAGE_SIZE: u32 = 400;

/// Fraction of the image revealed, in `[0, 1]`.
///
/// Zero at session start, one at expiry, zero when no session ran
/// (`total == 0` never divides).
pub fn revealed_fraction(remaining: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let fraction = (f64::from(total) - f64::from(remaining)) / f64::from(total);
    fraction.clamp(0.0, 1.0)
}

/// Source of random obscuring images.
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Fetch one random image and return its URL.
    async fn fetch_image_url(&self) -> Result<String, ClientError>;
}

/// [Lorem Picsum](https://picsum.photos) image source.
///
/// The service answers `GET /{size}` with a redirect to a concrete random
/// image; the followed URL is what we keep, so the same image can be shown
/// for the whole session.
#[derive(Debug, Clone)]
pub struct PicsumImageSource {
    http: reqwest::Client,
    base_url: String,
}

impl PicsumImageSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }
}

#[async_trait]
impl ImageSource for PicsumImageSource {
    async fn fetch_image_url(&self) -> Result<String, ClientError> {
        let url = format!("{}/{IMAGE_SIZE}", self.base_url);
        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::Unavailable(format!(
                "image service answered {}",
                response.status()
            )));
        }
        Ok(response.url().to_string())
    }
}

/// Holds the obscuring image for the current session.
#[derive(Debug)]
pub struct RevealCoordinator<I> {
    source: I,
    image_url: Option<String>,
}

impl<I: ImageSource> RevealCoordinator<I> {
    pub fn new(source: I) -> Self {
        Self {
            source,
            image_url: None,
        }
    }

    /// Fetch a fresh image, replacing the current one.
    ///
    /// Failures are logged and leave no image; the countdown does not care.
    pub async fn refresh(&mut self) {
        match self.source.fetch_image_url().await {
            Ok(url) => self.image_url = Some(url),
            Err(e) => {
                tracing::warn!("image fetch failed: {}", e);
                self.image_url = None;
            }
        }
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn fraction_spans_zero_to_one() {
        assert_eq!(revealed_fraction(10, 10), 0.0);
        assert_eq!(revealed_fraction(5, 10), 0.5);
        assert_eq!(revealed_fraction(0, 10), 1.0);
    }

    #[test]
    fn zero_total_never_divides() {
        assert_eq!(revealed_fraction(5, 0), 0.0);
        assert_eq!(revealed_fraction(0, 0), 0.0);
    }

    #[test]
    fn out_of_range_inputs_clamp() {
        // remaining beyond total claims nothing revealed.
        assert_eq!(revealed_fraction(15, 10), 0.0);
        assert_eq!(revealed_fraction(u32::MAX, 1), 0.0);
    }

    struct CountingSource {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    #[async_trait]
    impl ImageSource for CountingSource {
        async fn fetch_image_url(&self) -> Result<String, ClientError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.fail {
                Err(ClientError::Unavailable("down".to_string()))
            } else {
                Ok(format!("https://images.example/{n}"))
            }
        }
    }

    #[tokio::test]
    async fn refresh_replaces_the_image() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut reveal = RevealCoordinator::new(CountingSource {
            calls: Arc::clone(&calls),
            fail: false,
        });
        assert_eq!(reveal.image_url(), None);

        reveal.refresh().await;
        assert_eq!(reveal.image_url(), Some("https://images.example/1"));

        reveal.refresh().await;
        assert_eq!(reveal.image_url(), Some("https://images.example/2"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failed_refresh_leaves_no_image() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut reveal = RevealCoordinator::new(CountingSource {
            calls,
            fail: true,
        });

        reveal.refresh().await;
        assert_eq!(reveal.image_url(), None);
    }
}
