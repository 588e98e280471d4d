//! The page-driver capability consumed by the pipeline.
//!
//! A driver holds one page at a time. Elements are returned as snapshots
//! ([`PageElement`]), so nothing borrowed from a page outlives a navigation.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::ScraperError;
use crate::locator::Locator;

/// Keys that can be sent to an input element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
}

/// Bounded wait applied after navigations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl WaitPolicy {
    #[must_use]
    pub fn from_millis(timeout_ms: u64, poll_interval_ms: u64) -> Self {
        Self {
            timeout: Duration::from_millis(timeout_ms),
            poll_interval: Duration::from_millis(poll_interval_ms),
        }
    }
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self::from_millis(2000, 250)
    }
}

/// Snapshot of an element's rendered text and attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageElement {
    text: String,
    attributes: BTreeMap<String, String>,
}

impl PageElement {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attributes: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// Browser-like access to one page at a time.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Loads `url`, replacing the current page.
    async fn navigate(&mut self, url: &str) -> Result<(), ScraperError>;

    /// URL of the current page after any redirects.
    fn current_url(&self) -> &str;

    /// All elements matching `locator`, in document order. Empty means absent.
    async fn find(&self, locator: &Locator) -> Result<Vec<PageElement>, ScraperError>;

    /// Types `text` into the element matching `locator`.
    async fn send_text(&mut self, locator: &Locator, text: &str) -> Result<(), ScraperError>;

    /// Sends `key` to the element matching `locator`.
    async fn send_key(&mut self, locator: &Locator, key: Key) -> Result<(), ScraperError>;

    /// Releases the session. Later calls fail with [`ScraperError::SessionClosed`].
    async fn close(&mut self) -> Result<(), ScraperError>;

    /// First element matching `locator`.
    ///
    /// # Errors
    ///
    /// [`ScraperError::ElementNotFound`] when nothing matches.
    async fn find_first(&self, locator: &Locator) -> Result<PageElement, ScraperError> {
        self.find(locator)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ScraperError::ElementNotFound {
                locator: locator.to_string(),
                url: self.current_url().to_owned(),
            })
    }

    /// Polls for `locator` until it is present or `policy.timeout` elapses.
    ///
    /// # Errors
    ///
    /// [`ScraperError::Timeout`] if the element never appears.
    async fn wait_for(&self, locator: &Locator, policy: WaitPolicy) -> Result<(), ScraperError> {
        let deadline = tokio::time::Instant::now() + policy.timeout;
        loop {
            if !self.find(locator).await?.is_empty() {
                return Ok(());
            }
            let now = tokio::time::Instant::now();
            if now >= deadline {
                return Err(ScraperError::Timeout {
                    locator: locator.to_string(),
                    waited_ms: u64::try_from(policy.timeout.as_millis()).unwrap_or(u64::MAX),
                });
            }
            tokio::time::sleep(policy.poll_interval.min(deadline - now)).await;
        }
    }
}

/// Lets a caller keep ownership of a driver it hands to the orchestrator.
#[async_trait]
impl<T: PageDriver + ?Sized> PageDriver for &mut T {
    async fn navigate(&mut self, url: &str) -> Result<(), ScraperError> {
        (**self).navigate(url).await
    }

    fn current_url(&self) -> &str {
        (**self).current_url()
    }

    async fn find(&self, locator: &Locator) -> Result<Vec<PageElement>, ScraperError> {
        (**self).find(locator).await
    }

    async fn send_text(&mut self, locator: &Locator, text: &str) -> Result<(), ScraperError> {
        (**self).send_text(locator, text).await
    }

    async fn send_key(&mut self, locator: &Locator, key: Key) -> Result<(), ScraperError> {
        (**self).send_key(locator, key).await
    }

    async fn close(&mut self) -> Result<(), ScraperError> {
        (**self).close().await
    }

    async fn wait_for(&self, locator: &Locator, policy: WaitPolicy) -> Result<(), ScraperError> {
        (**self).wait_for(locator, policy).await
    }
}
