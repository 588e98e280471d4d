//! Page driver backed by plain HTTP requests and static HTML parsing.

mod document;

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use dealscout_core::AppConfig;
use reqwest::Client;

use crate::driver::{Key, PageDriver, PageElement, WaitPolicy};
use crate::error::ScraperError;
use crate::locator::Locator;

/// [`PageDriver`] that fetches each page with a GET request and evaluates
/// locators against the returned HTML.
///
/// Typing into a field is buffered; pressing Enter submits the field's
/// enclosing form as a GET request, the way a browser would for a search box.
/// Fetched documents never change, so [`PageDriver::wait_for`] checks once
/// instead of polling.
pub struct HttpPageDriver {
    client: Client,
    current_url: String,
    document: String,
    typed: HashMap<Locator, String>,
    closed: bool,
}

impl HttpPageDriver {
    /// Creates a driver session with the given request timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .cookie_store(true)
            .build()?;
        Ok(Self {
            client,
            current_url: String::new(),
            document: String::new(),
            typed: HashMap::new(),
            closed: false,
        })
    }

    /// # Errors
    ///
    /// See [`HttpPageDriver::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        Self::new(config.request_timeout_secs, &config.user_agent)
    }

    fn ensure_open(&self) -> Result<(), ScraperError> {
        if self.closed {
            Err(ScraperError::SessionClosed)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PageDriver for HttpPageDriver {
    async fn navigate(&mut self, url: &str) -> Result<(), ScraperError> {
        self.ensure_open()?;

        let response = self
            .client
            .get(url)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-GB,en;q=0.9")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let final_url = response.url().to_string();
        let body = response.text().await?;
        tracing::debug!(url = %final_url, bytes = body.len(), "page loaded");

        self.current_url = final_url;
        self.document = body;
        self.typed.clear();
        Ok(())
    }

    fn current_url(&self) -> &str {
        &self.current_url
    }

    async fn find(&self, locator: &Locator) -> Result<Vec<PageElement>, ScraperError> {
        self.ensure_open()?;
        document::select(&self.document, &self.current_url, locator)
    }

    async fn send_text(&mut self, locator: &Locator, text: &str) -> Result<(), ScraperError> {
        self.find_first(locator).await?;
        self.typed.entry(locator.clone()).or_default().push_str(text);
        Ok(())
    }

    async fn send_key(&mut self, locator: &Locator, key: Key) -> Result<(), ScraperError> {
        self.ensure_open()?;
        match key {
            Key::Enter => {
                let text = self.typed.remove(locator).unwrap_or_default();
                let target = document::form_submission_url(
                    &self.document,
                    &self.current_url,
                    locator,
                    &text,
                )?;
                tracing::debug!(url = %target, "submitting form");
                self.navigate(&target).await
            }
        }
    }

    async fn wait_for(&self, locator: &Locator, _policy: WaitPolicy) -> Result<(), ScraperError> {
        if self.find(locator).await?.is_empty() {
            return Err(ScraperError::Timeout {
                locator: locator.to_string(),
                waited_ms: 0,
            });
        }
        Ok(())
    }

    async fn close(&mut self) -> Result<(), ScraperError> {
        if !self.closed {
            self.closed = true;
            self.document.clear();
            self.typed.clear();
            tracing::debug!("page driver session closed");
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../http_test.rs"]
mod tests;
