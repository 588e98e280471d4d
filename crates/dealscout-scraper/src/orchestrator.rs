//! End-to-end sequencing of one scrape run.

use dealscout_core::{AppConfig, ProductIdentifier, ProductRecord, SearchRequest};

use crate::collector::ListingCollector;
use crate::driver::{PageDriver, WaitPolicy};
use crate::identifier::extract_id;
use crate::inspector::ProductInspector;
use crate::locator::SiteSelectors;

/// Site-level settings shared by every run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSettings {
    pub selectors: SiteSelectors,
    pub wait: WaitPolicy,
    /// Appended to product URLs as `?language=`.
    pub locale: String,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            selectors: SiteSelectors::default(),
            wait: WaitPolicy::default(),
            locale: "en_GB".to_owned(),
        }
    }
}

impl PipelineSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            selectors: SiteSelectors::default(),
            wait: WaitPolicy::from_millis(config.element_wait_ms, config.poll_interval_ms),
            locale: config.locale.clone(),
        }
    }
}

/// Owns the driver session for a single run and releases it on every exit
/// path. Results keep listing discovery order.
pub struct ScrapeOrchestrator<D: PageDriver> {
    driver: D,
    request: SearchRequest,
    settings: PipelineSettings,
}

impl<D: PageDriver> ScrapeOrchestrator<D> {
    #[must_use]
    pub fn new(driver: D, request: SearchRequest, settings: PipelineSettings) -> Self {
        Self {
            driver,
            request,
            settings,
        }
    }

    /// Collects listings, inspects the product behind every well-formed link
    /// and closes the driver. Never fails; an empty result is a valid outcome.
    pub async fn run(mut self) -> Vec<ProductRecord> {
        let products = self.scrape().await;
        self.finish().await;
        products
    }

    async fn scrape(&mut self) -> Vec<ProductRecord> {
        let req = &self.request;
        tracing::debug!(search_term = %req.search_term, "collecting listing links");

        let links = ListingCollector::new(&self.settings.selectors, self.settings.wait)
            .collect(
                &mut self.driver,
                &req.base_url,
                &req.search_term,
                req.filters,
            )
            .await;
        if links.is_empty() {
            tracing::info!(search_term = %req.search_term, "no listings found");
            return Vec::new();
        }

        let ids = link_ids(&links);
        tracing::info!(
            links = links.len(),
            products = ids.len(),
            "inspecting products"
        );

        let inspector = inspector(&self.settings, req);
        let mut products = Vec::with_capacity(ids.len());
        for id in &ids {
            if let Some(record) = inspector.inspect(&mut self.driver, id).await {
                products.push(record);
            }
        }

        tracing::info!(
            inspected = ids.len(),
            complete = products.len(),
            "scrape finished"
        );
        products
    }

    async fn finish(&mut self) {
        if let Err(e) = self.driver.close().await {
            tracing::warn!(error = %e, "failed to close page driver");
        }
    }
}

fn inspector<'a>(settings: &'a PipelineSettings, request: &'a SearchRequest) -> ProductInspector<'a> {
    ProductInspector::new(
        &settings.selectors,
        settings.wait,
        &request.base_url,
        &request.currency,
        &settings.locale,
    )
}

/// One identifier per well-formed link, in listing order. Malformed links
/// are logged and skipped. A product listed twice appears twice.
fn link_ids(links: &[String]) -> Vec<ProductIdentifier> {
    links
        .iter()
        .filter_map(|link| match extract_id(link) {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::warn!(url = %link, error = %e, "skipping malformed listing link");
                None
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "orchestrator_test.rs"]
mod tests;
