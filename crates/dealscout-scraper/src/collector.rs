//! Search submission and listing link discovery.

use dealscout_core::SearchFilters;

use crate::driver::{Key, PageDriver, WaitPolicy};
use crate::error::ScraperError;
use crate::locator::SiteSelectors;

/// Query parameter restricting results to a price band. Bounds are sent in
/// minor units, hence the two appended zeros.
#[must_use]
pub fn price_filter_param(filters: SearchFilters) -> String {
    format!("rh=p_36%3A{}00-{}00", filters.min, filters.max)
}

/// `url` with the price filter appended to its query string.
#[must_use]
pub fn with_price_filter(url: &str, filters: SearchFilters) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{}", price_filter_param(filters))
}

/// Runs a search and returns the listing links on the first results page.
pub struct ListingCollector<'a> {
    selectors: &'a SiteSelectors,
    wait: WaitPolicy,
}

impl<'a> ListingCollector<'a> {
    #[must_use]
    pub fn new(selectors: &'a SiteSelectors, wait: WaitPolicy) -> Self {
        Self { selectors, wait }
    }

    /// Submits `search_term` from `base_url`, applies `filters` and returns
    /// every listing link in markup order. Duplicates are kept.
    ///
    /// Never fails: a missing results container means no results, and any
    /// other error is logged and also yields an empty list.
    pub async fn collect<D>(
        &self,
        driver: &mut D,
        base_url: &str,
        search_term: &str,
        filters: SearchFilters,
    ) -> Vec<String>
    where
        D: PageDriver + ?Sized,
    {
        match self.try_collect(driver, base_url, search_term, filters).await {
            Ok(links) => links,
            Err(e) => {
                tracing::warn!(
                    search_term,
                    url = driver.current_url(),
                    error = %e,
                    "listing collection failed; treating as no results"
                );
                Vec::new()
            }
        }
    }

    async fn try_collect<D>(
        &self,
        driver: &mut D,
        base_url: &str,
        search_term: &str,
        filters: SearchFilters,
    ) -> Result<Vec<String>, ScraperError>
    where
        D: PageDriver + ?Sized,
    {
        let sel = self.selectors;

        driver.navigate(base_url).await?;
        driver.wait_for(&sel.search_box, self.wait).await?;
        driver.send_text(&sel.search_box, search_term).await?;
        driver.send_key(&sel.search_box, Key::Enter).await?;

        let filtered = with_price_filter(driver.current_url(), filters);
        tracing::info!(url = %filtered, "loading filtered results");
        driver.navigate(&filtered).await?;

        match driver.wait_for(&sel.results_list, self.wait).await {
            Ok(()) => {}
            Err(ScraperError::Timeout { .. }) => {
                tracing::info!(search_term, "no results container on page");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        }

        let anchors = driver.find(&sel.result_anchor).await?;
        let links: Vec<String> = anchors
            .iter()
            .filter_map(|anchor| anchor.attribute("href"))
            .map(str::to_owned)
            .collect();

        if links.len() < anchors.len() {
            tracing::debug!(
                skipped = anchors.len() - links.len(),
                "listing anchors without href"
            );
        }
        Ok(links)
    }
}
