//! Per-product field extraction.

use dealscout_core::{ProductIdentifier, ProductRecord};

use crate::driver::{PageDriver, WaitPolicy};
use crate::error::ScraperError;
use crate::identifier::build_url;
use crate::locator::{Locator, SiteSelectors};
use crate::price::parse_price;

/// Substring of the availability text that enables the other-sellers price.
pub const AVAILABLE_MARKER: &str = "Available";

/// Visits product pages and reads title, seller and price.
///
/// A record is only produced when all three fields resolve. Each field is
/// read independently; a failure on one is logged and does not stop the
/// others from being attempted.
pub struct ProductInspector<'a> {
    selectors: &'a SiteSelectors,
    wait: WaitPolicy,
    base_url: &'a str,
    currency: &'a str,
    locale: &'a str,
}

impl<'a> ProductInspector<'a> {
    #[must_use]
    pub fn new(
        selectors: &'a SiteSelectors,
        wait: WaitPolicy,
        base_url: &'a str,
        currency: &'a str,
        locale: &'a str,
    ) -> Self {
        Self {
            selectors,
            wait,
            base_url,
            currency,
            locale,
        }
    }

    /// Detail-page URL actually visited: the canonical URL plus the locale.
    #[must_use]
    pub fn page_url(&self, id: &ProductIdentifier) -> String {
        format!("{}?language={}", build_url(self.base_url, id), self.locale)
    }

    /// Returns a complete record for `id`, or `None` if navigation failed or
    /// any of title, seller or price could not be read.
    pub async fn inspect<D>(&self, driver: &mut D, id: &ProductIdentifier) -> Option<ProductRecord>
    where
        D: PageDriver + ?Sized,
    {
        let url = self.page_url(id);
        if let Err(e) = driver.navigate(&url).await {
            tracing::warn!(asin = %id, url = %url, error = %e, "failed to load product page");
            return None;
        }
        if let Err(e) = driver.wait_for(&self.selectors.title, self.wait).await {
            tracing::debug!(asin = %id, error = %e, "title not rendered within wait");
        }

        let title = field(id, "title", self.read_text(driver, &self.selectors.title).await);
        let seller = field(id, "seller", self.read_text(driver, &self.selectors.byline).await);
        let price = field(id, "price", self.read_price(driver).await);

        match (title, seller, price) {
            (Some(title), Some(seller), Some(price)) => {
                tracing::debug!(asin = %id, price, "product inspected");
                Some(ProductRecord {
                    identifier: id.clone(),
                    url: build_url(self.base_url, id),
                    title,
                    seller,
                    price,
                })
            }
            _ => {
                tracing::warn!(asin = %id, url = driver.current_url(), "incomplete product; skipped");
                None
            }
        }
    }

    async fn read_text<D>(&self, driver: &D, locator: &Locator) -> Result<String, ScraperError>
    where
        D: PageDriver + ?Sized,
    {
        let text = driver.find_first(locator).await?.text().trim().to_owned();
        if text.is_empty() {
            return Err(ScraperError::ElementNotFound {
                locator: format!("non-empty {locator}"),
                url: driver.current_url().to_owned(),
            });
        }
        Ok(text)
    }

    /// Primary price element, or the other-sellers price when the primary is
    /// absent and the product is marked available.
    async fn read_price<D>(&self, driver: &D) -> Result<f64, ScraperError>
    where
        D: PageDriver + ?Sized,
    {
        let sel = self.selectors;
        let not_found = match driver.find_first(&sel.price).await {
            Ok(el) => return parse_price(el.text(), self.currency),
            Err(e @ ScraperError::ElementNotFound { .. }) => e,
            Err(e) => return Err(e),
        };

        let availability = driver.find_first(&sel.availability).await?;
        if !availability.text().contains(AVAILABLE_MARKER) {
            return Err(not_found);
        }

        let offer = driver.find_first(&sel.other_sellers_price).await?;
        let text = offer.text();
        let from_symbol = text.find(self.currency).map_or(text, |start| &text[start..]);
        parse_price(from_symbol, self.currency)
    }
}

fn field<T>(id: &ProductIdentifier, name: &str, result: Result<T, ScraperError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(asin = %id, field = name, error = %e, "field unavailable");
            None
        }
    }
}

#[cfg(test)]
#[path = "inspector_test.rs"]
mod tests;
