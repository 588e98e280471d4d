//! Field locators and the selector table for the target site's markup.
//!
//! Every selector the pipeline depends on lives in [`SiteSelectors`]. When the
//! site changes its markup, this is the only table that needs updating.

/// How to find an element on a page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    /// Element `id` attribute.
    Id(String),
    /// A single CSS class name.
    Class(String),
    /// Structural CSS path, e.g. `"div.s-result-list h2 > a"`.
    Path(String),
}

impl Locator {
    #[must_use]
    pub fn id(id: &str) -> Self {
        Self::Id(id.to_owned())
    }

    #[must_use]
    pub fn class(class: &str) -> Self {
        Self::Class(class.to_owned())
    }

    #[must_use]
    pub fn path(path: &str) -> Self {
        Self::Path(path.to_owned())
    }

    /// CSS selector equivalent of this locator.
    #[must_use]
    pub fn to_css(&self) -> String {
        match self {
            Self::Id(id) => format!("#{id}"),
            Self::Class(class) => format!(".{class}"),
            Self::Path(path) => path.clone(),
        }
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id={id}"),
            Self::Class(class) => write!(f, "class={class}"),
            Self::Path(path) => write!(f, "path={path}"),
        }
    }
}

/// Selector table for search, listing and product detail pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteSelectors {
    pub search_box: Locator,
    pub results_list: Locator,
    pub result_anchor: Locator,
    pub title: Locator,
    pub byline: Locator,
    pub price: Locator,
    pub availability: Locator,
    /// "Other sellers" offer line, used when the primary price is absent.
    pub other_sellers_price: Locator,
}

impl Default for SiteSelectors {
    fn default() -> Self {
        Self {
            search_box: Locator::id("twotabsearchtextbox"),
            results_list: Locator::class("s-result-list"),
            result_anchor: Locator::path("div.s-result-list h2 > a"),
            title: Locator::id("productTitle"),
            byline: Locator::id("bylineInfo"),
            price: Locator::id("priceblock_ourprice"),
            availability: Locator::id("availability"),
            other_sellers_price: Locator::class("olp-padding-right"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_for_each_variant() {
        assert_eq!(Locator::id("productTitle").to_css(), "#productTitle");
        assert_eq!(Locator::class("s-result-list").to_css(), ".s-result-list");
        assert_eq!(Locator::path("h2 > a").to_css(), "h2 > a");
    }

    #[test]
    fn display_names_the_strategy() {
        assert_eq!(Locator::id("bylineInfo").to_string(), "id=bylineInfo");
        assert_eq!(Locator::class("olp").to_string(), "class=olp");
    }
}
