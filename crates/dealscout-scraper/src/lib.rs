pub mod collector;
pub mod driver;
pub mod error;
pub mod http;
pub mod identifier;
pub mod inspector;
pub mod locator;
pub mod orchestrator;
pub mod price;

pub use collector::{price_filter_param, with_price_filter, ListingCollector};
pub use driver::{Key, PageDriver, PageElement, WaitPolicy};
pub use error::ScraperError;
pub use http::HttpPageDriver;
pub use identifier::{build_url, extract_id};
pub use inspector::ProductInspector;
pub use locator::{Locator, SiteSelectors};
pub use orchestrator::{PipelineSettings, ScrapeOrchestrator};
pub use price::parse_price;
