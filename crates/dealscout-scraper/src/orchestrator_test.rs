use dealscout_core::{build_report, SearchFilters};

use super::*;
use crate::driver::stub::StubDriver;
use crate::driver::PageElement;
use crate::locator::Locator;

const HOME: &str = "https://shop.test/";
const RESULTS: &str = "https://shop.test/s";

type Page = Vec<(Locator, Vec<PageElement>)>;

fn request() -> SearchRequest {
    let filters = SearchFilters::new(10, 50).unwrap();
    SearchRequest::new("desk lamp", filters, HOME, "£", "desk lamp").unwrap()
}

fn settings() -> PipelineSettings {
    PipelineSettings {
        wait: WaitPolicy::from_millis(0, 0),
        ..PipelineSettings::default()
    }
}

fn el(text: &str) -> PageElement {
    PageElement::new(text)
}

fn results_page(hrefs: &[&str]) -> Page {
    let sel = SiteSelectors::default();
    vec![
        (sel.results_list, vec![el("")]),
        (
            sel.result_anchor,
            hrefs
                .iter()
                .map(|href| el("listing").with_attribute("href", *href))
                .collect(),
        ),
    ]
}

fn product_page(title: Option<&str>, seller: &str, price: &str) -> Page {
    let sel = SiteSelectors::default();
    let mut page = vec![
        (sel.byline, vec![el(seller)]),
        (sel.price, vec![el(price)]),
    ];
    if let Some(title) = title {
        page.push((sel.title, vec![el(title)]));
    }
    page
}

fn site(results: Page) -> StubDriver {
    let sel = SiteSelectors::default();
    StubDriver::new()
        .with_search_url(RESULTS)
        .with_page(HOME, vec![(sel.search_box, vec![el("")])])
        .with_page(RESULTS, results)
}

#[tokio::test]
async fn desk_lamp_run_yields_two_complete_products() {
    let driver = site(results_page(&[
        "https://shop.test/Lamp-One/dp/B000LAMP01/ref=sr_1_1",
        "https://shop.test/Lamp-Two/dp/B000LAMP02/ref=sr_1_2",
        "https://shop.test/Lamp-Three/dp/B000LAMP03/ref=sr_1_3",
    ]))
    .with_page(
        "https://shop.test/dp/B000LAMP01",
        product_page(Some("Lamp One"), "Visit the Lumo Store", "£24\n99"),
    )
    .with_page(
        "https://shop.test/dp/B000LAMP02",
        product_page(None, "Visit the Brite Store", "£30\n00"),
    )
    .with_page(
        "https://shop.test/dp/B000LAMP03",
        product_page(Some("Lamp Three"), "Visit the Glow Store", "£19\n50"),
    );

    let products = ScrapeOrchestrator::new(driver, request(), settings())
        .run()
        .await;

    let ids: Vec<_> = products.iter().map(|p| p.identifier.as_str()).collect();
    assert_eq!(ids, ["B000LAMP01", "B000LAMP03"]);

    let filters = SearchFilters::new(10, 50).unwrap();
    let report = build_report("desk lamp", filters, HOME, "£", products);
    assert_eq!(report.products.len(), 2);
    assert_eq!(report.filters, SearchFilters { min: 10, max: 50 });
    let best = report.best_item.expect("best item present");
    assert!((best.price - 19.50).abs() < f64::EPSILON);
    assert_eq!(best.url, "https://shop.test/dp/B000LAMP03");
}

#[tokio::test]
async fn empty_listing_closes_driver_and_returns_nothing() {
    let mut driver = site(results_page(&[]));
    let products = ScrapeOrchestrator::new(&mut driver, request(), settings())
        .run()
        .await;
    assert!(products.is_empty());
    assert_eq!(driver.close_calls, 1);
}

#[tokio::test]
async fn failed_collection_still_closes_driver() {
    let mut driver = StubDriver::new();
    let products = ScrapeOrchestrator::new(&mut driver, request(), settings())
        .run()
        .await;
    assert!(products.is_empty());
    assert_eq!(driver.close_calls, 1);
}

#[tokio::test]
async fn completed_run_closes_driver_once() {
    let mut driver = site(results_page(&["https://shop.test/dp/B000LAMP01/ref=sr_1_1"])).with_page(
        "https://shop.test/dp/B000LAMP01",
        product_page(Some("Lamp One"), "Visit the Lumo Store", "£24\n99"),
    );
    let products = ScrapeOrchestrator::new(&mut driver, request(), settings())
        .run()
        .await;
    assert_eq!(products.len(), 1);
    assert_eq!(driver.close_calls, 1);
}

#[tokio::test]
async fn malformed_links_are_skipped_and_duplicates_kept() {
    let mut driver = site(results_page(&[
        "https://shop.test/sponsored/click?id=42",
        "https://shop.test/A/dp/B000LAMP01/ref=sr_1_1",
        "https://shop.test/A/dp/B000LAMP01/ref=sr_1_9",
    ]))
    .with_page(
        "https://shop.test/dp/B000LAMP01",
        product_page(Some("Lamp One"), "Visit the Lumo Store", "£24\n99"),
    );
    let products = ScrapeOrchestrator::new(&mut driver, request(), settings())
        .run()
        .await;

    assert_eq!(products.len(), 2, "one record per well-formed link");
    assert!(products
        .iter()
        .all(|p| p.identifier.as_str() == "B000LAMP01"));
    let product_visits = driver
        .visited
        .iter()
        .filter(|url| url.contains("/dp/"))
        .count();
    assert_eq!(product_visits, 2);
}

#[test]
fn link_ids_keeps_listing_order_and_repeats() {
    let links = [
        "https://x/dp/B2/ref=a".to_owned(),
        "https://x/dp/B1/ref=b".to_owned(),
        "https://x/no-id".to_owned(),
        "https://x/dp/B2/ref=c".to_owned(),
    ];
    let ids: Vec<_> = link_ids(&links)
        .iter()
        .map(|id| id.as_str().to_owned())
        .collect();
    assert_eq!(ids, ["B2", "B1", "B2"]);
}

#[test]
fn settings_follow_config() {
    let config = dealscout_core::AppConfig {
        locale: "de_DE".to_owned(),
        element_wait_ms: 500,
        poll_interval_ms: 50,
        ..test_config()
    };
    let settings = PipelineSettings::from_config(&config);
    assert_eq!(settings.locale, "de_DE");
    assert_eq!(settings.wait, WaitPolicy::from_millis(500, 50));
}

fn test_config() -> AppConfig {
    AppConfig {
        env: dealscout_core::Environment::Test,
        log_level: "info".to_owned(),
        base_url: HOME.to_owned(),
        currency: "£".to_owned(),
        locale: "en_GB".to_owned(),
        output_dir: "./reports".into(),
        user_agent: "test".to_owned(),
        request_timeout_secs: 5,
        element_wait_ms: 0,
        poll_interval_ms: 0,
    }
}
