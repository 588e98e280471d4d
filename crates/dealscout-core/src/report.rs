//! Report assembly: lowest-price selection plus run metadata.

use chrono::{DateTime, Local};
use serde::{Serialize, Serializer};

use crate::products::ProductRecord;
use crate::search::SearchFilters;

/// `strftime` layout of the persisted `date` field.
pub const REPORT_DATE_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Final output of a run.
///
/// `products` keeps listing discovery order; `best_item` is a copy of the
/// cheapest entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub title: String,
    #[serde(rename = "date", serialize_with = "serialize_report_date")]
    pub generated_at: DateTime<Local>,
    pub best_item: Option<ProductRecord>,
    pub currency: String,
    pub filters: SearchFilters,
    pub base_link: String,
    pub products: Vec<ProductRecord>,
}

fn serialize_report_date<S>(value: &DateTime<Local>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&value.format(REPORT_DATE_FORMAT))
}

/// Returns the record with the lowest price.
///
/// Ties go to the earliest record. `None` only for an empty slice.
#[must_use]
pub fn best_item(products: &[ProductRecord]) -> Option<&ProductRecord> {
    products
        .iter()
        .min_by(|a, b| a.price.total_cmp(&b.price))
}

/// Assembles a [`Report`], stamping it with the current local time.
#[must_use]
pub fn build_report(
    run_title: &str,
    filters: SearchFilters,
    base_link: &str,
    currency: &str,
    products: Vec<ProductRecord>,
) -> Report {
    build_report_at(run_title, filters, base_link, currency, products, Local::now())
}

/// Same as [`build_report`] with an explicit timestamp.
#[must_use]
pub fn build_report_at(
    run_title: &str,
    filters: SearchFilters,
    base_link: &str,
    currency: &str,
    products: Vec<ProductRecord>,
    generated_at: DateTime<Local>,
) -> Report {
    let best = best_item(&products).cloned();
    match &best {
        Some(item) => tracing::info!(
            asin = %item.identifier,
            price = item.price,
            product_count = products.len(),
            "selected best item"
        ),
        None => tracing::info!("no products in report; best item left empty"),
    }

    Report {
        title: run_title.to_owned(),
        generated_at,
        best_item: best,
        currency: currency.to_owned(),
        filters,
        base_link: base_link.to_owned(),
        products,
    }
}
