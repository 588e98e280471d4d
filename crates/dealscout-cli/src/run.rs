//! Command handlers for the CLI.
//!
//! Only setup failures are returned as errors: bad arguments, a driver
//! session that cannot be created, or a report that cannot be written.
//! Everything that goes wrong while scraping is logged and shows up as
//! fewer products in the report.

use std::path::{Path, PathBuf};

use dealscout_core::{
    build_report, AppConfig, JsonFileSink, ProductIdentifier, Report, ReportSink, SearchFilters,
    SearchRequest,
};
use dealscout_scraper::{
    parse_price, HttpPageDriver, PageDriver, PipelineSettings, ProductInspector, ScrapeOrchestrator,
};

/// Run the full pipeline for one search and persist (or print) the report.
///
/// # Errors
///
/// Returns an error if the filters or search term are invalid, the page
/// driver cannot be created, or the report cannot be written.
pub(crate) async fn run_scrape(
    config: &AppConfig,
    search_term: &str,
    min: u32,
    max: u32,
    output_name: Option<&str>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let filters = SearchFilters::new(min, max)?;
    let request = SearchRequest::new(
        search_term,
        filters,
        config.base_url.as_str(),
        config.currency.as_str(),
        output_name.unwrap_or(search_term),
    )?;

    let driver = HttpPageDriver::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to start page driver session: {e}"))?;

    tracing::info!(
        search_term,
        min,
        max,
        base_url = %config.base_url,
        "starting scrape run"
    );
    let products =
        ScrapeOrchestrator::new(driver, request.clone(), PipelineSettings::from_config(config))
            .run()
            .await;

    let report = build_report(
        &request.output_name,
        request.filters,
        &request.base_url,
        &request.currency,
        products,
    );

    match write_report(&report, &config.output_dir, dry_run)? {
        Some(path) => println!(
            "wrote {} products to {}",
            report.products.len(),
            path.display()
        ),
        None => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

/// Persist `report` under `output_dir`, or do nothing on a dry run.
/// Returns the written path.
pub(crate) fn write_report(
    report: &Report,
    output_dir: &Path,
    dry_run: bool,
) -> anyhow::Result<Option<PathBuf>> {
    if dry_run {
        tracing::info!(title = %report.title, "dry-run: report not persisted");
        return Ok(None);
    }
    Ok(Some(JsonFileSink::new(output_dir).persist(report)?))
}

/// Visit a single product page and print its record.
///
/// # Errors
///
/// Returns an error if `asin` is not a valid identifier or the page driver
/// cannot be created.
pub(crate) async fn run_inspect(config: &AppConfig, asin: &str) -> anyhow::Result<()> {
    let id = ProductIdentifier::parse(asin)
        .ok_or_else(|| anyhow::anyhow!("'{asin}' is not a valid product identifier"))?;

    let mut driver = HttpPageDriver::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to start page driver session: {e}"))?;
    let settings = PipelineSettings::from_config(config);
    let inspector = ProductInspector::new(
        &settings.selectors,
        settings.wait,
        &config.base_url,
        &config.currency,
        &settings.locale,
    );

    let record = inspector.inspect(&mut driver, &id).await;
    if let Err(e) = driver.close().await {
        tracing::warn!(error = %e, "failed to close page driver");
    }

    match record {
        Some(record) => println!("{}", serde_json::to_string_pretty(&record)?),
        None => println!("{id}: not inspectable (title, seller or price missing)"),
    }
    Ok(())
}

/// Parse `raw` as a rendered price. A literal `\n` stands for a line break
/// so split prices can be typed on one command line.
///
/// # Errors
///
/// Returns an error if the price cannot be parsed.
pub(crate) fn parse_price_arg(raw: &str, currency: &str) -> anyhow::Result<f64> {
    let raw = raw.replace("\\n", "\n");
    Ok(parse_price(&raw, currency)?)
}

#[cfg(test)]
#[path = "run_test.rs"]
mod tests;
