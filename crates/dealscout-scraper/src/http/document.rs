//! Element selection and form submission over a fetched HTML document.
//!
//! All functions parse the document on each call and return owned data, so
//! no `scraper::Html` value is ever held across an `.await`.

use reqwest::Url;
use scraper::{ElementRef, Html, Selector};

use crate::driver::PageElement;
use crate::error::ScraperError;
use crate::locator::Locator;

/// Attributes that browsers expose as absolute URLs.
const URL_ATTRIBUTES: [&str; 2] = ["href", "action"];

fn compile(locator: &Locator) -> Result<Selector, ScraperError> {
    Selector::parse(&locator.to_css()).map_err(|e| ScraperError::InvalidSelector {
        locator: locator.to_string(),
        reason: format!("{e:?}"),
    })
}

/// Rendered text of an element: each non-blank line trimmed, joined by `\n`.
///
/// Sibling text nodes on separate source lines (e.g. the whole and
/// fractional parts of a price) stay on separate lines.
fn rendered_text(element: ElementRef<'_>) -> String {
    let raw: String = element.text().collect();
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn snapshot(element: ElementRef<'_>, base: Option<&Url>) -> PageElement {
    element
        .value()
        .attrs()
        .fold(PageElement::new(rendered_text(element)), |el, (name, value)| {
            let value = match base {
                Some(base) if URL_ATTRIBUTES.contains(&name) => base
                    .join(value)
                    .map_or_else(|_| value.to_owned(), |u| u.to_string()),
                _ => value.to_owned(),
            };
            el.with_attribute(name, value)
        })
}

/// Snapshots every element in `html` matching `locator`, in document order.
///
/// # Errors
///
/// [`ScraperError::InvalidSelector`] if the locator is not valid CSS.
pub(crate) fn select(
    html: &str,
    page_url: &str,
    locator: &Locator,
) -> Result<Vec<PageElement>, ScraperError> {
    let selector = compile(locator)?;
    let base = Url::parse(page_url).ok();
    let document = Html::parse_document(html);
    Ok(document
        .select(&selector)
        .map(|el| snapshot(el, base.as_ref()))
        .collect())
}

/// URL a browser would load when Enter is pressed in the field matching
/// `field` with `text` typed into it: the enclosing form's action with the
/// field and any hidden inputs as query parameters.
///
/// # Errors
///
/// - [`ScraperError::ElementNotFound`] if the field or its form is missing.
/// - [`ScraperError::InvalidSelector`] if the field has no `name`.
/// - [`ScraperError::InvalidUrl`] if the form action cannot be resolved.
pub(crate) fn form_submission_url(
    html: &str,
    page_url: &str,
    field: &Locator,
    text: &str,
) -> Result<String, ScraperError> {
    let selector = compile(field)?;
    let hidden = compile(&Locator::path("input[type=hidden][name]"))?;
    let document = Html::parse_document(html);

    let input = document
        .select(&selector)
        .next()
        .ok_or_else(|| ScraperError::ElementNotFound {
            locator: field.to_string(),
            url: page_url.to_owned(),
        })?;
    let name = input
        .value()
        .attr("name")
        .ok_or_else(|| ScraperError::InvalidSelector {
            locator: field.to_string(),
            reason: "input has no name attribute".to_owned(),
        })?;

    let form = input
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "form")
        .ok_or_else(|| ScraperError::ElementNotFound {
            locator: format!("form enclosing {field}"),
            url: page_url.to_owned(),
        })?;

    let invalid = |reason: String| ScraperError::InvalidUrl {
        url: page_url.to_owned(),
        reason,
    };
    let base = Url::parse(page_url).map_err(|e| invalid(e.to_string()))?;
    let action = form.value().attr("action").unwrap_or_default();
    let mut target = base.join(action).map_err(|e| invalid(e.to_string()))?;

    target.set_query(None);
    {
        let mut pairs = target.query_pairs_mut();
        for hidden_input in form.select(&hidden) {
            let value = hidden_input.value();
            if let Some(hidden_name) = value.attr("name") {
                pairs.append_pair(hidden_name, value.attr("value").unwrap_or_default());
            }
        }
        pairs.append_pair(name, text);
    }

    Ok(target.to_string())
}
