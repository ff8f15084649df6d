use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use tracing::debug;

use crate::error::ScrapeError;
use crate::fetcher::Page;
use crate::models::EmbeddedState;

static CANONICAL_URL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[property="og:url"]"#).expect("valid og:url selector"));

/// The product id rides in the campaign tag the site appends on redirect.
static PRODUCT_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"utm_campaign=PDP-[^/]*-(\d+)-[^/]*").expect("valid product id pattern"));

static CACHE_STATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"window\.__cache=(\{"ROOT_QUERY.*?\});"#).expect("valid cache pattern"));

#[derive(Debug, Clone)]
pub struct ResolvedProduct {
    pub canonical_url: String,
    pub product_id: String,
    pub body: String,
}

pub fn resolve_product(page: Page) -> Result<ResolvedProduct, ScrapeError> {
    let canonical_url = canonical_url(&page.body).ok_or(ScrapeError::MetaTagNotFound)?;
    let product_id = product_id(&page.url).ok_or_else(|| ScrapeError::ProductIdNotFound(page.url.clone()))?;
    debug!(%canonical_url, %product_id, "resolved product");

    Ok(ResolvedProduct {
        canonical_url,
        product_id,
        body: page.body,
    })
}

fn canonical_url(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    doc.select(&CANONICAL_URL)
        .next()
        .and_then(|e| e.value().attr("content"))
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
}

fn product_id(url: &str) -> Option<String> {
    PRODUCT_ID
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

pub fn extract_state(html: &str) -> Result<EmbeddedState, ScrapeError> {
    let caps = CACHE_STATE.captures(html).ok_or(ScrapeError::StateNotFound)?;
    let json = &caps[1];
    debug!(bytes = json.len(), "found embedded state");
    EmbeddedState::from_json(json)
}
