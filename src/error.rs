use thiserror::Error;

/// Every way a product lookup can fail. Kept distinct so the top-level
/// boundary in `main` can report each one on its own terms.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    #[error("original URL not found in the og:url meta tag")]
    MetaTagNotFound,

    #[error("product ID not found in the URL {0}")]
    ProductIdNotFound(String),

    #[error("embedded JSON state not found on the page (layout changed or request blocked)")]
    StateNotFound,

    #[error("embedded JSON state is malformed")]
    MalformedState(#[source] serde_json::Error),

    #[error("record `{0}` missing from the embedded state")]
    MissingRecord(String),

    #[error("record `{key}` is malformed")]
    MalformedRecord {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
