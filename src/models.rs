use std::fmt;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::ScrapeError;

pub const REVIEW_PAGE_SIZE: u32 = 10;
pub const REVIEW_SORT: &str = "informative_score desc";

/// The page's `window.__cache` object: a flat Apollo cache keyed by
/// record names, some of which embed the product or review id.
#[derive(Debug)]
pub struct EmbeddedState(Map<String, Value>);

impl EmbeddedState {
    pub fn from_json(text: &str) -> Result<Self, ScrapeError> {
        serde_json::from_str(text)
            .map(Self)
            .map_err(ScrapeError::MalformedState)
    }

    /// Reads `key` as a `T`. Absent and `null` records are `None`; a record
    /// that exists but does not fit `T` is an error.
    pub fn lookup<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ScrapeError> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => T::deserialize(value)
                .map(Some)
                .map_err(|source| ScrapeError::MalformedRecord {
                    key: key.to_string(),
                    source,
                }),
        }
    }

    pub fn require<T: DeserializeOwned>(&self, key: &str) -> Result<T, ScrapeError> {
        self.lookup(key)?
            .ok_or_else(|| ScrapeError::MissingRecord(key.to_string()))
    }
}

pub mod keys {
    use super::{REVIEW_PAGE_SIZE, REVIEW_SORT};

    pub fn basic_info(product_id: &str) -> String {
        format!("pdpBasicInfo{product_id}")
    }

    pub fn tx_stats(product_id: &str) -> String {
        format!("$pdpBasicInfo{product_id}.txStats")
    }

    pub fn stats(product_id: &str) -> String {
        format!("$pdpBasicInfo{product_id}.stats")
    }

    pub fn rating(product_id: &str) -> String {
        format!(
            r#"$ROOT_QUERY.productrevGetProductRatingAndTopics({{"productID":"{product_id}"}}).rating"#
        )
    }

    /// First page, no filter, most informative first.
    pub fn review_list(product_id: &str) -> String {
        format!(
            r#"$ROOT_QUERY.productrevGetProductReviewList({{"filterBy":"","limit":{REVIEW_PAGE_SIZE},"page":1,"productID":"{product_id}","sortBy":"{REVIEW_SORT}"}})"#
        )
    }

    pub fn review_user(review_id: &str) -> String {
        format!("${review_id}.user")
    }
}

/// Any JSON scalar, printed the way it appears in the page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(v) => write!(f, "{v}"),
            Scalar::Int(v) => write!(f, "{v}"),
            Scalar::Float(v) => write!(f, "{v}"),
            Scalar::Text(v) => f.write_str(v),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicInfo {
    pub alias: String,
    pub created_at: String,
    #[serde(rename = "productID")]
    pub product_id: String,
    #[serde(rename = "shopID")]
    pub shop_id: String,
    pub shop_name: String,
    pub status: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxStats {
    pub transaction_success: Scalar,
    pub transaction_reject: Scalar,
    pub count_sold: Scalar,
    pub payment_verified: Scalar,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub count_view: Scalar,
    pub count_review: Scalar,
    pub rating: Scalar,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    pub rating_score: Option<Scalar>,
    pub total_rating: Option<Scalar>,
}

#[derive(Debug, Deserialize)]
pub struct ReviewList {
    pub list: Vec<ReviewRef>,
}

/// Apollo reference to a review record elsewhere in the cache.
#[derive(Debug, Deserialize)]
pub struct ReviewRef {
    pub id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewUser {
    pub full_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDetail {
    pub message: String,
    pub is_anonymous: bool,
}
