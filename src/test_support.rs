use std::cell::RefCell;
use std::collections::HashMap;

use serde_json::{Value, json};

use crate::error::ScrapeError;
use crate::fetcher::{Page, PageSource};

pub const CANONICAL_URL: &str = "https://www.tokopedia.com/shopx/cool-gadget";
pub const RESOLVED_URL: &str =
    "https://www.tokopedia.com/shopx/cool-gadget?extParam=whid%3D1&utm_campaign=PDP-9-123-0&utm_source=copy";

/// `window.__cache=...;` with `ROOT_QUERY` first, the way the site renders it.
pub fn cache_script(entries: &[(String, Value)]) -> String {
    let mut body = String::from(r#"{"ROOT_QUERY":{"__typename":"Query"}"#);
    for (key, value) in entries {
        body.push(',');
        body.push_str(&serde_json::to_string(key).unwrap());
        body.push(':');
        body.push_str(&value.to_string());
    }
    body.push('}');
    format!("window.__cache={body};")
}

pub fn html_page(canonical_url: Option<&str>, script: &str) -> String {
    let meta = canonical_url
        .map(|url| format!(r#"<meta property="og:url" content="{url}">"#))
        .unwrap_or_default();
    format!(
        "<!DOCTYPE html><html><head><title>Cool Gadget</title>{meta}</head>\
         <body><div id=\"zeus-root\"></div><script>{script}</script></body></html>"
    )
}

pub fn product_entries() -> Vec<(String, Value)> {
    vec![
        (
            "pdpBasicInfo123".into(),
            json!({
                "alias": "cool-gadget",
                "createdAt": "2023-01-01",
                "productID": "123",
                "shopID": "9",
                "shopName": "ShopX",
                "status": "active"
            }),
        ),
        (
            "$pdpBasicInfo123.txStats".into(),
            json!({
                "transactionSuccess": 10,
                "transactionReject": 1,
                "countSold": 10,
                "paymentVerified": true
            }),
        ),
        (
            "$pdpBasicInfo123.stats".into(),
            json!({"countView": 500, "countReview": 5, "rating": 4.5}),
        ),
    ]
}

/// Three reviews: one anonymous, one with a 5-character message, one genuine.
pub fn review_entries() -> Vec<(String, Value)> {
    let reviews = [
        ("Review:1", "Budi", "Barang bagus sekali", true),
        ("Review:2", "Siti", "Bagus", false),
        ("Review:3", "Andi Wijaya", "Barang sesuai deskripsi", false),
    ];

    let list: Vec<Value> = reviews
        .iter()
        .map(|(id, ..)| json!({"type": "id", "generated": false, "id": id, "typename": "ProductrevReviewDetail"}))
        .collect();

    let mut entries = vec![(
        crate::models::keys::review_list("123"),
        json!({"totalReviews": 3, "hasNext": false, "list": list}),
    )];
    for (id, name, message, anonymous) in reviews {
        entries.push((
            id.to_string(),
            json!({"message": message, "isAnonymous": anonymous, "productRating": 5}),
        ));
        entries.push((format!("${id}.user"), json!({"fullName": name, "userID": "1"})));
    }
    entries
}

/// In-memory pages keyed by request URL; remembers what was asked for.
#[derive(Default)]
pub struct StaticSource {
    pages: HashMap<String, Page>,
    pub requested: RefCell<Vec<String>>,
}

impl StaticSource {
    pub fn with_page(mut self, request_url: &str, final_url: &str, body: String) -> Self {
        self.pages.insert(
            request_url.to_string(),
            Page {
                url: final_url.to_string(),
                body,
            },
        );
        self
    }
}

impl PageSource for StaticSource {
    fn fetch(&self, url: &str) -> Result<Page, ScrapeError> {
        self.requested.borrow_mut().push(url.to_string());
        match self.pages.get(url) {
            Some(page) => Ok(page.clone()),
            None => panic!("no fixture for {url}"),
        }
    }
}
