use std::fmt;

use tracing::info;

use crate::error::ScrapeError;
use crate::fetcher::PageSource;
use crate::models::{BasicInfo, EmbeddedState, Scalar, Stats, TxStats, keys};
use crate::parser::{self, ResolvedProduct};

#[derive(Debug)]
pub struct ProductInfo {
    pub name: String,
    pub created_at: String,
    pub product_id: String,
    pub shop_id: String,
    pub shop_name: String,
    pub status: String,
    pub transaction_success: Scalar,
    pub transaction_reject: Scalar,
    pub count_sold: Scalar,
    pub payment_verified: Scalar,
    pub count_view: Scalar,
    pub count_review: Scalar,
    pub rating: Scalar,
}

impl ProductInfo {
    /// Every field is required; the first absent record or field aborts
    /// with an error naming its key.
    pub fn from_state(state: &EmbeddedState, product_id: &str) -> Result<Self, ScrapeError> {
        let basic: BasicInfo = state.require(&keys::basic_info(product_id))?;
        let tx: TxStats = state.require(&keys::tx_stats(product_id))?;
        let stats: Stats = state.require(&keys::stats(product_id))?;

        Ok(Self {
            name: basic.alias.replace('-', " "),
            created_at: basic.created_at,
            product_id: basic.product_id,
            shop_id: basic.shop_id,
            shop_name: basic.shop_name,
            status: basic.status,
            transaction_success: tx.transaction_success,
            transaction_reject: tx.transaction_reject,
            count_sold: tx.count_sold,
            payment_verified: tx.payment_verified,
            count_view: stats.count_view,
            count_review: stats.count_review,
            rating: stats.rating,
        })
    }

    pub fn fields(&self) -> [(&'static str, String); 13] {
        [
            ("Product Name", self.name.clone()),
            ("Created At", self.created_at.clone()),
            ("Product ID", self.product_id.clone()),
            ("Shop ID", self.shop_id.clone()),
            ("Shop Name", self.shop_name.clone()),
            ("Status", self.status.clone()),
            ("Transaction Success", self.transaction_success.to_string()),
            ("Transaction Reject", self.transaction_reject.to_string()),
            ("Count Sold", self.count_sold.to_string()),
            ("Payment Verified", self.payment_verified.to_string()),
            ("Count View", self.count_view.to_string()),
            ("Count Review", self.count_review.to_string()),
            ("Rating", self.rating.to_string()),
        ]
    }
}

impl fmt::Display for ProductInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, value) in self.fields() {
            writeln!(f, "{label}: {value}")?;
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct ProductReport {
    pub product: ResolvedProduct,
    pub info: ProductInfo,
}

pub fn report_product(source: &impl PageSource, link: &str) -> Result<ProductReport, ScrapeError> {
    let page = source.fetch(link)?;
    let product = parser::resolve_product(page)?;
    let state = parser::extract_state(&product.body)?;
    let info = ProductInfo::from_state(&state, &product.product_id)?;
    info!(product_id = %product.product_id, shop = %info.shop_name, "read product info");

    Ok(ProductReport { product, info })
}
