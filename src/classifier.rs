use std::fmt;

use tracing::{debug, info, warn};

use crate::error::ScrapeError;
use crate::fetcher::PageSource;
use crate::models::{EmbeddedState, RatingSummary, ReviewDetail, ReviewList, ReviewUser, keys};
use crate::parser::{self, ResolvedProduct};

const SHORT_NAME_CHARS: usize = 1;
const SHORT_MESSAGE_CHARS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Fake,
    Real,
}

/// A review is fake when the reviewer's name is at most one character,
/// the message is at most ten characters, or the review is anonymous.
pub fn classify(user: &ReviewUser, review: &ReviewDetail) -> Verdict {
    let short_name = user.full_name.chars().count() <= SHORT_NAME_CHARS;
    let short_message = review.message.chars().count() <= SHORT_MESSAGE_CHARS;

    if short_name || short_message || review.is_anonymous {
        Verdict::Fake
    } else {
        Verdict::Real
    }
}

#[derive(Debug, Default)]
pub struct ReviewSummary {
    pub rating: Option<RatingSummary>,
    pub fake_users: Vec<String>,
    pub real_users: Vec<String>,
}

impl ReviewSummary {
    pub fn from_state(state: &EmbeddedState, product_id: &str) -> Result<Self, ScrapeError> {
        // Optional: an unreadable rating block is logged and skipped.
        let rating = state
            .lookup::<RatingSummary>(&keys::rating(product_id))
            .unwrap_or_else(|err| {
                warn!(error = %err, "ignoring unreadable rating summary");
                None
            });

        let reviews: ReviewList = state.require(&keys::review_list(product_id))?;
        let mut summary = Self {
            rating,
            ..Self::default()
        };

        for review in &reviews.list {
            let user: ReviewUser = state.require(&keys::review_user(&review.id))?;
            let detail: ReviewDetail = state.require(&review.id)?;
            let verdict = classify(&user, &detail);
            debug!(review_id = %review.id, ?verdict, "classified review");

            match verdict {
                Verdict::Fake => summary.fake_users.push(user.full_name),
                Verdict::Real => summary.real_users.push(user.full_name),
            }
        }

        info!(
            fake = summary.fake_users.len(),
            real = summary.real_users.len(),
            "classified reviews"
        );
        Ok(summary)
    }
}

impl fmt::Display for ReviewSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        if let Some(score) = self.rating.as_ref().and_then(|r| r.rating_score.as_ref()) {
            match self.rating.as_ref().and_then(|r| r.total_rating.as_ref()) {
                Some(total) => writeln!(f, "Average rating: {score} ({total} ratings)")?,
                None => writeln!(f, "Average rating: {score}")?,
            }
        }
        writeln!(f, "Total fake reviews: {}", self.fake_users.len())?;
        writeln!(f, "Fake users: {}", self.fake_users.join(", "))?;
        writeln!(f, "Total real reviews: {}", self.real_users.len())?;
        writeln!(f, "Real users: {}", self.real_users.join(", "))
    }
}

pub fn review_page_url(canonical_url: &str) -> String {
    format!("{canonical_url}/review?")
}

/// Reads the first page of reviews for an already resolved product.
pub fn classify_reviews(
    source: &impl PageSource,
    product: &ResolvedProduct,
) -> Result<ReviewSummary, ScrapeError> {
    let page = source.fetch(&review_page_url(&product.canonical_url))?;
    let state = parser::extract_state(&page.body)?;
    ReviewSummary::from_state(&state, &product.product_id)
}
