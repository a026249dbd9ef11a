//! Admin panel state: the flagged-review queue and the model registry.

#[cfg(test)]
#[path = "admin_test.rs"]
mod admin_test;

use crate::net::types::{MlModel, ModelsOverview, Page, Review, Sentiment};
use crate::state::paging::PageCursor;

#[derive(Clone, Debug, Default)]
pub struct AdminReviewsState {
    pub reviews: Vec<Review>,
    pub cursor: PageCursor,
    pub loading: bool,
    pub error: Option<String>,
}

impl AdminReviewsState {
    pub fn apply_page(&mut self, page: u32, response: Page<Review>) {
        self.cursor = PageCursor::from_page(page, &response);
        self.reviews = response.results;
        self.loading = false;
        self.error = None;
    }

    pub fn apply_error(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    /// Record a human label locally after the backend accepted it.
    pub fn set_sentiment(&mut self, review_id: i64, sentiment: Sentiment) {
        if let Some(review) = self.reviews.iter_mut().find(|r| r.id == review_id) {
            review.human_sentiment = Some(sentiment);
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ModelsState {
    pub models: Vec<MlModel>,
    pub unassociated_reviews: u64,
    pub loading: bool,
    /// A train or activate call is in flight.
    pub busy: bool,
    pub message: Option<String>,
}

impl ModelsState {
    pub fn apply_overview(&mut self, overview: ModelsOverview) {
        self.models = overview.models;
        self.unassociated_reviews = overview.unassociated_reviews_count;
        self.loading = false;
    }

    pub fn active(&self) -> Option<&MlModel> {
        self.models.iter().find(|m| m.is_active)
    }

    pub fn can_activate(&self, model: &MlModel) -> bool {
        !self.busy && !model.is_active
    }
}

/// Model metric rendered with two decimals.
pub fn metric_label(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_owned(), |v| format!("{v:.2}"))
}
