//! Product detail page state: reviews, metrics and the add-review draft.
//!
//! DESIGN
//! ======
//! Metrics are computed from the model's labels across every marketplace
//! source, while the visible list uses the human label when one exists.
//! Keeping both here makes the page a thin renderer.

#[cfg(test)]
#[path = "product_test.rs"]
mod product_test;

use crate::net::types::{NewReview, Product, Review, Sentiment, SourceReviews};

/// Sentiment tallies and mean rating over a product's reviews.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ReviewMetrics {
    pub positive: u64,
    pub neutral: u64,
    pub negative: u64,
    pub total: u64,
    rating_sum: f64,
}

impl ReviewMetrics {
    pub fn from_sources(sources: &[SourceReviews]) -> Self {
        let mut metrics = Self::default();
        for review in sources.iter().flat_map(|s| s.reviews.iter()) {
            match review.model_sentiment {
                Some(Sentiment::Positive) => metrics.positive += 1,
                Some(Sentiment::Neutral) => metrics.neutral += 1,
                Some(Sentiment::Negative) => metrics.negative += 1,
                None => {}
            }
            metrics.total += 1;
            metrics.rating_sum += review.rating;
        }
        metrics
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn average_rating(&self) -> Option<f64> {
        (self.total > 0).then(|| self.rating_sum / self.total as f64)
    }

    /// Overall score shown in the header, `N/A` without reviews.
    pub fn score_label(&self) -> String {
        self.average_rating().map_or_else(|| "N/A".to_owned(), |avg| format!("{avg:.2}"))
    }

    pub fn count(&self, sentiment: Sentiment) -> u64 {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Neutral => self.neutral,
            Sentiment::Negative => self.negative,
        }
    }
}

/// The label a reader sees: the human correction if present.
pub fn display_sentiment(review: &Review) -> Option<Sentiment> {
    review.human_sentiment.or(review.model_sentiment)
}

/// A human reviewer has confirmed or corrected the label.
pub fn is_verified(review: &Review) -> bool {
    review.human_sentiment.is_some()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SentimentFilter {
    #[default]
    All,
    Only(Sentiment),
}

impl SentimentFilter {
    pub fn matches(self, review: &Review) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => display_sentiment(review) == Some(wanted),
        }
    }

    pub fn param(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Only(s) => s.as_str(),
        }
    }

    pub fn parse(raw: &str) -> Self {
        Sentiment::parse(raw).map_or(Self::All, Self::Only)
    }
}

/// Per-source review lists after filtering. Sources left empty are kept so
/// the page can still show the marketplace heading.
pub fn filter_reviews(sources: &[SourceReviews], filter: SentimentFilter) -> Vec<SourceReviews> {
    sources
        .iter()
        .map(|source| SourceReviews {
            marketplace: source.marketplace.clone(),
            reviews: source.reviews.iter().filter(|r| filter.matches(r)).cloned().collect(),
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DraftError {
    EmptyText,
    RatingOutOfRange(u8),
}

impl std::fmt::Display for DraftError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => f.write_str("Review text cannot be empty."),
            Self::RatingOutOfRange(r) => write!(f, "Rating must be between 1 and 5, got {r}."),
        }
    }
}

/// Add-review form contents. A zero rating means nothing picked yet.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReviewDraft {
    pub text: String,
    pub rating: u8,
}

impl ReviewDraft {
    /// # Errors
    ///
    /// Returns `DraftError` when the text is blank or the rating is not 1-5.
    pub fn validate(&self) -> Result<NewReview, DraftError> {
        let text = self.text.trim();
        if text.is_empty() {
            return Err(DraftError::EmptyText);
        }
        if !(1..=5).contains(&self.rating) {
            return Err(DraftError::RatingOutOfRange(self.rating));
        }
        Ok(NewReview { text: text.to_owned(), rating: self.rating })
    }
}

#[derive(Clone, Debug, Default)]
pub struct ProductState {
    pub product: Option<Product>,
    pub sources: Vec<SourceReviews>,
    pub metrics: ReviewMetrics,
    pub filter: SentimentFilter,
    pub draft: ReviewDraft,
    pub loading: bool,
    pub error: Option<String>,
    /// Review ids flagged for admin attention during this visit.
    pub marked: Vec<i64>,
}

impl ProductState {
    pub fn apply_reviews(&mut self, sources: Vec<SourceReviews>) {
        self.metrics = ReviewMetrics::from_sources(&sources);
        self.sources = sources;
    }

    pub fn visible_sources(&self) -> Vec<SourceReviews> {
        filter_reviews(&self.sources, self.filter)
    }

    pub fn mark(&mut self, review_id: i64) {
        if !self.marked.contains(&review_id) {
            self.marked.push(review_id);
        }
    }

    pub fn is_marked(&self, review: &Review) -> bool {
        review.needs_review || self.marked.contains(&review.id)
    }
}
