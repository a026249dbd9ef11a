//! Wire DTOs for the review backend's REST API.
//!
//! DESIGN
//! ======
//! These mirror the backend serializers field-for-field. Optional numeric
//! fields default instead of failing so one sparse record cannot blank a
//! whole list.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Deserializer, Serialize};

// =============================================================
// Auth
// =============================================================

/// `POST /api/token/` request body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TokenRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// `POST /api/token/` response.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// `POST /api/token/refresh/` request body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RefreshRequest<'a> {
    pub refresh: &'a str,
}

/// `POST /api/token/refresh/` response.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct AccessToken {
    pub access: String,
}

// =============================================================
// Pagination
// =============================================================

/// Standard paged list envelope (`count`/`next`/`previous`/`results`).
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Page<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

// =============================================================
// Catalog
// =============================================================

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Category {
    pub id: serde_json::Value,
    pub name: String,
}

impl Category {
    /// The id as sent back in `category_id`; the backend mixes ints and strings.
    pub fn id_param(&self) -> String {
        match &self.id {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Per-product sentiment tallies in search results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct SentimentCounts {
    #[serde(default)]
    pub positive: u64,
    #[serde(default)]
    pub neutral: u64,
    #[serde(default)]
    pub negative: u64,
}

/// One search hit from `GET /api/suggestions/`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Suggestion {
    pub id: i64,
    pub name: String,
    pub image_url: Option<String>,
    /// Reviews have been scraped for this product.
    #[serde(default)]
    pub is_detailed: bool,
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub sentiments: SentimentCounts,
}

/// A marketplace listing for a product.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ProductSource {
    pub marketplace: String,
    pub url: String,
    pub price: Option<String>,
}

/// `GET /api/product/?productId=` response.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub image_url: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub is_detailed: bool,
    #[serde(default)]
    pub sources: Vec<ProductSource>,
}

// =============================================================
// Reviews
// =============================================================

/// Sentiment label used by both the model and human reviewers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub const ALL: [Self; 3] = [Self::Positive, Self::Neutral, Self::Negative];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Neutral => "Neutral",
            Self::Negative => "Negative",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == raw)
    }
}

const SENTIMENT_LABELS: &[&str] = &["Positive", "Neutral", "Negative"];

/// The backend's label columns are nullable and may hold `""`; both mean
/// "no label".
fn blank_sentiment<'de, D>(deserializer: D) -> Result<Option<Sentiment>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(label) => Sentiment::parse(label)
            .map(Some)
            .ok_or_else(|| <D::Error as serde::de::Error>::unknown_variant(label, SENTIMENT_LABELS)),
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Review {
    pub id: i64,
    pub text: String,
    pub rating: f64,
    #[serde(default, deserialize_with = "blank_sentiment")]
    pub model_sentiment: Option<Sentiment>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default, deserialize_with = "blank_sentiment")]
    pub human_sentiment: Option<Sentiment>,
    #[serde(default)]
    pub needs_review: bool,
}

/// Reviews grouped by marketplace, from `GET /api/product/{id}/reviews/`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SourceReviews {
    pub marketplace: String,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

/// `POST /api/product/{id}/add-review/` body.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewReview {
    pub text: String,
    pub rating: u8,
}

/// `POST /api/admin/reviews/{id}/update-sentiment/` body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SentimentUpdate {
    pub human_sentiment: Sentiment,
}

// =============================================================
// ML models
// =============================================================

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MlModel {
    pub id: i64,
    pub file_name: String,
    pub created_at: String,
    #[serde(default)]
    pub accuracy: Option<f64>,
    #[serde(default)]
    pub precision: Option<f64>,
    #[serde(default)]
    pub recall: Option<f64>,
    #[serde(default)]
    pub f1_score: Option<f64>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub associated_reviews_count: u64,
    #[serde(default)]
    pub new_reviews_count: u64,
}

/// `GET /api/admin/models/` response.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ModelsOverview {
    pub models: Vec<MlModel>,
    #[serde(default)]
    pub unassociated_reviews_count: u64,
}
