//! REST helpers for catalog, review and admin endpoints.
//!
//! Every call carries the stored bearer token (`Bearer::Stored`); auth
//! endpoints live in `net::auth` because the session store drives them.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result` outputs instead of panics so fetch failures degrade
//! to an inline error message on the page.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::http::{self, Bearer};
use super::types::{
    Category, ModelsOverview, NewReview, Page, Product, Review, Sentiment, SentimentUpdate, SourceReviews, Suggestion,
};
use crate::config::ApiConfig;
use crate::error::ApiError;

pub const CATEGORIES_PATH: &str = "/api/categories/";
pub const SUGGESTIONS_PATH: &str = "/api/suggestions/";
pub const PRODUCT_PATH: &str = "/api/product/";
pub const ADMIN_REVIEWS_PATH: &str = "/api/admin/reviews/";
pub const ADMIN_MODELS_PATH: &str = "/api/admin/models/";
pub const TRAIN_MODEL_PATH: &str = "/api/admin/models/train/";

fn product_reviews_path(product_id: i64) -> String {
    format!("/api/product/{product_id}/reviews/")
}

fn add_review_path(product_id: i64) -> String {
    format!("/api/product/{product_id}/add-review/")
}

fn mark_for_review_path(review_id: i64) -> String {
    format!("/api/reviews/{review_id}/mark-for-review/")
}

fn update_sentiment_path(review_id: i64) -> String {
    format!("/api/admin/reviews/{review_id}/update-sentiment/")
}

fn activate_model_path(model_id: i64) -> String {
    format!("/api/admin/models/{model_id}/activate/")
}

/// # Errors
///
/// Returns `ApiError` if the request fails.
pub async fn fetch_categories(config: &ApiConfig) -> Result<Vec<Category>, ApiError> {
    http::get_json(config, CATEGORIES_PATH, &[], Bearer::Stored).await
}

/// Search products; `params` comes from `SearchState::query_params`.
///
/// # Errors
///
/// Returns `ApiError` if the request fails.
pub async fn search_suggestions(
    config: &ApiConfig,
    params: &[(&str, String)],
) -> Result<Page<Suggestion>, ApiError> {
    http::get_json(config, SUGGESTIONS_PATH, params, Bearer::Stored).await
}

/// # Errors
///
/// Returns `ApiError` if the request fails.
pub async fn fetch_product(config: &ApiConfig, product_id: &str) -> Result<Product, ApiError> {
    http::get_json(config, PRODUCT_PATH, &[("productId", product_id.to_owned())], Bearer::Stored).await
}

/// # Errors
///
/// Returns `ApiError` if the request fails.
pub async fn fetch_product_reviews(config: &ApiConfig, product_id: i64) -> Result<Vec<SourceReviews>, ApiError> {
    http::get_json(config, &product_reviews_path(product_id), &[], Bearer::Stored).await
}

/// # Errors
///
/// Returns `ApiError` if the request fails.
pub async fn add_review(config: &ApiConfig, product_id: i64, review: &NewReview) -> Result<(), ApiError> {
    http::post(config, &add_review_path(product_id), Some(review), Bearer::Stored).await
}

/// Flag a review for admin attention.
///
/// # Errors
///
/// Returns `ApiError` if the request fails.
pub async fn mark_for_review(config: &ApiConfig, review_id: i64) -> Result<(), ApiError> {
    http::post::<()>(config, &mark_for_review_path(review_id), None, Bearer::Stored).await
}

/// # Errors
///
/// Returns `ApiError` if the request fails.
pub async fn fetch_admin_reviews(config: &ApiConfig, page: u32) -> Result<Page<Review>, ApiError> {
    http::get_json(config, ADMIN_REVIEWS_PATH, &[("page", page.to_string())], Bearer::Stored).await
}

/// # Errors
///
/// Returns `ApiError` if the request fails.
pub async fn update_review_sentiment(config: &ApiConfig, review_id: i64, sentiment: Sentiment) -> Result<(), ApiError> {
    let body = SentimentUpdate { human_sentiment: sentiment };
    http::post(config, &update_sentiment_path(review_id), Some(&body), Bearer::Stored).await
}

/// # Errors
///
/// Returns `ApiError` if the request fails.
pub async fn fetch_models(config: &ApiConfig) -> Result<ModelsOverview, ApiError> {
    http::get_json(config, ADMIN_MODELS_PATH, &[], Bearer::Stored).await
}

/// # Errors
///
/// Returns `ApiError` if the request fails.
pub async fn activate_model(config: &ApiConfig, model_id: i64) -> Result<(), ApiError> {
    http::post::<()>(config, &activate_model_path(model_id), None, Bearer::Stored).await
}

/// Train a new model on the current labels. Blocks until training finishes.
///
/// # Errors
///
/// Returns `ApiError` if the request fails.
pub async fn train_model(config: &ApiConfig) -> Result<(), ApiError> {
    http::post::<()>(config, TRAIN_MODEL_PATH, None, Bearer::Stored).await
}
