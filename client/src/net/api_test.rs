use super::*;

#[test]
fn product_reviews_path_formats_expected_path() {
    assert_eq!(product_reviews_path(42), "/api/product/42/reviews/");
}

#[test]
fn add_review_path_formats_expected_path() {
    assert_eq!(add_review_path(42), "/api/product/42/add-review/");
}

#[test]
fn mark_for_review_path_formats_expected_path() {
    assert_eq!(mark_for_review_path(9), "/api/reviews/9/mark-for-review/");
}

#[test]
fn update_sentiment_path_formats_expected_path() {
    assert_eq!(update_sentiment_path(9), "/api/admin/reviews/9/update-sentiment/");
}

#[test]
fn activate_model_path_formats_expected_path() {
    assert_eq!(activate_model_path(3), "/api/admin/models/3/activate/");
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn calls_fail_cleanly_outside_the_browser() {
    let cfg = ApiConfig::default();
    assert_eq!(futures::executor::block_on(train_model(&cfg)), Err(ApiError::Unavailable));
    assert_eq!(futures::executor::block_on(fetch_models(&cfg)), Err(ApiError::Unavailable));
}
