use super::*;

fn review(id: i64) -> Review {
    Review {
        id,
        text: "text".to_owned(),
        rating: 3.0,
        model_sentiment: Some(Sentiment::Neutral),
        confidence: Some(0.4),
        human_sentiment: None,
        needs_review: true,
    }
}

fn model(id: i64, active: bool) -> MlModel {
    MlModel {
        id,
        file_name: format!("model_{id}.pkl"),
        created_at: "2024-05-01T10:00:00Z".to_owned(),
        accuracy: Some(0.912),
        precision: None,
        recall: None,
        f1_score: None,
        is_active: active,
        associated_reviews_count: 10,
        new_reviews_count: 0,
    }
}

#[test]
fn apply_page_replaces_reviews() {
    let mut state = AdminReviewsState { loading: true, ..AdminReviewsState::default() };
    state.apply_page(1, Page { count: 2, next: None, previous: None, results: vec![review(1), review(2)] });
    assert_eq!(state.reviews.len(), 2);
    assert!(!state.loading);
    assert_eq!(state.cursor.next(), None);
}

#[test]
fn set_sentiment_updates_only_matching_review() {
    let mut state = AdminReviewsState { reviews: vec![review(1), review(2)], ..AdminReviewsState::default() };
    state.set_sentiment(2, Sentiment::Positive);
    state.set_sentiment(99, Sentiment::Negative);
    assert_eq!(state.reviews[0].human_sentiment, None);
    assert_eq!(state.reviews[1].human_sentiment, Some(Sentiment::Positive));
}

#[test]
fn apply_error_sets_message() {
    let mut state = AdminReviewsState::default();
    state.apply_error("Failed to load reviews.");
    assert_eq!(state.error.as_deref(), Some("Failed to load reviews."));
}

#[test]
fn active_model_cannot_be_reactivated() {
    let mut state = ModelsState::default();
    state.apply_overview(ModelsOverview { models: vec![model(1, false), model(2, true)], unassociated_reviews_count: 7 });
    assert_eq!(state.active().map(|m| m.id), Some(2));
    assert_eq!(state.unassociated_reviews, 7);
    assert!(state.can_activate(&state.models[0]));
    assert!(!state.can_activate(&state.models[1]));
    state.busy = true;
    assert!(!state.can_activate(&state.models[0]));
}

#[test]
fn metric_label_formats_two_decimals() {
    assert_eq!(metric_label(Some(0.912)), "0.91");
    assert_eq!(metric_label(None), "N/A");
}
