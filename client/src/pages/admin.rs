//! Admin review queue: reviews flagged for a human sentiment label.

use leptos::prelude::*;

use crate::components::pager::Pager;
use crate::components::review_stars::ReviewStars;
use crate::config::ApiConfig;
use crate::net::api;
use crate::net::types::{Review, Sentiment};
use crate::state::admin::AdminReviewsState;
use crate::util::auth::SessionHandle;

#[component]
pub fn AdminPage() -> impl IntoView {
    let config = expect_context::<ApiConfig>();
    let session = expect_context::<SessionHandle>();
    let state = RwSignal::new(AdminReviewsState::default());
    let notice = RwSignal::new(None::<String>);

    let load = {
        let config = config.clone();
        let session = session.clone();
        Callback::new(move |page: u32| {
            state.update(|s| s.loading = true);
            let config = config.clone();
            let session = session.clone();
            leptos::task::spawn_local(async move {
                match session.with_refresh(|| api::fetch_admin_reviews(&config, page)).await {
                    Ok(response) => state.update(|s| s.apply_page(page, response)),
                    Err(e) => {
                        log::warn!("admin: reviews fetch failed page={page} error={e}");
                        state.update(|s| s.apply_error("Error fetching reviews."));
                    }
                }
            });
        })
    };

    Effect::new(move || load.run(1));

    let update_sentiment = Callback::new(move |(review_id, sentiment): (i64, Sentiment)| {
        let config = config.clone();
        let session = session.clone();
        leptos::task::spawn_local(async move {
            match session.with_refresh(|| api::update_review_sentiment(&config, review_id, sentiment)).await {
                Ok(()) => {
                    state.update(|s| s.set_sentiment(review_id, sentiment));
                    notice.set(Some("Review sentiment updated successfully.".to_owned()));
                    load.run(state.with_untracked(|s| s.cursor.page));
                }
                Err(e) => {
                    log::warn!("admin: sentiment update failed review={review_id} error={e}");
                    notice.set(Some("Failed to update sentiment.".to_owned()));
                }
            }
        });
    });

    view! {
        <div class="admin-page">
            <h1 class="admin-page__title">"Admin Panel - Review Sentiments"</h1>
            <Show when=move || state.with(|s| s.loading)>
                <p>"Loading reviews..."</p>
            </Show>
            <Show when=move || state.with(|s| s.error.is_some())>
                <p class="admin-page__error">{move || state.with(|s| s.error.clone().unwrap_or_default())}</p>
            </Show>
            <Show when=move || notice.get().is_some()>
                <p class="admin-page__notice">{move || notice.get().unwrap_or_default()}</p>
            </Show>
            <Show when=move || state.with(|s| !s.loading && s.reviews.is_empty() && s.error.is_none())>
                <p>"No reviews need attention."</p>
            </Show>
            <div class="admin-page__reviews">
                {move || {
                    state
                        .with(|s| s.reviews.clone())
                        .into_iter()
                        .map(|review| admin_review_card(review, update_sentiment))
                        .collect_view()
                }}
            </div>
            <Pager cursor=Signal::derive(move || state.with(|s| s.cursor)) on_page=load/>
        </div>
    }
}

fn admin_review_card(review: Review, on_update: Callback<(i64, Sentiment)>) -> impl IntoView {
    let id = review.id;
    let current = review.human_sentiment;
    view! {
        <div class="admin-review">
            <p>
                <strong>"Review:"</strong>
                " "
                {review.text}
            </p>
            <ReviewStars rating=review.rating/>
            <p>
                <strong>"Model Sentiment:"</strong>
                " "
                {review.model_sentiment.map_or("N/A", Sentiment::as_str)}
                {review.confidence.map(|c| format!(" ({c:.2})"))}
            </p>
            <div class="admin-review__actions">
                <strong>"Update Sentiment:"</strong>
                {Sentiment::ALL
                    .into_iter()
                    .map(|sentiment| {
                        let class = if current == Some(sentiment) {
                            "btn sentiment-button sentiment-button--selected"
                        } else {
                            "btn sentiment-button"
                        };
                        view! {
                            <button class=class on:click=move |_| on_update.run((id, sentiment))>
                                {sentiment.as_str()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
