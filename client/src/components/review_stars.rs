//! Rating line for a single review.

use leptos::prelude::*;

use crate::util::format::{rating_number, star_text};

#[component]
pub fn ReviewStars(rating: f64) -> impl IntoView {
    view! {
        <p class="review-stars">
            <strong>{rating_number(rating)} " " {star_text(rating)}</strong>
        </p>
    }
}
