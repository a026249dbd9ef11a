//! Product detail page: sources, review metrics, filtered reviews and the
//! add-review form.
//!
//! SYSTEM CONTEXT
//! ==============
//! Loads the product by route id, then its reviews grouped by marketplace.
//! Adding or flagging reviews is offered to signed-in users only; the
//! backend enforces the same rule.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::review_stars::ReviewStars;
use crate::config::ApiConfig;
use crate::net::api;
use crate::net::types::{Review, Sentiment, SourceReviews};
use crate::state::product::{ProductState, SentimentFilter, display_sentiment, is_verified};
use crate::util::auth::SessionHandle;

fn sentiment_class(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "sentiment sentiment--positive",
        Sentiment::Neutral => "sentiment sentiment--neutral",
        Sentiment::Negative => "sentiment sentiment--negative",
    }
}

fn filter_label(filter: SentimentFilter) -> &'static str {
    match filter {
        SentimentFilter::All => "Усі",
        SentimentFilter::Only(Sentiment::Positive) => "Позитивні",
        SentimentFilter::Only(Sentiment::Neutral) => "Нейтральні",
        SentimentFilter::Only(Sentiment::Negative) => "Негативні",
    }
}

const FILTERS: [SentimentFilter; 4] = [
    SentimentFilter::All,
    SentimentFilter::Only(Sentiment::Positive),
    SentimentFilter::Only(Sentiment::Neutral),
    SentimentFilter::Only(Sentiment::Negative),
];

#[component]
pub fn ProductPage() -> impl IntoView {
    let params = use_params_map();
    let config = expect_context::<ApiConfig>();
    let session = expect_context::<SessionHandle>();
    let auth = session.state;
    let state = RwSignal::new(ProductState::default());
    let notice = RwSignal::new(None::<String>);

    let reload_reviews = {
        let config = config.clone();
        let session = session.clone();
        Callback::new(move |product_id: i64| {
            let config = config.clone();
            let session = session.clone();
            leptos::task::spawn_local(async move {
                match session.with_refresh(|| api::fetch_product_reviews(&config, product_id)).await {
                    Ok(sources) => state.update(|s| s.apply_reviews(sources)),
                    Err(e) => log::warn!("product: reviews reload failed id={product_id} error={e}"),
                }
            });
        })
    };

    let load_config = config.clone();
    let load_session = session.clone();
    Effect::new(move || {
        let Some(id) = params.read().get("id") else {
            return;
        };
        state.set(ProductState { loading: true, ..ProductState::default() });
        let config = load_config.clone();
        let session = load_session.clone();
        leptos::task::spawn_local(async move {
            let loaded = async {
                let product = session.with_refresh(|| api::fetch_product(&config, &id)).await?;
                let sources = session.with_refresh(|| api::fetch_product_reviews(&config, product.id)).await?;
                Ok::<_, crate::error::ApiError>((product, sources))
            }
            .await;
            match loaded {
                Ok((product, sources)) => state.update(|s| {
                    s.product = Some(product);
                    s.apply_reviews(sources);
                    s.loading = false;
                }),
                Err(e) => {
                    log::warn!("product: load failed id={id} error={e}");
                    state.update(|s| {
                        s.loading = false;
                        s.error = Some("Помилка при отриманні інформації про товар або відгуків.".to_owned());
                    });
                }
            }
        });
    });

    let submit_config = config.clone();
    let submit_session = session.clone();
    let add_review = Callback::new(move |(): ()| {
        let Some(product_id) = state.with_untracked(|s| s.product.as_ref().map(|p| p.id)) else {
            return;
        };
        let review = match state.with_untracked(|s| s.draft.validate()) {
            Ok(review) => review,
            Err(e) => {
                notice.set(Some(e.to_string()));
                return;
            }
        };
        let config = submit_config.clone();
        let session = submit_session.clone();
        leptos::task::spawn_local(async move {
            match session.with_refresh(|| api::add_review(&config, product_id, &review)).await {
                Ok(()) => {
                    state.update(|s| s.draft = Default::default());
                    notice.set(Some("Ваш відгук було надіслано!".to_owned()));
                    reload_reviews.run(product_id);
                }
                Err(e) => {
                    log::warn!("product: add review failed id={product_id} error={e}");
                    notice.set(Some("Не вдалося надіслати ваш відгук.".to_owned()));
                }
            }
        });
    });

    let mark = Callback::new(move |review_id: i64| {
        let config = config.clone();
        let session = session.clone();
        leptos::task::spawn_local(async move {
            match session.with_refresh(|| api::mark_for_review(&config, review_id)).await {
                Ok(()) => {
                    state.update(|s| s.mark(review_id));
                    notice.set(Some("Відгук позначено для перегляду адміністратором.".to_owned()));
                }
                Err(e) => {
                    log::warn!("product: mark failed review={review_id} error={e}");
                    notice.set(Some("Не вдалося позначити відгук для перегляду.".to_owned()));
                }
            }
        });
    });

    let signed_in = move || auth.get().is_authenticated();

    view! {
        <div class="product-page">
            <Show when=move || state.with(|s| s.error.is_some())>
                <p class="product-page__error">{move || state.with(|s| s.error.clone().unwrap_or_default())}</p>
            </Show>
            <Show when=move || notice.get().is_some()>
                <p class="product-page__notice">{move || notice.get().unwrap_or_default()}</p>
            </Show>
            <Show
                when=move || state.with(|s| s.product.is_some())
                fallback=move || {
                    view! {
                        <Show when=move || state.with(|s| s.loading)>
                            <p>"Завантаження..."</p>
                        </Show>
                    }
                }
            >
                {move || state.with(|s| s.product.clone()).map(|product| {
                    view! {
                        <div class="product-card">
                            <h2 class="product-card__name">{product.name.clone()}</h2>
                            {product.image_url.clone().map(|src| view! { <img class="product-card__image" src=src alt=product.name.clone()/> })}
                            <p class="product-card__description">{product.description.clone().unwrap_or_default()}</p>
                            <h3>"Джерела"</h3>
                            <ul class="product-card__sources">
                                {product
                                    .sources
                                    .iter()
                                    .map(|source| {
                                        let label = format!("{} - {}", source.marketplace, source.price.clone().unwrap_or_default());
                                        view! {
                                            <li>
                                                <a href=source.url.clone() target="_blank" rel="noopener noreferrer">{label}</a>
                                            </li>
                                        }
                                    })
                                    .collect_view()}
                            </ul>
                        </div>
                    }
                })}

                <div class="metrics">
                    <h3>"Метрики"</h3>
                    <p><strong>"Позитивні відгуки:"</strong> " " {move || state.with(|s| s.metrics.positive)}</p>
                    <p><strong>"Нейтральні відгуки:"</strong> " " {move || state.with(|s| s.metrics.neutral)}</p>
                    <p><strong>"Негативні відгуки:"</strong> " " {move || state.with(|s| s.metrics.negative)}</p>
                    <p><strong>"Загальна оцінка:"</strong> " " {move || state.with(|s| s.metrics.score_label())}</p>
                </div>

                <h3>"Відгуки по Джерелам"</h3>
                <label class="review-filter">
                    "Фільтрувати за Настроєм: "
                    <select
                        prop:value=move || state.with(|s| s.filter.param())
                        on:change=move |ev| state.update(|s| s.filter = SentimentFilter::parse(&event_target_value(&ev)))
                    >
                        {FILTERS
                            .into_iter()
                            .map(|f| view! { <option value=f.param()>{filter_label(f)}</option> })
                            .collect_view()}
                    </select>
                </label>
                {move || {
                    state
                        .with(ProductState::visible_sources)
                        .into_iter()
                        .map(|source| source_block(source, state, signed_in, mark))
                        .collect_view()
                }}

                <Show when=signed_in>
                    <div class="add-review">
                        <h3>"Додати відгук"</h3>
                        <textarea
                            placeholder="Напишість свій коментарій..."
                            prop:value=move || state.with(|s| s.draft.text.clone())
                            on:input=move |ev| state.update(|s| s.draft.text = event_target_value(&ev))
                        ></textarea>
                        <label>
                            "Оцінка: "
                            <select
                                prop:value=move || state.with(|s| s.draft.rating.to_string())
                                on:change=move |ev| {
                                    let rating = event_target_value(&ev).parse().unwrap_or(0);
                                    state.update(|s| s.draft.rating = rating);
                                }
                            >
                                <option value="0">"Вибір"</option>
                                {(1..=5u8).map(|r| view! { <option value=r.to_string()>{r}</option> }).collect_view()}
                            </select>
                        </label>
                        <button class="btn add-review__submit" on:click=move |_: leptos::ev::MouseEvent| add_review.run(())>
                            "Залишити відгук"
                        </button>
                    </div>
                </Show>
            </Show>
        </div>
    }
}

fn source_block(
    source: SourceReviews,
    state: RwSignal<ProductState>,
    signed_in: impl Fn() -> bool + Copy + Send + Sync + 'static,
    mark: Callback<i64>,
) -> impl IntoView {
    let empty = source.reviews.is_empty();
    view! {
        <div class="source-reviews">
            <h4>{source.marketplace}</h4>
            <Show when=move || !empty fallback=|| view! { <p class="muted">"Немає відгуків для вибраного настрою."</p> }>
                {source.reviews.clone().into_iter().map(|review| review_card(review, state, signed_in, mark)).collect_view()}
            </Show>
        </div>
    }
}

fn review_card(
    review: Review,
    state: RwSignal<ProductState>,
    signed_in: impl Fn() -> bool + Copy + Send + Sync + 'static,
    mark: Callback<i64>,
) -> impl IntoView {
    let sentiment = display_sentiment(&review);
    let verified = is_verified(&review);
    let id = review.id;
    let rating = review.rating;
    let text = review.text.clone();
    let flaggable = move || signed_in() && !verified && !state.with(|s| s.is_marked(&review));
    view! {
        <div class="review-card">
            <ReviewStars rating=rating/>
            <p class="review-card__text">{text}</p>
            <div class="review-card__footer">
                <span class=sentiment.map_or("sentiment", sentiment_class)>{sentiment.map_or("", Sentiment::as_str)}</span>
                <Show when=move || verified>
                    <span class="badge badge--verified">"Підтверджено"</span>
                </Show>
                <Show when=flaggable>
                    <button class="btn review-card__mark" on:click=move |_| mark.run(id)>
                        "Позначити для Розгляду"
                    </button>
                </Show>
            </div>
        </div>
    }
}
