//! Product search page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Landing route. Search inputs and results live in the app-level
//! `RwSignal<SearchState>` so returning from a product page restores them.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::pager::Pager;
use crate::config::ApiConfig;
use crate::net::api;
use crate::net::types::Suggestion;
use crate::state::search::{SearchState, SortOrder, rating_label};
use crate::util::auth::SessionHandle;

#[component]
pub fn HomePage() -> impl IntoView {
    let search = expect_context::<RwSignal<SearchState>>();
    let config = expect_context::<ApiConfig>();
    let session = expect_context::<SessionHandle>();

    let categories_config = config.clone();
    Effect::new(move || {
        if !search.with_untracked(|s| s.categories.is_empty()) {
            return;
        }
        let config = categories_config.clone();
        leptos::task::spawn_local(async move {
            match api::fetch_categories(&config).await {
                Ok(categories) => search.update(|s| s.categories = categories),
                Err(e) => log::warn!("search: categories fetch failed error={e}"),
            }
        });
    });

    let run_search = Callback::new(move |page: u32| {
        let params = search.with_untracked(|s| s.query_params(page));
        search.update(|s| s.loading = true);
        let config = config.clone();
        let session = session.clone();
        leptos::task::spawn_local(async move {
            match session.with_refresh(|| api::search_suggestions(&config, &params)).await {
                Ok(response) => search.update(|s| s.apply_results(page, response)),
                Err(e) => {
                    log::warn!("search: suggestions fetch failed page={page} error={e}");
                    search.update(|s| s.apply_error("Error fetching suggestions."));
                }
            }
        });
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        run_search.run(1);
    };

    view! {
        <div class="home-page">
            <h1 class="home-page__title">"Пошук продукту"</h1>
            <form class="search-form" on:submit=on_submit>
                <input
                    class="search-form__input"
                    type="text"
                    placeholder="Введіть назву продукту..."
                    prop:value=move || search.with(|s| s.term.clone())
                    on:input=move |ev| search.update(|s| s.term = event_target_value(&ev))
                />
                <select
                    class="search-form__category"
                    prop:value=move || search.with(|s| s.category.clone())
                    on:change=move |ev| search.update(|s| s.category = event_target_value(&ev))
                >
                    <option value="">"Всі категорії"</option>
                    {move || {
                        search
                            .with(|s| s.categories.clone())
                            .into_iter()
                            .map(|c| {
                                let value = c.id_param();
                                view! { <option value=value>{c.name}</option> }
                            })
                            .collect_view()
                    }}
                </select>
                <select
                    class="search-form__sort"
                    prop:value=move || search.with(|s| s.sort.param())
                    on:change=move |ev| search.update(|s| s.sort = SortOrder::from_param(&event_target_value(&ev)))
                >
                    {SortOrder::ALL
                        .into_iter()
                        .map(|order| view! { <option value=order.param()>{order.label()}</option> })
                        .collect_view()}
                </select>
                <button class="btn search-form__submit" type="submit" disabled=move || search.with(|s| s.loading)>
                    "Пошук"
                </button>
            </form>

            <Show when=move || search.with(|s| s.error.is_some())>
                <p class="home-page__error">{move || search.with(|s| s.error.clone().unwrap_or_default())}</p>
            </Show>
            <Show when=move || search.with(|s| s.loading)>
                <p>"Loading..."</p>
            </Show>

            <div class="home-page__results">
                {move || search.with(|s| s.results.clone()).into_iter().map(suggestion_card).collect_view()}
            </div>
            <Pager cursor=Signal::derive(move || search.with(|s| s.cursor)) on_page=run_search/>
        </div>
    }
}

fn suggestion_card(suggestion: Suggestion) -> impl IntoView {
    let href = format!("/product/{}", suggestion.id);
    let status = if suggestion.is_detailed { "В системі" } else { "Потребує скрапінгу" };
    let counts = suggestion.sentiments;
    let is_detailed = suggestion.is_detailed;
    let average = suggestion.average_rating;
    view! {
        <A href=href>
            <div class="suggestion-card">
                {suggestion
                    .image_url
                    .map(|src| view! { <img class="suggestion-card__image" src=src alt=suggestion.name.clone()/> })}
                <h2 class="suggestion-card__name">{suggestion.name.clone()}</h2>
                <span class="suggestion-card__status">{status}</span>
                <Show when=move || is_detailed>
                    <p>
                        <strong>"Рейтинг:"</strong>
                        " "
                        {rating_label(average)}
                    </p>
                    <p class="suggestion-card__sentiments">
                        <strong>"Настрої:"</strong>
                        {format!(" +{} / ={} / -{}", counts.positive, counts.neutral, counts.negative)}
                    </p>
                </Show>
            </div>
        </A>
    }
}
