//! Model registry page: list trained sentiment models, activate one, or
//! train a new model from the current human labels.

use leptos::prelude::*;

use crate::config::ApiConfig;
use crate::net::api;
use crate::net::types::MlModel;
use crate::state::admin::{ModelsState, metric_label};
use crate::util::auth::SessionHandle;
use crate::util::format::format_timestamp;

#[component]
pub fn ModelsPage() -> impl IntoView {
    let config = expect_context::<ApiConfig>();
    let session = expect_context::<SessionHandle>();
    let state = RwSignal::new(ModelsState { loading: true, ..ModelsState::default() });

    let reload = {
        let config = config.clone();
        let session = session.clone();
        Callback::new(move |(): ()| {
            let config = config.clone();
            let session = session.clone();
            leptos::task::spawn_local(async move {
                match session.with_refresh(|| api::fetch_models(&config)).await {
                    Ok(overview) => state.update(|s| s.apply_overview(overview)),
                    Err(e) => {
                        log::warn!("models: fetch failed error={e}");
                        state.update(|s| {
                            s.loading = false;
                            s.message = Some("Error fetching models.".to_owned());
                        });
                    }
                }
            });
        })
    };

    Effect::new(move || reload.run(()));

    let activate = {
        let config = config.clone();
        let session = session.clone();
        Callback::new(move |model_id: i64| {
            state.update(|s| s.busy = true);
            let config = config.clone();
            let session = session.clone();
            leptos::task::spawn_local(async move {
                let result = session.with_refresh(|| api::activate_model(&config, model_id)).await;
                let message = match result {
                    Ok(()) => "Model activated successfully.",
                    Err(e) => {
                        log::warn!("models: activate failed id={model_id} error={e}");
                        "Failed to activate model."
                    }
                };
                state.update(|s| {
                    s.busy = false;
                    s.message = Some(message.to_owned());
                });
                reload.run(());
            });
        })
    };

    let on_train = move |_| {
        if state.with_untracked(|s| s.busy) {
            return;
        }
        state.update(|s| {
            s.busy = true;
            s.message = Some("Training...".to_owned());
        });
        let config = config.clone();
        let session = session.clone();
        leptos::task::spawn_local(async move {
            let result = session.with_refresh(|| api::train_model(&config)).await;
            let message = match result {
                Ok(()) => {
                    log::info!("models: training completed");
                    "Model training completed successfully."
                }
                Err(e) => {
                    log::warn!("models: training failed error={e}");
                    "Failed to train model."
                }
            };
            state.update(|s| {
                s.busy = false;
                s.message = Some(message.to_owned());
            });
            reload.run(());
        });
    };

    view! {
        <div class="models-page">
            <h1 class="models-page__title">"Панель Адміна - ML Models"</h1>
            <button class="btn models-page__train" on:click=on_train disabled=move || state.with(|s| s.busy)>
                "Навчити Нову Модель"
            </button>
            <Show when=move || state.with(|s| s.message.is_some())>
                <p class="models-page__message">{move || state.with(|s| s.message.clone().unwrap_or_default())}</p>
            </Show>
            <p class="models-page__unassociated">
                <strong>"Загальна кількість неасоційованих відгуків: "</strong>
                {move || state.with(|s| s.unassociated_reviews)}
            </p>
            <Show when=move || state.with(|s| s.loading)>
                <p>"Loading..."</p>
            </Show>
            <div class="models-page__list">
                {move || {
                    state
                        .with(|s| s.models.clone())
                        .into_iter()
                        .map(|model| model_card(model, state, activate))
                        .collect_view()
                }}
            </div>
        </div>
    }
}

fn model_card(model: MlModel, state: RwSignal<ModelsState>, on_activate: Callback<i64>) -> impl IntoView {
    let id = model.id;
    let active = model.is_active;
    let card_class = if active { "model-card model-card--active" } else { "model-card" };
    let probe = model.clone();
    view! {
        <div class=card_class>
            <p><strong>"Назва файлу: "</strong>{model.file_name}</p>
            <p><strong>"Створено: "</strong>{format_timestamp(&model.created_at)}</p>
            <p><strong>"Accuracy: "</strong>{metric_label(model.accuracy)}</p>
            <p><strong>"Precision: "</strong>{metric_label(model.precision)}</p>
            <p><strong>"Recall: "</strong>{metric_label(model.recall)}</p>
            <p><strong>"F1-Score: "</strong>{metric_label(model.f1_score)}</p>
            <p><strong>"Кількість асоційованих відгуків: "</strong>{model.associated_reviews_count}</p>
            <p><strong>"Кількість нових відгуків: "</strong>{model.new_reviews_count}</p>
            <button
                class="btn model-card__activate"
                disabled=move || !state.with(|s| s.can_activate(&probe))
                on:click=move |_| on_activate.run(id)
            >
                {if active { "Активна" } else { "Активувати" }}
            </button>
        </div>
    }
}
