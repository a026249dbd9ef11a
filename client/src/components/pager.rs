//! Previous/next pager driven by a `PageCursor`.

use leptos::prelude::*;

use crate::state::paging::PageCursor;

#[component]
pub fn Pager(#[prop(into)] cursor: Signal<PageCursor>, on_page: Callback<u32>) -> impl IntoView {
    let go = move |target: Option<u32>| {
        if let Some(page) = target {
            on_page.run(page);
        }
    };

    view! {
        <Show when=move || { let c = cursor.get(); c.has_next || c.has_previous }>
            <div class="pager">
                <button
                    class="btn pager__prev"
                    disabled=move || cursor.get().previous().is_none()
                    on:click=move |_| go(cursor.get_untracked().previous())
                >
                    "Previous"
                </button>
                <span class="pager__page">{move || format!("Page {}", cursor.get().page)}</span>
                <button
                    class="btn pager__next"
                    disabled=move || cursor.get().next().is_none()
                    on:click=move |_| go(cursor.get_untracked().next())
                >
                    "Next"
                </button>
            </div>
        </Show>
    }
}
