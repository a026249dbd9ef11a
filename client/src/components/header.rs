//! Top navigation bar with session controls.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::state::auth::Role;
use crate::util::auth::SessionHandle;

#[component]
pub fn Header() -> impl IntoView {
    let session = expect_context::<SessionHandle>();
    let state = session.state;
    let navigate = use_navigate();

    // Click handlers inside `Show` must be `Send`; the navigate closure is
    // not, so logout runs from an effect.
    let logout_requested = RwSignal::new(false);
    Effect::new(move || {
        if !logout_requested.get() {
            return;
        }
        logout_requested.set(false);
        let target = session.logout();
        log::info!("header: logged out");
        navigate(target.path(), NavigateOptions::default());
    });

    let is_admin = move || state.get().role() == Some(Role::Admin);
    let who = move || {
        state
            .get()
            .identity
            .map(|identity| identity.display_name())
            .unwrap_or_default()
    };

    view! {
        <nav class="app-header">
            <ul class="app-header__links">
                <li>
                    <A href="/">"Home"</A>
                </li>
                <li>
                    <A href="/admin">"Admin Panel"</A>
                </li>
                <Show when=is_admin>
                    <li>
                        <A href="/admin/models">"Models"</A>
                    </li>
                </Show>
            </ul>
            <div class="app-header__session">
                <Show
                    when=move || state.get().is_authenticated()
                    fallback=move || {
                        view! {
                            <Show when=move || !state.get().initializing>
                                <A href="/login">"Login"</A>
                            </Show>
                        }
                    }
                >
                    <span class="app-header__user">{who}</span>
                    <button class="btn app-header__logout" on:click=move |_| logout_requested.set(true)>
                        "Logout"
                    </button>
                </Show>
            </div>
        </nav>
    }
}
