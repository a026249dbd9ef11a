//! Route wrapper that renders its children only when the guard allows.
//!
//! SYSTEM CONTEXT
//! ==============
//! Wraps role-gated routes in `App`. While the session is still hydrating
//! the wrapper shows a placeholder and never redirects, so a returning user
//! is not bounced to `/login` on reload.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::auth::Role;
use crate::util::auth::{SessionHandle, install_guard_redirect};
use crate::util::guard::{GuardOutcome, evaluate};

#[component]
pub fn ProtectedRoute(
    /// Role the route requires; any authenticated user when omitted.
    #[prop(optional)]
    role: Option<Role>,
    children: ChildrenFn,
) -> impl IntoView {
    let state = expect_context::<SessionHandle>().state;
    let navigate = use_navigate();
    install_guard_redirect(state, role, move |path, options| navigate(path, options));

    let outcome = Memo::new(move |_| evaluate(role, &state.get()));

    view! {
        <Show
            when=move || outcome.get() == GuardOutcome::Allow
            fallback=move || {
                view! {
                    <div class="guard-placeholder">
                        <p>
                            {move || {
                                if outcome.get() == GuardOutcome::Loading { "Loading..." } else { "Redirecting..." }
                            }}
                        </p>
                    </div>
                }
            }
        >
            {children()}
        </Show>
    }
}
