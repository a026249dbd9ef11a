//! Username/password login page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Submits through `SessionHandle::login` and follows the returned
//! `Navigate` target. The form stays disabled until startup hydration has
//! finished, since the store refuses logins while initializing.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::error::SessionError;
use crate::util::auth::SessionHandle;

/// Trimmed username and raw password, or the message to show.
fn validate_login_input(username: &str, password: &str) -> Result<(String, String), &'static str> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err("Enter both username and password.");
    }
    Ok((username.to_owned(), password.to_owned()))
}

fn login_error_message(error: &SessionError) -> String {
    match error {
        SessionError::AuthFailure => "Invalid username or password.".to_owned(),
        SessionError::Initializing => "Still restoring your session, try again in a moment.".to_owned(),
        SessionError::Superseded => "Signed out while logging in, please try again.".to_owned(),
        SessionError::SessionExpired | SessionError::TransientNetwork(_) => format!("Login failed: {error}"),
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<SessionHandle>();
    let state = session.state;
    let navigate = use_navigate();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() || state.get_untracked().initializing {
            return;
        }
        let (user, pass) = match validate_login_input(&username.get(), &password.get()) {
            Ok(input) => input,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Signing in...".to_owned());

        let session = session.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match session.login(&user, &pass).await {
                Ok(target) => {
                    password.set(String::new());
                    info.set(String::new());
                    busy.set(false);
                    navigate(target.path(), NavigateOptions::default());
                }
                Err(e) => {
                    log::info!("login: failed user={user} error={e}");
                    info.set(login_error_message(&e));
                    busy.set(false);
                }
            }
        });
    };

    let disabled = move || busy.get() || state.get().initializing;

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"ReviewHub"</h1>
                <p class="login-card__subtitle">"Sign in"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        autocomplete="username"
                        placeholder="Username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        autocomplete="current-password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=disabled>
                        {move || if state.get().initializing { "Loading..." } else { "Sign In" }}
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
