//! Root component, route table and SSR document shell.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` builds the one `SessionStore` for the page and provides it, the API
//! config and the shared search state as context. In the browser it starts
//! session hydration once; everything behind `ProtectedRoute` waits for it.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Title, provide_meta_context};
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::components::header::Header;
use crate::components::protected_route::ProtectedRoute;
use crate::config::ApiConfig;
use crate::net::auth::HttpAuthBackend;
use crate::pages::admin::AdminPage;
use crate::pages::home::HomePage;
use crate::pages::login::LoginPage;
use crate::pages::models::ModelsPage;
use crate::pages::not_found::NotFoundPage;
use crate::pages::product::ProductPage;
use crate::state::auth::Role;
use crate::state::search::SearchState;
use crate::state::session::SessionStore;
use crate::util::auth::SessionHandle;
use crate::util::storage::BrowserCredentialStore;

/// HTML document rendered by the SSR host around `App`.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="uk">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ApiConfig::from_build_env();
    let store = SessionStore::new(HttpAuthBackend::new(config.clone()), BrowserCredentialStore);
    let session = SessionHandle::new(store);

    provide_context(config);
    provide_context(session.clone());
    provide_context(RwSignal::new(SearchState::default()));

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let outcome = session.hydrate().await;
        log::info!("session: startup hydrate outcome={outcome:?}");
    });

    view! {
        <Title text="ReviewHub"/>
        <Router>
            <Header/>
            <main class="app-main">
                <Routes fallback=|| view! { <NotFoundPage/> }>
                    <Route path=path!("/") view=HomePage/>
                    <Route path=path!("/login") view=LoginPage/>
                    <Route path=path!("/product/:id") view=ProductPage/>
                    <Route
                        path=path!("/admin")
                        view=|| view! { <ProtectedRoute role=Role::Admin><AdminPage/></ProtectedRoute> }
                    />
                    <Route
                        path=path!("/admin/models")
                        view=|| view! { <ProtectedRoute role=Role::Admin><ModelsPage/></ProtectedRoute> }
                    />
                </Routes>
            </main>
        </Router>
    }
}
