//! Route pages. Only the login page has behavior of its own; the rest of
//! the picture-library pages are mounted as placeholders.

pub mod login;

use leptos::prelude::*;

use crate::router::AppRoute;

/// Stand-in body for a route whose page lives outside this crate.
#[component]
pub fn PagePlaceholder(route: AppRoute) -> impl IntoView {
    view! {
        <section class="page" data-path=route.path>
            <h2>{route.title}</h2>
        </section>
    }
}
