//! Login page: account + password, then forward to the `redirect` target.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::app::AppSession;
use crate::router::redirect_target;

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<Arc<AppSession>>();
    let location = use_location();
    let navigate = use_navigate();

    let account = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let forward_to = RwSignal::new(None::<String>);

    Effect::new(move || {
        if let Some(target) = forward_to.get() {
            forward_to.set(None);
            navigate(&target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let account_value = account.get().trim().to_owned();
        let password_value = password.get();
        if account_value.is_empty() || password_value.is_empty() {
            info.set("Enter both account and password.".to_owned());
            return;
        }
        busy.set(true);
        info.set("Logging in...".to_owned());

        let session = session.clone();
        let search = location.search.get_untracked();
        leptos::task::spawn_local(async move {
            match session.login(&account_value, &password_value).await {
                Ok(_) => {
                    let origin = session.source().browser().origin();
                    forward_to.set(Some(redirect_target(&search, &origin)));
                }
                Err(e) => info.set(format!("Login failed: {e}")),
            }
            busy.set(false);
        });
    };

    view! {
        <div class="login-page">
            <h2>"User Login"</h2>
            <form class="login-form" on:submit=on_submit>
                <input
                    class="login-input"
                    type="text"
                    placeholder="Account"
                    prop:value=move || account.get()
                    on:input=move |ev| account.set(event_target_value(&ev))
                />
                <input
                    class="login-input"
                    type="password"
                    placeholder="Password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <button class="login-button" type="submit" disabled=move || busy.get()>
                    "Log in"
                </button>
            </form>
            <p class="login-info">{move || info.get()}</p>
        </div>
    }
}
