//! Root application component with routing, the access gate, and context
//! providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
    hooks::{use_location, use_navigate},
};

use crate::config::ClientConfig;
use crate::net::http::HttpClient;
use crate::net::transport::FetchTransport;
use crate::net::types::LoginUser;
use crate::pages::{PagePlaceholder, login::LoginPage};
use crate::router::guard::NavigationGuard;
use crate::router::{ADD_PICTURE, ADMIN_PICTURE_MANAGE, ADMIN_USER_MANAGE, HOME, USER_LOGIN, USER_REGISTER, route_title};
use crate::state::notice::{Notice, NoticeLevel, NoticeState};
use crate::state::session::SessionStore;
use crate::util::browser::{Browser, WindowBrowser};
use crate::util::guard::{full_path, install_navigation_guard};

pub type AppClient = HttpClient<FetchTransport, WindowBrowser>;
pub type AppSession = SessionStore<AppClient>;
pub type AppGuard = NavigationGuard<AppClient>;

/// Root application component.
///
/// Builds the session store, HTTP client and guard once per page session and
/// provides them to every route.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = Arc::new(ClientConfig::from_build_env().unwrap_or_else(|e| {
        log::warn!("invalid build-time config, using defaults: {e}");
        ClientConfig::default()
    }));
    let notices = RwSignal::new(NoticeState::default());
    let login_user = RwSignal::new(LoginUser::anonymous());

    let client = HttpClient::new(config.clone(), FetchTransport, WindowBrowser::new(notices));
    let session = Arc::new(SessionStore::new(client));
    session.subscribe(move |user| login_user.set(user.clone()));
    let guard = Arc::new(NavigationGuard::from_config(session.clone(), &config));

    provide_context(session);
    provide_context(guard);
    provide_context(login_user);
    provide_context(notices);

    view! {
        <Title text="Cloud Gallery"/>

        <Router>
            <GlobalHeader/>
            <NoticeList/>
            <GuardGate>
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=|| view! { <PagePlaceholder route=HOME/> }/>
                    <Route path=(StaticSegment("user"), StaticSegment("login")) view=LoginPage/>
                    <Route
                        path=(StaticSegment("user"), StaticSegment("register"))
                        view=|| view! { <PagePlaceholder route=USER_REGISTER/> }
                    />
                    <Route
                        path=(StaticSegment("admin"), StaticSegment("userManage"))
                        view=|| view! { <PagePlaceholder route=ADMIN_USER_MANAGE/> }
                    />
                    <Route
                        path=(StaticSegment("admin"), StaticSegment("pictureManage"))
                        view=|| view! { <PagePlaceholder route=ADMIN_PICTURE_MANAGE/> }
                    />
                    <Route
                        path=StaticSegment("add_picture")
                        view=|| view! { <PagePlaceholder route=ADD_PICTURE/> }
                    />
                </Routes>
            </GuardGate>
        </Router>
    }
}

/// Renders `children` only once the guard has cleared the current location.
#[component]
fn GuardGate(children: ChildrenFn) -> impl IntoView {
    let guard = expect_context::<Arc<AppGuard>>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let location = use_location();
    let cleared = install_navigation_guard(guard, notices, use_navigate());

    let is_cleared = move || {
        let current = full_path(&location.pathname.get(), &location.search.get());
        cleared.get().as_deref() == Some(current.as_str())
    };

    view! {
        <Show when=is_cleared>
            {children()}
        </Show>
    }
}

/// Title bar with the current identity and a login/logout control.
#[component]
fn GlobalHeader() -> impl IntoView {
    let session = expect_context::<Arc<AppSession>>();
    let login_user = expect_context::<RwSignal<LoginUser>>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let location = use_location();

    let title = move || route_title(&location.pathname.get()).unwrap_or("Cloud Gallery");
    let signed_in = move || !login_user.get().is_anonymous();

    let on_logout = move |_: leptos::ev::MouseEvent| {
        let session = session.clone();
        leptos::task::spawn_local(async move {
            match session.logout().await {
                Ok(()) => session.source().browser().hard_navigate(USER_LOGIN.path),
                Err(e) => notices.update(|state| {
                    state.push(Notice::error(format!("Logout failed: {e}")));
                }),
            }
        });
    };

    view! {
        <header class="global-header">
            <span class="global-header__title">{title}</span>
            <Show
                when=signed_in
                fallback=|| view! { <a href=USER_LOGIN.path class="global-header__login">"Log in"</a> }
            >
                <span class="global-header__user">{move || login_user.get().user_name}</span>
                <button class="global-header__logout" on:click=on_logout.clone()>
                    "Log out"
                </button>
            </Show>
        </header>
    }
}

/// Stack of pending notices; clicking one dismisses it.
#[component]
fn NoticeList() -> impl IntoView {
    let notices = expect_context::<RwSignal<NoticeState>>();

    view! {
        <div class="notice-list">
            <For
                each=move || notices.get().items
                key=|(id, _)| *id
                children=move |(id, notice): (u64, Notice)| {
                    let class = match notice.level {
                        NoticeLevel::Info => "notice notice--info",
                        NoticeLevel::Warning => "notice notice--warning",
                        NoticeLevel::Error => "notice notice--error",
                    };
                    view! {
                        <div class=class on:click=move |_| notices.update(|state| {
                            state.dismiss(id);
                        })>
                            {notice.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
