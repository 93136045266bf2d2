//! App shell: routing, theme, the liveness poller and the log socket.
//!
//! # Design
//! - The shell owns the socket so lines keep arriving while the status page is shown.
//! - Reconnecting is manual: bumping the attempt counter re-runs the socket effect once.
//! - The poller runs for the lifetime of the shell.

use botwatch_models::ServicesStatus;
use gloo::console;
use gloo::utils::window;
use gloo_timers::callback::Interval;
use preferences::{load_locale, load_theme, log_socket_url, persist_theme};
use routes::Route;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::Dispatch;

use crate::core::connection::DisconnectReason;
use crate::core::store::DashboardStore;
use crate::core::theme::{DARK_MODE_CLASS, ThemeMode};
use crate::features::logs::view::LogsPage;
use crate::features::status::view::StatusPage;
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use crate::services::api::ApiClient;
use crate::services::log_socket::{LogSocketCallbacks, LogSocketHandle, connect_log_socket};
use crate::services::status_poller::start_status_poller;

mod preferences;
mod routes;

#[function_component(BotwatchApp)]
fn botwatch_app() -> Html {
    let bundle = use_memo(|_| TranslationBundle::new(load_locale()), ());

    html! {
        <ContextProvider<TranslationBundle> context={(*bundle).clone()}>
            <HashRouter>
                <DashboardShell />
            </HashRouter>
        </ContextProvider<TranslationBundle>>
    }
}

#[function_component(DashboardShell)]
fn dashboard_shell() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let dispatch = Dispatch::<DashboardStore>::new();
    let theme = use_state(load_theme);
    let attempt = use_state(|| 0u32);
    let socket = use_mut_ref(|| None as Option<LogSocketHandle>);
    let poller = use_mut_ref(|| None as Option<Interval>);
    let route = use_route::<Route>().unwrap_or(Route::Status);

    {
        let theme = *theme;
        use_effect_with_deps(
            move |theme| {
                apply_theme(*theme);
                persist_theme(*theme);
                || ()
            },
            theme,
        );
    }
    {
        let dispatch = dispatch.clone();
        use_effect_with_deps(
            move |_| {
                let on_status = Callback::from(move |status: ServicesStatus| {
                    dispatch.reduce_mut(|store| store.apply_services(status));
                });
                *poller.borrow_mut() = Some(start_status_poller(ApiClient::new(""), on_status));
                move || {
                    poller.borrow_mut().take();
                }
            },
            (),
        );
    }
    {
        let dispatch = dispatch.clone();
        use_effect_with_deps(
            move |_| {
                dispatch.reduce_mut(DashboardStore::begin_connect);
                match connect_log_socket(&log_socket_url(), socket_callbacks(&dispatch)) {
                    Ok(handle) => *socket.borrow_mut() = Some(handle),
                    Err(err) => {
                        console::error!(format!("Reconnection attempt failed: {err}"));
                        dispatch.reduce_mut(|store| store.socket_lost(DisconnectReason::OpenFailed));
                    }
                }
                move || {
                    socket.borrow_mut().take();
                }
            },
            *attempt,
        );
    }

    let on_reconnect = {
        let attempt = attempt.clone();
        Callback::from(move |()| attempt.set((*attempt).wrapping_add(1)))
    };
    let on_toggle_theme = {
        let theme = theme.clone();
        Callback::from(move |event: Event| {
            let checked = event.target_unchecked_into::<HtmlInputElement>().checked();
            theme.set(ThemeMode::from_checked(checked));
        })
    };

    html! {
        <div class="app">
            <header class="app-header">
                <nav>
                    {nav_link(Route::Status, bundle.text("nav.status", "Status"), &route)}
                    {nav_link(Route::Logs, bundle.text("nav.logs", "Logs"), &route)}
                </nav>
                <label class="switch" title={bundle.text("nav.dark_mode", "Dark mode")}>
                    <input
                        type="checkbox"
                        id="dark-mode-toggle"
                        checked={theme.is_dark()}
                        onchange={on_toggle_theme}
                    />
                    <span class="slider"></span>
                </label>
            </header>
            <main>
                <Switch<Route> render={move |route| match route {
                    Route::Status => html! { <StatusPage /> },
                    Route::Logs => html! { <LogsPage on_reconnect={on_reconnect.clone()} /> },
                    Route::NotFound => html! { <Redirect<Route> to={Route::Status} /> },
                }} />
            </main>
        </div>
    }
}

fn socket_callbacks(dispatch: &Dispatch<DashboardStore>) -> LogSocketCallbacks {
    let on_open = {
        let dispatch = dispatch.clone();
        Callback::from(move |()| dispatch.reduce_mut(DashboardStore::socket_opened))
    };
    let on_line = {
        let dispatch = dispatch.clone();
        Callback::from(move |line: String| dispatch.reduce_mut(|store| store.line_received(line)))
    };
    let on_close = {
        let dispatch = dispatch.clone();
        Callback::from(move |()| {
            dispatch.reduce_mut(|store| store.socket_lost(DisconnectReason::Closed));
        })
    };
    let on_error = {
        let dispatch = dispatch.clone();
        Callback::from(move |()| {
            dispatch.reduce_mut(|store| store.socket_lost(DisconnectReason::Error));
        })
    };
    LogSocketCallbacks {
        on_open,
        on_line,
        on_close,
        on_error,
    }
}

fn nav_link(target: Route, label: String, current: &Route) -> Html {
    let classes = classes!("nav-link", (&target == current).then_some("active"));
    html! {
        <Link<Route> to={target} classes={classes}>{label}</Link<Route>>
    }
}

fn apply_theme(theme: ThemeMode) {
    if let Some(body) = window().document().and_then(|document| document.body()) {
        let classes = body.class_list();
        let applied = match theme.body_class() {
            Some(class) => classes.add_1(class),
            None => classes.remove_1(DARK_MODE_CLASS),
        };
        if applied.is_err() {
            console::warn!("Could not update the dark-mode body class");
        }
    }
}

/// Mount the dashboard into `#root` (or `<body>` when absent).
pub fn run_app() {
    console_error_panic_hook::set_once();
    if let Some(root) = gloo::utils::document().get_element_by_id("root") {
        yew::Renderer::<BotwatchApp>::with_root(root).render();
    } else {
        yew::Renderer::<BotwatchApp>::new().render();
    }
}
