//! Logs page view.
//!
//! # Design
//! - Every received line stays in the DOM; filtered lines get `display: none`
//!   so toggling a checkbox never re-requests anything.
//! - Follow new lines only while pinned to the bottom.
//! - Opening the page runs a short burst of follow-up scrolls.

use botwatch_models::LogLevel;
use gloo_timers::future::TimeoutFuture;
use web_sys::{Element, HtmlInputElement};
use yew::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

use crate::core::connection::ConnectionState;
use crate::core::filters::LevelFilter;
use crate::core::log_buffer::LogEntry;
use crate::core::scroll::{BURST_INTERVAL_MS, BurstTick, ScrollBurst, is_at_bottom};
use crate::core::store::DashboardStore;
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};

#[derive(Properties, PartialEq)]
pub(crate) struct LogsPageProps {
    pub(crate) on_reconnect: Callback<()>,
}

#[function_component(LogsPage)]
pub(crate) fn logs_page(props: &LogsPageProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let dispatch = Dispatch::<DashboardStore>::new();
    let connection = use_selector(|store: &DashboardStore| store.connection);
    let filter = use_selector(|store: &DashboardStore| store.filter);
    let expanded = use_selector(|store: &DashboardStore| store.header_expanded);
    let logs = use_selector(|store: &DashboardStore| store.logs.clone());
    let pinned = use_selector(|store: &DashboardStore| store.scroll.is_pinned());
    let container = use_node_ref();

    {
        let container = container.clone();
        use_effect_with_deps(
            move |(_, pinned)| {
                if *pinned {
                    scroll_to_bottom(&container);
                }
                || ()
            },
            (logs.clone(), *pinned),
        );
    }
    {
        let container = container.clone();
        let dispatch = dispatch.clone();
        use_effect_with_deps(
            move |_| {
                scroll_to_bottom(&container);
                yew::platform::spawn_local(async move {
                    let mut burst = ScrollBurst::default();
                    while !burst.is_finished() {
                        TimeoutFuture::new(BURST_INTERVAL_MS).await;
                        match burst.tick(dispatch.get().scroll) {
                            BurstTick::Scroll => scroll_to_bottom(&container),
                            BurstTick::Skip | BurstTick::Finished => {}
                        }
                    }
                });
                || ()
            },
            (),
        );
    }

    let onscroll = {
        let container = container.clone();
        let dispatch = dispatch.clone();
        Callback::from(move |_: Event| {
            let Some(element) = container.cast::<Element>() else {
                return;
            };
            let (top, client, height) = (
                element.scroll_top(),
                element.client_height(),
                element.scroll_height(),
            );
            if dispatch.get().scroll.is_pinned() != is_at_bottom(top, client, height) {
                dispatch.reduce_mut(|store| store.scroll.observe(top, client, height));
            }
        })
    };
    let on_scroll_bottom = {
        let container = container.clone();
        let dispatch = dispatch.clone();
        Callback::from(move |_: MouseEvent| {
            dispatch.reduce_mut(|store| store.scroll.pin());
            scroll_to_bottom(&container);
        })
    };
    let on_toggle_header = {
        let dispatch = dispatch.clone();
        Callback::from(move |_: MouseEvent| dispatch.reduce_mut(DashboardStore::toggle_header))
    };
    let on_reconnect = {
        let on_reconnect = props.on_reconnect.clone();
        Callback::from(move |_: MouseEvent| on_reconnect.emit(()))
    };

    let shown = logs.visible(&filter).count();
    let header_classes = classes!("logs-header", (*expanded).then_some("expanded"));

    html! {
        <section id="logs-page" class="page active">
            {connection_bar(&bundle, *connection, on_reconnect)}
            <div id="logs-content" class="logs-content" ref={container} onscroll={onscroll}>
                <div id="logs-header" class={header_classes}>
                    <button
                        id="toggle-logs-header"
                        class="toggle-logs-header-btn"
                        title={bundle.text("logs.toggle_options", "Show or hide log options")}
                        onclick={on_toggle_header}
                    >
                        <span class="arrow-down"></span>
                    </button>
                    <div id="logs-options" class="logs-options">
                        {for LogLevel::all().into_iter().map(|level| level_checkbox(&bundle, &dispatch, *filter, level))}
                    </div>
                    <span class="logs-count">
                        {bundle.format(
                            "logs.shown",
                            "{shown} of {total} lines shown",
                            &[("shown", shown.to_string()), ("total", logs.len().to_string())],
                        )}
                    </span>
                </div>
                <div id="actual-logs" class="actual-logs">
                    {if logs.is_empty() {
                        html! { <p class="placeholder">{bundle.text("logs.empty", "No log lines yet.")}</p> }
                    } else {
                        html! { {for logs.entries().map(|entry| render_entry(entry, &filter))} }
                    }}
                </div>
                <button
                    id="scroll-to-bottom"
                    class="scroll-to-bottom-btn"
                    title={bundle.text("logs.scroll_bottom", "Scroll to bottom")}
                    onclick={on_scroll_bottom}
                >
                    <span class="arrow-down"></span>
                </button>
            </div>
        </section>
    }
}

fn connection_bar(
    bundle: &TranslationBundle,
    connection: ConnectionState,
    on_reconnect: Callback<MouseEvent>,
) -> Html {
    let label = connection
        .label_key()
        .map(|key| bundle.text(key, ""))
        .unwrap_or_default();
    let status = connection
        .status_key()
        .map(|key| bundle.text(key, ""))
        .unwrap_or_default();
    html! {
        <div class="connection-bar">
            if connection.shows_spinner() {
                <div id="loading" class="loading" title={bundle.text("connection.loading", "Connecting...")}></div>
            }
            <span id="connected">{label}</span>
            if connection.shows_reconnect() {
                <button id="reconnect-button" onclick={on_reconnect}>
                    {bundle.text("connection.reconnect", "Reconnect")}
                </button>
            }
            <span id="reconnect-status">{status}</span>
        </div>
    }
}

fn level_checkbox(
    bundle: &TranslationBundle,
    dispatch: &Dispatch<DashboardStore>,
    filter: LevelFilter,
    level: LogLevel,
) -> Html {
    let onchange = {
        let dispatch = dispatch.clone();
        Callback::from(move |event: Event| {
            let checked = event.target_unchecked_into::<HtmlInputElement>().checked();
            dispatch.reduce_mut(|store| store.set_level_visible(level, checked));
        })
    };
    let key = format!("levels.{}", level.label().to_ascii_lowercase());
    html! {
        <label key={level.css_class()}>
            <input
                type="checkbox"
                id={format!("show-{}", level.label().to_ascii_lowercase())}
                checked={filter.is_enabled(level)}
                onchange={onchange}
            />
            {format!(" {}", bundle.text(&key, level.label()))}
        </label>
    }
}

fn render_entry(entry: &LogEntry, filter: &LevelFilter) -> Html {
    let style = (!filter.allows(entry.level)).then_some("display: none");
    html! {
        <p key={entry.id} class={entry.css_classes()} style={style}>{entry.text.to_string()}</p>
    }
}

fn scroll_to_bottom(container: &NodeRef) {
    if let Some(element) = container.cast::<Element>() {
        element.set_scroll_top(element.scroll_height());
    }
}
