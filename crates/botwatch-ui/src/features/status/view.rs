//! Status page view.

use botwatch_models::status_word;
use yew::prelude::*;
use yewdux::prelude::use_selector;

use crate::core::store::DashboardStore;
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};

#[function_component(StatusPage)]
pub(crate) fn status_page() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let services = use_selector(|store: &DashboardStore| store.services.clone());

    let body = match services.as_ref() {
        None => html! {
            <p class="placeholder">{bundle.text("status.waiting", "Waiting for the first status update...")}</p>
        },
        Some(status) if status.is_empty() => html! {
            <p class="placeholder">{bundle.text("status.empty", "No services registered.")}</p>
        },
        Some(status) => html! {
            <>
                {for status.lines().map(|(name, alive)| html! {
                    <p key={name.to_string()} class={classes!("service", if alive { "alive" } else { "dead" })}>
                        {format!("{name}: {}", status_word(alive))}
                    </p>
                })}
            </>
        },
    };

    html! {
        <section id="status-page" class="page active">
            <h2>{bundle.text("status.title", "Service status")}</h2>
            <div id="service-status">{body}</div>
        </section>
    }
}
