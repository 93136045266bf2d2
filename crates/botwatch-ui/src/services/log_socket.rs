//! Log websocket connector.
//!
//! # Design
//! - One socket per handle; reconnecting is the caller's decision.
//! - The handle owns the JS closures and closes the socket when dropped.
//! - Keep the API surface minimal: open, line, close and error callbacks.

use std::fmt;

use gloo::console;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{CloseEvent, Event, MessageEvent, WebSocket};
use yew::Callback;

/// Callbacks fired by the socket.
#[derive(Clone)]
pub(crate) struct LogSocketCallbacks {
    pub(crate) on_open: Callback<()>,
    pub(crate) on_line: Callback<String>,
    pub(crate) on_close: Callback<()>,
    pub(crate) on_error: Callback<()>,
}

/// The browser refused to construct the socket (bad URL, blocked scheme).
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct LogSocketError {
    pub(crate) url: String,
    pub(crate) message: String,
}

impl fmt::Display for LogSocketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not open {}: {}", self.url, self.message)
    }
}

/// Open socket plus the closures it calls into.
pub(crate) struct LogSocketHandle {
    socket: WebSocket,
    _on_open: Closure<dyn FnMut(Event)>,
    _on_message: Closure<dyn FnMut(MessageEvent)>,
    _on_close: Closure<dyn FnMut(CloseEvent)>,
    _on_error: Closure<dyn FnMut(Event)>,
}

impl Drop for LogSocketHandle {
    fn drop(&mut self) {
        self.socket.set_onopen(None);
        self.socket.set_onmessage(None);
        self.socket.set_onclose(None);
        self.socket.set_onerror(None);
        let _ = self.socket.close();
    }
}

/// Open a socket to `url` and route its events to `callbacks`.
pub(crate) fn connect_log_socket(
    url: &str,
    callbacks: LogSocketCallbacks,
) -> Result<LogSocketHandle, LogSocketError> {
    let socket = WebSocket::new(url).map_err(|err| LogSocketError {
        url: url.to_string(),
        message: describe(&err),
    })?;

    let on_open = {
        let callback = callbacks.on_open;
        Closure::<dyn FnMut(Event)>::new(move |_event: Event| callback.emit(()))
    };
    let on_message = {
        let callback = callbacks.on_line;
        Closure::<dyn FnMut(MessageEvent)>::new(move |event: MessageEvent| {
            if let Some(line) = event.data().as_string() {
                callback.emit(line);
            }
        })
    };
    let on_close = {
        let callback = callbacks.on_close;
        Closure::<dyn FnMut(CloseEvent)>::new(move |_event: CloseEvent| callback.emit(()))
    };
    let on_error = {
        let callback = callbacks.on_error;
        Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            console::error!("Log socket error:", event);
            callback.emit(());
        })
    };

    socket.set_onopen(Some(on_open.as_ref().unchecked_ref()));
    socket.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
    socket.set_onclose(Some(on_close.as_ref().unchecked_ref()));
    socket.set_onerror(Some(on_error.as_ref().unchecked_ref()));

    Ok(LogSocketHandle {
        socket,
        _on_open: on_open,
        _on_message: on_message,
        _on_close: on_close,
        _on_error: on_error,
    })
}

fn describe(err: &JsValue) -> String {
    err.as_string()
        .or_else(|| {
            err.dyn_ref::<js_sys::Error>()
                .map(|error| String::from(error.message()))
        })
        .unwrap_or_else(|| format!("{err:?}"))
}
