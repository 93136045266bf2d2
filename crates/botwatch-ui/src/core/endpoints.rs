//! Endpoint construction from the page location.

use botwatch_models::WEBSOCKET_PATH;

/// Websocket URL on the page's own host: `wss` under `https:`, `ws` otherwise.
///
/// `port` is the raw `location.port` value; it is appended only when non-empty.
#[must_use]
pub fn websocket_url(protocol: &str, hostname: &str, port: &str) -> String {
    let scheme = if protocol == "https:" { "wss" } else { "ws" };
    let mut url = format!("{scheme}://{hostname}");
    if !port.is_empty() {
        url.push(':');
        url.push_str(port);
    }
    url.push_str(WEBSOCKET_PATH);
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secure_pages_use_wss() {
        assert_eq!(
            websocket_url("https:", "bot.example", ""),
            "wss://bot.example/websocket"
        );
    }

    #[test]
    fn explicit_port_is_kept() {
        assert_eq!(
            websocket_url("http:", "localhost", "8000"),
            "ws://localhost:8000/websocket"
        );
    }

    #[test]
    fn unknown_protocols_fall_back_to_ws() {
        assert_eq!(websocket_url("file:", "", ""), "ws:///websocket");
    }
}
