//! Live log streaming endpoint.
//!
//! # Design
//! - Replay the relay history first, then forward live lines as text frames.
//! - A lagging client is told how many lines it missed and keeps streaming.
//! - Client frames are ignored apart from close; the stream is push-only.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use botwatch_models::LogLevel;
use botwatch_telemetry::{LogRelay, LogSubscription};
use futures_util::{Sink, SinkExt, Stream, StreamExt};
use tokio::sync::broadcast::error::RecvError;
use tracing::debug;

use crate::http::state::DashboardState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StreamEnd {
    ClientGone,
    RelayClosed,
}

pub(crate) async fn stream_logs(
    ws: WebSocketUpgrade,
    State(state): State<Arc<DashboardState>>,
) -> Response {
    let relay = state.relay.clone();
    ws.on_upgrade(move |socket| serve_socket(socket, relay))
}

async fn serve_socket(socket: WebSocket, relay: LogRelay) {
    let subscription = relay.subscribe();
    debug!(
        backlog = subscription.backlog.len(),
        "dashboard log client connected"
    );
    let (mut outgoing, mut incoming) = socket.split();
    let end = tokio::select! {
        end = pump_lines(&mut outgoing, subscription) => end,
        () = wait_for_close(&mut incoming) => StreamEnd::ClientGone,
    };
    debug!(?end, "dashboard log client disconnected");
}

async fn pump_lines<S>(sink: &mut S, subscription: LogSubscription) -> StreamEnd
where
    S: Sink<Message> + Unpin,
{
    let LogSubscription {
        backlog,
        mut receiver,
    } = subscription;
    for line in backlog {
        if sink.send(Message::Text(line.into())).await.is_err() {
            return StreamEnd::ClientGone;
        }
    }
    loop {
        let line = match receiver.recv().await {
            Ok(line) => line,
            Err(RecvError::Lagged(count)) => lagged_notice(count),
            Err(RecvError::Closed) => return StreamEnd::RelayClosed,
        };
        if sink.send(Message::Text(line.into())).await.is_err() {
            return StreamEnd::ClientGone;
        }
    }
}

async fn wait_for_close<S, E>(incoming: &mut S)
where
    S: Stream<Item = Result<Message, E>> + Unpin,
{
    while let Some(frame) = incoming.next().await {
        if matches!(frame, Ok(Message::Close(_)) | Err(_)) {
            return;
        }
    }
}

fn lagged_notice(count: u64) -> String {
    format!(
        "{} log stream lagged; dropped {count} lines",
        LogLevel::Warn.prefix()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;

    fn texts(frames: &[Message]) -> Vec<String> {
        frames
            .iter()
            .filter_map(|frame| match frame {
                Message::Text(text) => Some(text.as_str().to_string()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn lagged_notice_is_a_warning_line() {
        let notice = lagged_notice(3);
        assert_eq!(notice, "[WAR] log stream lagged; dropped 3 lines");
        assert_eq!(LogLevel::from_line(&notice), Some(LogLevel::Warn));
    }

    #[tokio::test]
    async fn backlog_is_sent_before_live_lines() {
        let relay = LogRelay::new(4);
        relay.publish("[INF] - booted");
        let subscription = relay.subscribe();
        relay.publish("[ERR] - failed");
        drop(relay);

        let mut frames: Vec<Message> = Vec::new();
        let end = pump_lines(&mut frames, subscription).await;
        assert_eq!(end, StreamEnd::RelayClosed);
        assert_eq!(texts(&frames), vec!["[INF] - booted", "[ERR] - failed"]);
    }

    #[tokio::test]
    async fn lagging_client_gets_notice_and_keeps_streaming() {
        let relay = LogRelay::new(0);
        let subscription = relay.subscribe();
        for idx in 0..1030 {
            relay.publish(format!("[DEB] line {idx}"));
        }
        drop(relay);

        let mut frames: Vec<Message> = Vec::new();
        let end = pump_lines(&mut frames, subscription).await;
        assert_eq!(end, StreamEnd::RelayClosed);
        let lines = texts(&frames);
        assert_eq!(lines[0], "[WAR] log stream lagged; dropped 6 lines");
        assert_eq!(lines.len(), 1025);
        assert_eq!(lines.last().map(String::as_str), Some("[DEB] line 1029"));
    }

    #[tokio::test]
    async fn close_frame_ends_the_read_side() {
        let mut incoming = stream::iter(vec![
            Ok::<_, std::io::Error>(Message::Text("ping".into())),
            Ok(Message::Close(None)),
            Ok(Message::Text("ignored".into())),
        ]);
        wait_for_close(&mut incoming).await;
        assert!(incoming.next().await.is_some());
    }
}
