//! Log relay for dashboard socket consumers.
//!
//! # Design
//! - Reuse the formatted log output to avoid duplicating formatting logic.
//! - Keep a bounded history so a fresh client sees recent context first.
//! - Snapshot the history and subscribe under one lock so no line is lost or repeated.
//! - Keep the writer lightweight and non-blocking for the hot logging path.

use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast;
use tracing_subscriber::fmt::MakeWriter;

/// Number of lines replayed to a newly connected client by default.
pub const DEFAULT_HISTORY_CAPACITY: usize = 1000;

const LOG_STREAM_CAPACITY: usize = 1024;

/// Shared history plus live fan-out of formatted log lines.
#[derive(Clone)]
pub struct LogRelay {
    inner: Arc<RelayInner>,
}

struct RelayInner {
    history: Mutex<VecDeque<String>>,
    capacity: usize,
    sender: broadcast::Sender<String>,
}

/// Backlog captured at subscription time plus the live receiver.
pub struct LogSubscription {
    /// Lines published before the subscription, oldest first.
    pub backlog: Vec<String>,
    /// Lines published after the subscription.
    pub receiver: broadcast::Receiver<String>,
}

impl LogRelay {
    /// Build a relay that retains at most `history_capacity` lines.
    #[must_use]
    pub fn new(history_capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(LOG_STREAM_CAPACITY);
        Self {
            inner: Arc::new(RelayInner {
                history: Mutex::new(VecDeque::with_capacity(
                    history_capacity.min(LOG_STREAM_CAPACITY),
                )),
                capacity: history_capacity,
                sender,
            }),
        }
    }

    /// Record a line and forward it to live subscribers. Empty lines are dropped.
    pub fn publish(&self, line: impl Into<String>) {
        let line = line.into();
        if line.is_empty() {
            return;
        }
        let mut history = self.history();
        if self.inner.capacity > 0 {
            while history.len() >= self.inner.capacity {
                history.pop_front();
            }
            history.push_back(line.clone());
        }
        let _ = self.inner.sender.send(line);
    }

    /// Capture the current history and subscribe to subsequent lines.
    #[must_use]
    pub fn subscribe(&self) -> LogSubscription {
        let history = self.history();
        let receiver = self.inner.sender.subscribe();
        LogSubscription {
            backlog: history.iter().cloned().collect(),
            receiver,
        }
    }

    /// Number of lines currently retained.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history().len()
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.sender.receiver_count()
    }

    /// `tracing_subscriber` writer that feeds complete lines into this relay.
    #[must_use]
    pub fn make_writer(&self) -> LogStreamMakeWriter {
        LogStreamMakeWriter {
            relay: self.clone(),
        }
    }

    fn history(&self) -> MutexGuard<'_, VecDeque<String>> {
        self.inner
            .history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// `MakeWriter` handing out per-event relay writers.
#[derive(Clone)]
pub struct LogStreamMakeWriter {
    relay: LogRelay,
}

impl<'a> MakeWriter<'a> for LogStreamMakeWriter {
    type Writer = LogStreamWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogStreamWriter {
            relay: self.relay.clone(),
            buffer: Vec::new(),
        }
    }
}

/// Writer that collects one formatted event and publishes it as a single line on drop.
///
/// Multi-line events (tracebacks, nested `Debug` output) stay in one frame so
/// the severity prefix classifies the whole message.
pub struct LogStreamWriter {
    relay: LogRelay,
    buffer: Vec<u8>,
}

impl Write for LogStreamWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for LogStreamWriter {
    fn drop(&mut self) {
        let event = String::from_utf8_lossy(&self.buffer);
        let event = trim_line_ending(&event);
        if !event.is_empty() {
            self.relay.publish(event);
        }
    }
}

fn trim_line_ending(event: &str) -> &str {
    let event = event.strip_suffix('\n').unwrap_or(event);
    event.strip_suffix('\r').unwrap_or(event)
}
