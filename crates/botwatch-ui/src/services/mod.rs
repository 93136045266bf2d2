//! Browser transports: the liveness poll and the log websocket.

pub(crate) mod api;
pub(crate) mod log_socket;
pub(crate) mod status_poller;
