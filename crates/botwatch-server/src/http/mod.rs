//! HTTP surface: page assets, the liveness endpoint, and the log socket.

/// Router construction and server host.
pub mod router;
/// Log streaming over websockets.
pub(crate) mod socket;
/// Shared handler state.
pub mod state;
/// Service liveness endpoint.
pub(crate) mod status;
