//! Core, DOM-free primitives and helpers for the dashboard.
pub mod connection;
pub mod endpoints;
pub mod filters;
pub mod log_buffer;
pub mod scroll;
pub mod store;
pub mod theme;
