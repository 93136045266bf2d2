//! Logs feature slice.
//!
//! # Design
//! - The app shell owns the socket; this view only renders and scrolls.
//! - Render an append-only log view with per-severity visibility.

pub(crate) mod view;
