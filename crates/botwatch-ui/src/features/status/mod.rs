//! Service status feature slice.
//!
//! # Design
//! - Read the liveness snapshot from the `DashboardStore` only.
//! - Polling lives in the app shell so it runs whichever page is shown.

pub(crate) mod view;
