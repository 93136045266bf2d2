#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::multiple_crate_versions)]
//! Logging primitives for the Botwatch host.
//!
//! This crate owns subscriber installation, the `[LVL] - …` line format the
//! dashboard classifies on, and the relay that replays recent lines to new
//! socket clients before streaming live output.

mod error;
mod format;
mod init;
mod log_stream;

pub use error::{Result, TelemetryError};
pub use format::{DashboardFormat, level_prefix};
pub use init::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, init_logging};
pub use log_stream::{
    DEFAULT_HISTORY_CAPACITY, LogRelay, LogStreamMakeWriter, LogStreamWriter, LogSubscription,
};
