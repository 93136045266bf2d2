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

//! Binary entrypoint for the Botwatch dashboard host.

use botwatch_server::{ServerResult, run};

/// Serve the dashboard until Ctrl-C.
#[tokio::main]
async fn main() -> ServerResult<()> {
    run().await
}
