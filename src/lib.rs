#![doc(test(attr(deny(warnings))))]

//! Figaro tracks a household's monthly income and expense lines across
//! years, with CLP-style currency handling, a single JSON persistence slot,
//! and manual backup/restore.

pub mod cli;
pub mod core;
pub mod currency;
pub mod errors;
pub mod ledger;
pub mod storage;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        init_tracing();
        tracing::info!("Figaro tracing initialized.");
    });
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::from_default_env().add_directive(
        "figaro=info"
            .parse()
            .unwrap_or_else(|_| tracing_subscriber::filter::LevelFilter::INFO.into()),
    );

    fmt().with_env_filter(filter).init();
}
