//! spendtrack: per-category totals and gap-filled daily/weekly series over
//! shared expense records.

pub mod cli;
pub mod parsers;
pub mod services;
pub mod types;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the global fmt subscriber (stderr), once.
///
/// Filter comes from `SPENDTRACK_LOG`, then `RUST_LOG`, defaulting to
/// `spendtrack=warn`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_env("SPENDTRACK_LOG")
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("spendtrack=warn"));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
