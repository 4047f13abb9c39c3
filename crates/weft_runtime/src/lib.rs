//! Weft Embedding SDK
//!
//! Integrate the Weft widget layer into Rust applications: re-exports
//! of the core and widget crates, logging setup, and a Tokio-backed
//! scheduler for hosts with an async runtime.

pub use weft_core;
pub use weft_widgets;

mod scheduler;
pub use scheduler::TokioScheduler;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize logging for a Weft host
///
/// Respects `RUST_LOG`, defaulting to `info`. Fails if a global
/// subscriber is already installed.
pub fn init() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .try_init()?;

    tracing::debug!("weft logging initialized");
    Ok(())
}
