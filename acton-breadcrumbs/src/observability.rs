//! Logging setup
//!
//! The library only emits `tracing` events; applications (and the
//! `acton-breadcrumbs` CLI) install a subscriber with [`init`].

use tracing::Subscriber;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize structured logging
///
/// Sets up:
/// - Environment-based log level filtering (`RUST_LOG`)
/// - Pretty formatting in debug builds, JSON in release builds
///
/// # Errors
///
/// Returns error if a global subscriber is already installed.
///
/// # Example
///
/// ```rust,no_run
/// use acton_breadcrumbs::observability;
///
/// # fn main() -> anyhow::Result<()> {
/// observability::init()?;
/// tracing::info!("Application started");
/// # Ok(())
/// # }
/// ```
pub fn init() -> anyhow::Result<()> {
    init_with_filter(default_filter())
}

/// Initialize structured logging with an explicit filter
///
/// # Errors
///
/// Returns error if a global subscriber is already installed.
pub fn init_with_filter(env_filter: EnvFilter) -> anyhow::Result<()> {
    subscriber(env_filter).try_init()?;
    Ok(())
}

fn subscriber(env_filter: EnvFilter) -> Box<dyn Subscriber + Send + Sync> {
    let registry = tracing_subscriber::registry().with(env_filter);

    // Pretty formatting for development
    #[cfg(debug_assertions)]
    let subscriber = registry.with(tracing_subscriber::fmt::layer().pretty());

    // JSON formatting for production
    #[cfg(not(debug_assertions))]
    let subscriber = registry.with(tracing_subscriber::fmt::layer().json());

    Box::new(subscriber)
}

/// `RUST_LOG` if set, otherwise a build-dependent default
#[must_use]
pub fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cfg!(debug_assertions) {
            EnvFilter::new("debug,acton_breadcrumbs=trace")
        } else {
            EnvFilter::new("info")
        }
    })
}
