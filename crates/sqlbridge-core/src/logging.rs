//! Logging integration for sqlbridge.
//!
//! Provides a helper for configuring [`tracing`]-based logging. Migration
//! progress lines are emitted through `tracing` rather than written to
//! process output, so the surrounding tooling decides formatting and
//! destination.

/// Sets up the global tracing subscriber.
///
/// `level` is an env-filter directive string (e.g. `"info"`,
/// `"sqlbridge=debug"`). With `json` set, a structured JSON format is used;
/// otherwise a pretty, human-readable format. Installing a second subscriber
/// is a no-op rather than a panic, so tests can call this freely.
pub fn setup_logging(level: &str, json: bool) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    if json {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(false)
            .pretty()
            .try_init()
            .ok();
    }
}

/// Creates a tracing span covering the application of one migration.
///
/// # Examples
///
/// ```
/// let span = sqlbridge_core::logging::migration_span("0003_add_audit_columns");
/// let _guard = span.enter();
/// tracing::info!("applying");
/// ```
pub fn migration_span(name: &str) -> tracing::Span {
    tracing::info_span!("migration", name = name)
}
