use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global subscriber: `RUST_LOG` filtered output on stderr,
/// mirrored to the journal when one is reachable.
pub fn setup() {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);
    let filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let registry = tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer);

    if let Ok(journal_layer) = tracing_journald::layer() {
        registry.with(journal_layer).init();
    } else {
        registry.init();
    }
}
