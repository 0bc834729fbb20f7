use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Install the global subscriber. Filtering is controlled by `FOGBUGZ_LOG`
/// (same syntax as `RUST_LOG`); anything below `warn` is silent by default so
/// diagnostics never interleave with table output on stdout.
pub fn init() {
    let filter =
        EnvFilter::try_from_env("FOGBUGZ_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    if tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .finish(),
    )
    .is_err()
    {
        // Subscriber was already set; ignore.
    }
}
