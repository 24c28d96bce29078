use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Set to `1` for indented, per-call log output.
pub const LOG_TREE_ENV: &str = "EBS_LOG_TREE";

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=ebs_eval=debug` or `RUST_LOG=ebs_parse=trace`.
/// Logs go to stderr so they never mix with script output.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let filter = EnvFilter::from_default_env();
        let tree = std::env::var(LOG_TREE_ENV).is_ok_and(|value| value == "1");
        if tree {
            tracing_subscriber::registry()
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_bracketed_fields(true),
                )
                .with(filter)
                .init();
        } else {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
