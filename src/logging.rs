use std::io;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the stderr subscriber. `RUST_LOG` wins over `verbosity`.
///
/// Safe to call more than once; only the first call installs anything.
pub fn init(verbosity: u8) {
    let default_directive = match verbosity {
        0 => "warn",
        1 => "repoman=debug,warn",
        _ => "repoman=trace,debug",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false),
        )
        .try_init();
}
