use tracing_subscriber::EnvFilter;

pub const DEFAULT_RUST_LOG: &str = "debug,sqlx=warn,hyper=info,h2=info,tower=info";

/// Installs the global subscriber, `RUST_LOG` takes precedence over the
/// default directives.
pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_RUST_LOG));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .init();
}
