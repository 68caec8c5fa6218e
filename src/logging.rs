use tracing_subscriber::{EnvFilter, fmt};

/// Install the console subscriber.
///
/// Progress lines go to stderr so stdout carries only previews and the final
/// result. `RUST_LOG` overrides the default level.
pub fn init_logging(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A subscriber may already be installed (e.g. by a test harness).
    let _ = fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
