use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::Res;

/// Installs the global tracing subscriber.
///
/// `directive` is an `EnvFilter` string such as `info` or
/// `moodlist=debug,reqwest=warn`. Log lines go to stderr so command output
/// on stdout stays clean.
pub fn init_tracing(directive: &str) -> Res<()> {
    let filter_layer = EnvFilter::try_new(directive)
        .map_err(|e| format!("Invalid log filter '{}': {}", directive, e))?;
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;
    Ok(())
}
