//! Tracing setup shared by all binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Environment;

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set. Otherwise `default_directives` is used in
/// development and plain `info` in production. Production logs are JSON lines.
pub fn init_tracing(environment: Environment, default_directives: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if environment.is_production() {
            "info".into()
        } else {
            default_directives.into()
        }
    });

    let registry = tracing_subscriber::registry().with(filter);

    // try_init: tests and repeated calls must not panic on an existing subscriber
    let result = if environment.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    if let Err(e) = result {
        eprintln!("tracing already initialised: {}", e);
    }
}
