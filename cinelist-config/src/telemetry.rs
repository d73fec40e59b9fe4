use tracing_subscriber::{
    EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
    util::TryInitError,
};

use crate::models::Environment;

/// Filter used when `RUST_LOG` is unset.
pub fn default_filter(environment: Environment) -> &'static str {
    match environment {
        Environment::Development => "info,cinelist_core=debug,sqlx=warn",
        Environment::Staging | Environment::Production => "info,sqlx=warn",
    }
}

/// Install the global tracing subscriber. `RUST_LOG` overrides the
/// environment's default filter.
pub fn init_tracing(environment: Environment) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(environment)));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init()
}
