//! Logging subscriber initialisation.

use tracing_subscriber::{
    EnvFilter, Layer, Registry, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::config::logging::{LogFormat, LoggingConfig};

use super::ObservabilityError;

/// Noisy dependencies are held at `warn` unless `RUST_LOG` says otherwise.
const QUIET_DEPENDENCIES: &[&str] = &["h2", "hyper", "sqlx", "redis", "salvo_core"];

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

pub(crate) fn init_subscriber(config: &LoggingConfig) -> Result<(), ObservabilityError> {
    tracing_subscriber::registry()
        .with(format_layer(config.log_format))
        .with(env_filter(&config.log_level))
        .try_init()?;

    Ok(())
}

fn format_layer(format: LogFormat) -> BoxedLayer {
    match format {
        LogFormat::Compact => tracing_subscriber::fmt::layer()
            .compact()
            .with_target(true)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_target(true)
            .boxed(),
    }
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(level)))
}

fn default_directives(level: &str) -> String {
    QUIET_DEPENDENCIES
        .iter()
        .fold(level.to_owned(), |directives, target| {
            format!("{directives},{target}=warn")
        })
}
