//! Subscriber assembly: formatter, filter and the optional OTLP layer.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

use crate::config::observability::{LogFormat, LoggingConfig};

use super::ObservabilityError;

type FormatLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Transport crates that are noisy at `info`.
const QUIET_TARGETS: [&str; 6] = ["h2", "hyper", "tower", "tonic", "opentelemetry", "sqlx"];

fn format_layer(format: LogFormat) -> FormatLayer {
    match format {
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .boxed(),
    }
}

fn default_directives(level: &str) -> String {
    QUIET_TARGETS
        .iter()
        .fold(level.to_owned(), |directives, target| {
            format!("{directives},{target}=warn")
        })
}

fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.log_level)))
}

pub(super) fn init_subscriber(
    config: &LoggingConfig,
    service_name: &str,
    tracer_provider: Option<&SdkTracerProvider>,
) -> Result<(), ObservabilityError> {
    let otel_layer = tracer_provider.map(|provider| {
        tracing_opentelemetry::layer().with_tracer(provider.tracer(service_name.to_owned()))
    });

    tracing_subscriber::registry()
        .with(format_layer(config.log_format))
        .with(env_filter(config))
        .with(otel_layer)
        .try_init()?;

    Ok(())
}
