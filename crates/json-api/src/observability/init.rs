//! Telemetry lifecycle management.

use opentelemetry::global;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace::SdkTracerProvider};
use tracing::{error, info};

use crate::config::ServerConfig;

use super::{ObservabilityError, logging, otel, settings};

/// Runtime observability state.
#[derive(Debug)]
pub(crate) struct Observability {
    tracer_provider: Option<SdkTracerProvider>,
}

impl Observability {
    /// Install the subscriber, and the OTLP pipeline when export is enabled.
    pub(crate) fn init(config: &ServerConfig) -> Result<Self, ObservabilityError> {
        let otel = &config.observability.otel;

        settings::install(&config.observability);

        let tracer_provider = if otel.enabled {
            global::set_text_map_propagator(TraceContextPropagator::new());

            Some(otel::build_tracer_provider(otel)?)
        } else {
            None
        };

        logging::init_subscriber(
            &config.logging,
            &otel.service_name,
            tracer_provider.as_ref(),
        )?;

        if tracer_provider.is_some() {
            info!(endpoint = %otel.endpoint, "exporting traces over OTLP");
        }

        Ok(Self { tracer_provider })
    }

    /// Flush pending spans.
    pub(crate) fn shutdown(self) {
        let Some(provider) = self.tracer_provider else {
            return;
        };

        if let Err(source) = provider.shutdown() {
            error!("failed to shutdown tracer provider: {source}");
        }
    }
}
