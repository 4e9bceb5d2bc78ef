//! Telemetry startup and shutdown.

use opentelemetry::global;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace::SdkTracerProvider};
use tracing::{error, info};

use crate::config::ServerConfig;

use super::{ObservabilityError, logging, otel, settings};

/// Holds the span exporter, when one is running, until the server stops.
#[derive(Debug)]
pub(crate) struct Observability {
    tracer_provider: Option<SdkTracerProvider>,
}

impl Observability {
    /// Install the log subscriber, plus OTLP span export when enabled.
    pub(crate) fn init(config: &ServerConfig) -> Result<Self, ObservabilityError> {
        let telemetry = &config.observability;

        settings::install(telemetry);

        let tracer_provider = telemetry
            .otel_enabled
            .then(|| {
                global::set_text_map_propagator(TraceContextPropagator::new());
                otel::build_tracer_provider(config)
            })
            .transpose()?;

        logging::init_subscriber(config, tracer_provider.as_ref())?;

        if tracer_provider.is_some() {
            info!(
                endpoint = %telemetry.otel_exporter_otlp_endpoint,
                sample_ratio = telemetry.sample_ratio(),
                "exporting workflow request traces"
            );
        }

        Ok(Self { tracer_provider })
    }

    /// Flush buffered spans before exit.
    pub(crate) fn shutdown(self) {
        if let Some(provider) = self.tracer_provider
            && let Err(source) = provider.shutdown()
        {
            error!("failed to flush trace exporter: {source}");
        }
    }
}
