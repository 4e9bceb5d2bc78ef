//! Logging and Trace Export Config

use std::time::Duration;

use clap::Args;

/// How log lines are rendered on stdout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// One line per event, for local development.
    Compact,

    /// One JSON object per event, for log shippers.
    Json,
}

/// Log output settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Base level for workhub targets; noisy dependencies stay at warn
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log line format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Trace export and request timing settings.
///
/// Export is off unless `OTEL_ENABLED` is set; request logging and metrics run
/// either way.
#[derive(Debug, Args)]
pub struct ObservabilityConfig {
    /// Export request spans over OTLP
    #[arg(long, env = "OTEL_ENABLED", default_value_t = false)]
    pub otel_enabled: bool,

    /// Continue traces started by the caller's `traceparent` header
    #[arg(long, env = "OTEL_PARENT_PROPAGATION_ENABLED", default_value_t = false)]
    pub otel_parent_propagation_enabled: bool,

    /// OTLP collector endpoint (gRPC)
    #[arg(
        long,
        env = "OTEL_EXPORTER_OTLP_ENDPOINT",
        default_value = "http://localhost:4317"
    )]
    pub otel_exporter_otlp_endpoint: String,

    /// Seconds to wait on the collector per export batch
    #[arg(long, env = "OTEL_EXPORTER_OTLP_TIMEOUT_SECONDS", default_value_t = 3)]
    pub otel_exporter_otlp_timeout_seconds: u64,

    /// `service.name` on exported spans
    #[arg(long, env = "OTEL_SERVICE_NAME", default_value = "workhub-json")]
    pub otel_service_name: String,

    /// `service.version` on exported spans
    #[arg(long, env = "OTEL_SERVICE_VERSION", default_value = env!("CARGO_PKG_VERSION"))]
    pub otel_service_version: String,

    /// `deployment.environment.name` on exported spans
    #[arg(long, env = "OTEL_DEPLOYMENT_ENVIRONMENT", default_value = "local")]
    pub otel_deployment_environment: String,

    /// Share of root traces kept, 0.0 to 1.0
    #[arg(long, env = "OTEL_TRACE_SAMPLE_RATIO", default_value_t = 1.0)]
    pub otel_trace_sample_ratio: f64,

    /// Requests slower than this are logged at warn
    #[arg(long, env = "SLOW_REQUEST_THRESHOLD_MS", default_value_t = 500)]
    pub slow_request_threshold_ms: u64,
}

impl ObservabilityConfig {
    /// Parent extraction needs the propagator that is only installed with export.
    #[must_use]
    pub fn parent_propagation(&self) -> bool {
        self.otel_enabled && self.otel_parent_propagation_enabled
    }

    /// Configured sample ratio, clamped into `[0.0, 1.0]`.
    #[must_use]
    pub fn sample_ratio(&self) -> f64 {
        self.otel_trace_sample_ratio.clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn exporter_timeout(&self) -> Duration {
        Duration::from_secs(self.otel_exporter_otlp_timeout_seconds)
    }

    #[must_use]
    pub fn slow_request_threshold(&self) -> Duration {
        Duration::from_millis(self.slow_request_threshold_ms)
    }
}
