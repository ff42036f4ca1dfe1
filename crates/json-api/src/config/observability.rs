//! Logging, Tracing & Request Timing Config

use std::time::Duration;

use clap::Args;

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// One line per event, for terminals.
    Compact,

    /// One JSON object per event, for log shippers.
    Json,
}

#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Default log level, overridden by any `RUST_LOG` directives
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// OTLP trace export.
#[derive(Debug, Args)]
pub struct OtelConfig {
    /// Export request spans over OTLP
    #[arg(long = "otel-enabled", env = "OTEL_ENABLED", default_value_t = false)]
    pub enabled: bool,

    /// Continue traces from an incoming `traceparent` header
    #[arg(
        long = "otel-parent-propagation-enabled",
        env = "OTEL_PARENT_PROPAGATION_ENABLED",
        default_value_t = false
    )]
    pub parent_propagation_enabled: bool,

    /// OTLP gRPC collector endpoint
    #[arg(
        long = "otel-exporter-otlp-endpoint",
        env = "OTEL_EXPORTER_OTLP_ENDPOINT",
        default_value = "http://localhost:4317"
    )]
    pub endpoint: String,

    /// Export timeout in seconds
    #[arg(
        long = "otel-exporter-otlp-timeout-seconds",
        env = "OTEL_EXPORTER_OTLP_TIMEOUT_SECONDS",
        default_value_t = 3
    )]
    pub timeout_seconds: u64,

    #[arg(
        long = "otel-service-name",
        env = "OTEL_SERVICE_NAME",
        default_value = "countdown-json"
    )]
    pub service_name: String,

    #[arg(
        long = "otel-deployment-environment",
        env = "OTEL_DEPLOYMENT_ENVIRONMENT",
        default_value = "development"
    )]
    pub deployment_environment: String,

    /// Fraction of root traces to sample
    #[arg(
        long = "otel-trace-sample-ratio",
        env = "OTEL_TRACE_SAMPLE_RATIO",
        default_value_t = 1.0,
        allow_negative_numbers = true
    )]
    pub trace_sample_ratio: f64,
}

impl OtelConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Sample ratio limited to `0.0..=1.0`; NaN samples nothing.
    #[must_use]
    pub fn sample_ratio(&self) -> f64 {
        if self.trace_sample_ratio.is_nan() {
            return 0.0;
        }

        self.trace_sample_ratio.clamp(0.0, 1.0)
    }
}

#[derive(Debug, Args)]
pub struct ObservabilityConfig {
    #[command(flatten)]
    pub otel: OtelConfig,

    /// Requests slower than this are logged at warn
    #[arg(long, env = "SLOW_REQUEST_THRESHOLD_MS", default_value_t = 1_000)]
    pub slow_request_threshold_ms: u64,
}

impl ObservabilityConfig {
    #[must_use]
    pub fn slow_request_threshold(&self) -> Duration {
        Duration::from_millis(self.slow_request_threshold_ms)
    }

    /// Parent extraction only means something when spans are exported.
    #[must_use]
    pub fn parent_propagation(&self) -> bool {
        self.otel.enabled && self.otel.parent_propagation_enabled
    }
}
