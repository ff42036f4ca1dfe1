//! Prometheus collectors and the `/metrics` exposition handler.
//!
//! Collectors live in a private registry built on first use. If building it
//! fails the error is logged once and every observation becomes a no-op.

use std::sync::LazyLock;

use prometheus::{
    HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TEXT_FORMAT, TextEncoder, core::Collector,
};
use salvo::{
    Response, handler,
    http::{
        StatusCode,
        header::{CONTENT_TYPE, HeaderValue},
    },
};
use tracing::error;

const DURATION_BUCKETS: [f64; 13] = [
    0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

static METRICS: LazyLock<Option<ServerMetrics>> = LazyLock::new(ServerMetrics::build);

#[derive(Debug)]
struct ServerMetrics {
    registry: Registry,
    requests: IntCounterVec,
    request_duration: HistogramVec,
    in_flight: IntGauge,
    widget_timers: IntCounter,
}

impl ServerMetrics {
    fn get() -> Option<&'static Self> {
        METRICS.as_ref()
    }

    fn build() -> Option<Self> {
        let registry = Registry::new();

        let requests = registered(
            &registry,
            IntCounterVec::new(
                Opts::new(
                    "countdown_json_http_requests_total",
                    "HTTP requests by method, route and status.",
                ),
                &["method", "route", "status_class", "status_code"],
            ),
        )?;

        let request_duration = registered(
            &registry,
            HistogramVec::new(
                HistogramOpts::new(
                    "countdown_json_http_request_duration_seconds",
                    "HTTP request latency by method and route.",
                )
                .buckets(DURATION_BUCKETS.to_vec()),
                &["method", "route"],
            ),
        )?;

        let in_flight = registered(
            &registry,
            IntGauge::new(
                "countdown_json_http_requests_in_flight",
                "HTTP requests currently being served.",
            ),
        )?;

        let widget_timers = registered(
            &registry,
            IntCounter::new(
                "countdown_json_widget_timers_served_total",
                "Live timers returned by the public widget feed.",
            ),
        )?;

        Some(Self {
            registry,
            requests,
            request_duration,
            in_flight,
            widget_timers,
        })
    }
}

/// Register a freshly built collector, logging whichever step fails.
fn registered<C>(registry: &Registry, collector: prometheus::Result<C>) -> Option<C>
where
    C: Collector + Clone + 'static,
{
    let collector = collector
        .inspect_err(|source| error!("failed to build metric: {source}"))
        .ok()?;

    registry
        .register(Box::new(collector.clone()))
        .inspect_err(|source| error!("failed to register metric: {source}"))
        .ok()?;

    Some(collector)
}

/// Holds one slot of the in-flight gauge until dropped.
#[derive(Debug)]
pub(super) struct InFlightRequestGuard(Option<IntGauge>);

impl InFlightRequestGuard {
    pub(super) fn track() -> Self {
        let gauge = ServerMetrics::get().map(|metrics| metrics.in_flight.clone());

        if let Some(gauge) = &gauge {
            gauge.inc();
        }

        Self(gauge)
    }
}

impl Drop for InFlightRequestGuard {
    fn drop(&mut self) {
        if let Some(gauge) = &self.0 {
            gauge.dec();
        }
    }
}

pub(super) fn observe_request(method: &str, route: &str, status_code: u16, duration_seconds: f64) {
    let Some(metrics) = ServerMetrics::get() else {
        return;
    };

    let code = status_code.to_string();

    metrics
        .requests
        .with_label_values(&[method, route, status_class(status_code), code.as_str()])
        .inc();

    metrics
        .request_duration
        .with_label_values(&[method, route])
        .observe(duration_seconds);
}

/// Count timers handed to storefronts by the widget feed.
pub(crate) fn observe_widget_timers(count: usize) {
    if let Some(metrics) = ServerMetrics::get() {
        metrics
            .widget_timers
            .inc_by(u64::try_from(count).unwrap_or(u64::MAX));
    }
}

fn status_class(status_code: u16) -> &'static str {
    match status_code / 100 {
        1 => "1xx",
        2 => "2xx",
        3 => "3xx",
        4 => "4xx",
        5 => "5xx",
        _ => "other",
    }
}

#[handler]
pub(crate) async fn metrics_handler(res: &mut Response) {
    let Some(metrics) = ServerMetrics::get() else {
        res.status_code(StatusCode::SERVICE_UNAVAILABLE);
        return;
    };

    match TextEncoder::new().encode_to_string(&metrics.registry.gather()) {
        Ok(body) => {
            res.headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static(TEXT_FORMAT));
            res.render(body);
        }
        Err(source) => {
            error!("failed to encode metrics: {source}");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}
