//! Per-request span, correlation id, access log and HTTP metrics.

mod ids;
mod propagation;
mod spans;

use std::time::{Duration, Instant};

use salvo::{
    Request, handler,
    http::StatusCode,
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::{Instrument as _, Span, error, info, warn};
use tracing_opentelemetry::OpenTelemetrySpanExt as _;

use self::{ids::RequestId, spans::RequestSpanName};

use super::{metrics, settings};

const REQUEST_ID_DEPOT_KEY: &str = "request_id";

/// Scraping `/metrics` is not itself measured.
const UNMEASURED_PATH: &str = "/metrics";

#[handler]
pub(crate) async fn request_logging(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if req.uri().path() == UNMEASURED_PATH {
        ctrl.call_next(req, depot, res).await;
        return;
    }

    let started = Instant::now();
    let settings = settings::current();

    let request_id = RequestId::from_header(
        req.headers()
            .get(ids::REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok()),
    );

    depot.insert(REQUEST_ID_DEPOT_KEY, request_id.as_str().to_owned());
    request_id.write_header(res);

    let method = req.method().to_string();
    let names = spans::request_span_name(&method, req.uri().path());
    let _in_flight = metrics::InFlightRequestGuard::track();

    let span = tracing::info_span!(
        parent: None,
        "http.request",
        otel.name = %names.otel_span_name,
        otel.kind = "server",
        request_id = %request_id,
        method = %method,
        route = %names.otel_path,
        remote_addr = %req.remote_addr(),
        status = tracing::field::Empty,
        duration_ms = tracing::field::Empty
    );

    if settings.parent_propagation
        && let Some(parent) = propagation::remote_parent(req.headers())
        && let Err(source) = span.set_parent(parent)
    {
        warn!("failed to set parent context on request span: {source}");
    }

    ctrl.call_next(req, depot, res)
        .instrument(span.clone())
        .await;

    let elapsed = started.elapsed();
    let status = res.status_code.unwrap_or(StatusCode::OK);

    metrics::observe_request(
        &method,
        &names.otel_path,
        status.as_u16(),
        elapsed.as_secs_f64(),
    );

    record_completion(
        &span,
        &names,
        status,
        elapsed,
        settings.slow_request_threshold,
    );
}

/// Raw paths carry shop domains and timer ids, so only the normalised route is
/// logged.
fn record_completion(
    span: &Span,
    names: &RequestSpanName,
    status: StatusCode,
    elapsed: Duration,
    slow_threshold: Duration,
) {
    let status_code = status.as_u16();
    let duration_ms = elapsed.as_millis();

    span.record("status", status_code);
    span.record("duration_ms", duration_ms);

    span.in_scope(|| {
        info!(status = status_code, duration_ms, "request.completed");

        if status.is_server_error() {
            error!(status = status_code, route = %names.otel_path, "server error response");
        } else if status.is_client_error() {
            warn!(status = status_code, route = %names.otel_path, "client error response");
        }

        if elapsed > slow_threshold {
            warn!(
                route = %names.otel_path,
                duration_ms,
                threshold_ms = slow_threshold.as_millis(),
                "slow request detected"
            );
        }
    });
}
