//! W3C trace context from incoming headers.

use opentelemetry::{
    Context, global,
    propagation::{Extractor, TextMapPropagator},
    trace::TraceContextExt as _,
};
use salvo::http::{HeaderMap, HeaderName};

struct HeaderCarrier<'a>(&'a HeaderMap);

impl Extractor for HeaderCarrier<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|value| value.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(HeaderName::as_str).collect()
    }
}

/// Remote parent named by the request, if it carries a valid one.
pub(super) fn remote_parent(headers: &HeaderMap) -> Option<Context> {
    global::get_text_map_propagator(|propagator| extract_remote_parent(propagator, headers))
}

fn extract_remote_parent(
    propagator: &dyn TextMapPropagator,
    headers: &HeaderMap,
) -> Option<Context> {
    // Start empty so a request without headers never adopts the caller's span.
    let context = propagator.extract_with_context(&Context::new(), &HeaderCarrier(headers));
    let valid = context.span().span_context().is_valid();

    valid.then_some(context)
}

#[cfg(test)]
mod tests {
    use opentelemetry_sdk::propagation::TraceContextPropagator;
    use salvo::http::HeaderValue;

    use super::*;

    fn headers(traceparent: Option<&'static str>) -> HeaderMap {
        let mut headers = HeaderMap::new();

        if let Some(value) = traceparent {
            headers.insert("traceparent", HeaderValue::from_static(value));
        }

        headers
    }

    #[test]
    fn valid_traceparent_yields_parent() {
        let parent = extract_remote_parent(
            &TraceContextPropagator::new(),
            &headers(Some(
                "00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01",
            )),
        );

        assert!(parent.is_some(), "expected a remote parent");
    }

    #[test]
    fn missing_or_malformed_traceparent_yields_none() {
        let propagator = TraceContextPropagator::new();

        assert!(extract_remote_parent(&propagator, &headers(None)).is_none());
        assert!(extract_remote_parent(&propagator, &headers(Some("00-garbage"))).is_none());
    }
}
