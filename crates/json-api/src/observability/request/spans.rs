//! HTTP span helpers.

use uuid::Uuid;

#[derive(Debug, Clone)]
pub(super) struct RequestSpanName {
    pub(super) otel_path: String,
    pub(super) otel_span_name: String,
}

pub(super) fn request_span_name(method: &str, path: &str) -> RequestSpanName {
    let otel_path = normalise_path_for_span_name(path);
    let otel_span_name = format!("{method} {otel_path}");

    RequestSpanName {
        otel_path,
        otel_span_name,
    }
}

/// Replace timer ids and widget shop domains with placeholders, keeping span
/// names and metric labels bounded.
fn normalise_path_for_span_name(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut normalised = String::from("/");
    let mut previous = "";

    for (index, segment) in path.trim_start_matches('/').split('/').enumerate() {
        if index > 0 {
            normalised.push('/');
        }

        if previous == "widget" {
            normalised.push_str("{shop}");
        } else if Uuid::parse_str(segment).is_ok() {
            normalised.push_str("{id}");
        } else {
            normalised.push_str(segment);
        }

        previous = segment;
    }

    normalised
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_ids_are_replaced() {
        let names = request_span_name(
            "POST",
            "/api/counter/timers/01890a5d-ac96-774b-bcce-b302099a8057/toggle",
        );

        assert_eq!(names.otel_path, "/api/counter/timers/{id}/toggle");
        assert_eq!(names.otel_span_name, "POST /api/counter/timers/{id}/toggle");
    }

    #[test]
    fn widget_shop_is_replaced() {
        let names = request_span_name("GET", "/api/counter/widget/example.myshopify.com");

        assert_eq!(names.otel_path, "/api/counter/widget/{shop}");
    }

    #[test]
    fn static_paths_are_kept() {
        assert_eq!(request_span_name("GET", "/").otel_path, "/");
        assert_eq!(
            request_span_name("GET", "/api/counter/timers/stats").otel_path,
            "/api/counter/timers/stats"
        );
    }
}
