//! HTTP span helpers.

/// Route-shaped span name, e.g. `GET /products/{id}`.
///
/// Numeric segments and the segment after `by-name` are collapsed so that span
/// names stay low-cardinality.
pub(super) fn request_span_name(method: &str, path: &str) -> String {
    format!("{method} {}", normalise_path(path))
}

fn normalise_path(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut normalised = String::new();
    let mut previous = "";

    for segment in path.trim_start_matches('/').split('/') {
        normalised.push('/');

        if previous == "by-name" {
            normalised.push_str("{name}");
        } else if !segment.is_empty() && segment.bytes().all(|byte| byte.is_ascii_digit()) {
            normalised.push_str("{id}");
        } else {
            normalised.push_str(segment);
        }

        previous = segment;
    }

    normalised
}
