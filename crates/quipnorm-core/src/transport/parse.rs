//! Parse HTTP response header lines collected by libcurl.

/// Headers of the final response that the asset store needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ResponseHeaders {
    pub content_disposition: Option<String>,
}

/// Parse collected header lines.
///
/// With redirects followed, libcurl reports the headers of every hop; a
/// status line (`HTTP/...`) starts a new response, so only the last one
/// counts.
pub(crate) fn parse_headers(lines: &[String]) -> ResponseHeaders {
    let mut parsed = ResponseHeaders::default();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            parsed = ResponseHeaders::default();
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-disposition") {
                parsed.content_disposition = Some(value.trim().to_string());
            }
        }
    }

    parsed
}
