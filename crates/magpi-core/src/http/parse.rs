//! Parse HTTP response header lines into ResponseMeta.

use super::ResponseMeta;

/// Parse collected header lines into ResponseMeta.
///
/// With redirects followed, libcurl reports the headers of every hop; later
/// values win so the metadata describes the final response.
pub(crate) fn parse_headers(lines: &[String]) -> ResponseMeta {
    let mut meta = ResponseMeta::default();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            // New response (e.g. after a redirect): drop the previous hop's Location.
            meta.location = None;
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("location") {
                meta.location = Some(value.to_string());
            }
            if name.eq_ignore_ascii_case("content-type") {
                meta.content_type = Some(value.to_string());
            }
            if name.eq_ignore_ascii_case("content-length") {
                if let Ok(n) = value.parse::<u64>() {
                    meta.content_length = Some(n);
                }
            }
        }
    }

    meta
}
