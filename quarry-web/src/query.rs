//! Query builder
//!
//! Turns the user's `q`/`p` parameters into a concrete backend request by
//! filling the configured template. Malformed page numbers never fail the
//! request; they degrade to page 1.

use quarry_common::config::{QUERY_PLACEHOLDER, ROWS_PLACEHOLDER, START_PLACEHOLDER};
use quarry_common::SearchConfig;

/// Concrete backend request for one search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendRequest {
    /// Backend URL with every placeholder substituted
    pub url: String,
    /// Zero-based offset of the first requested result
    pub start: u64,
}

/// Parse a requested page number
///
/// Follows `parseInt` rules: surrounding whitespace is ignored, an optional
/// sign is accepted and parsing stops at the first non-digit. A value with no
/// leading digits (or no value at all) is page 1.
///
/// # Examples
/// ```
/// use quarry_web::query::parse_page;
///
/// assert_eq!(parse_page(Some("3")), 3);
/// assert_eq!(parse_page(Some("4th")), 4);
/// assert_eq!(parse_page(Some("abc")), 1);
/// assert_eq!(parse_page(None), 1);
/// ```
pub fn parse_page(p: Option<&str>) -> i64 {
    let Some(raw) = p else {
        return 1;
    };

    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digit_count = digits.bytes().take_while(u8::is_ascii_digit).count();
    if digit_count == 0 {
        return 1;
    }

    // Saturate rather than overflow on absurdly long inputs
    let value = digits[..digit_count]
        .bytes()
        .fold(0i64, |acc, d| acc.saturating_mul(10).saturating_add(i64::from(d - b'0')));

    if negative {
        -value
    } else {
        value
    }
}

/// Zero-based result offset for a page
///
/// Pages at or below zero map to offset 0.
pub fn start_offset(page: i64, page_size: u64) -> u64 {
    if page <= 1 {
        return 0;
    }
    // page > 1 here, so the cast is lossless
    (page as u64 - 1).saturating_mul(page_size)
}

/// Current (1-based) page for a result offset
pub fn page_on(start: u64, page_size: u64) -> u64 {
    (start / page_size.max(1)).saturating_add(1)
}

/// Percent-encode a query term for a URL query parameter
///
/// Everything outside the RFC 3986 unreserved set is encoded, but existing
/// `%XX` escapes are passed through. The result is therefore stable under
/// repeated encoding: callers may hand in an already-encoded term.
pub fn encode_query_term(q: &str) -> String {
    let bytes = q.as_bytes();
    let mut encoded = String::with_capacity(q.len());
    let mut run_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let is_escape = bytes[i] == b'%'
            && i + 2 < bytes.len()
            && bytes[i + 1].is_ascii_hexdigit()
            && bytes[i + 2].is_ascii_hexdigit();

        if is_escape {
            encoded.push_str(&urlencoding::encode(&q[run_start..i]));
            encoded.push_str(&q[i..i + 3]);
            i += 3;
            run_start = i;
        } else {
            i += 1;
        }
    }

    encoded.push_str(&urlencoding::encode(&q[run_start..]));
    encoded
}

/// Build the backend request for a query and requested page
pub fn build_query(q: &str, p: Option<&str>, config: &SearchConfig) -> BackendRequest {
    let page = parse_page(p);
    let start = start_offset(page, config.page_size);

    let url = config
        .query_template
        .replacen(QUERY_PLACEHOLDER, &encode_query_term(q), 1)
        .replacen(ROWS_PLACEHOLDER, &config.page_size.to_string(), 1)
        .replacen(START_PLACEHOLDER, &start.to_string(), 1);

    BackendRequest { url, start }
}
