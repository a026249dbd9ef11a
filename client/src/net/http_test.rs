use super::*;

// =============================================================
// request_headers
// =============================================================

#[test]
fn headers_always_include_json_content_type() {
    let headers = request_headers(None, None);
    assert_eq!(headers, vec![("Content-Type", "application/json".to_owned())]);
}

#[test]
fn headers_attach_bearer_when_token_present() {
    let headers = request_headers(Some("a1"), None);
    assert!(headers.contains(&("Authorization", "Bearer a1".to_owned())));
}

#[test]
fn headers_skip_empty_token() {
    let headers = request_headers(Some(""), Some(""));
    assert_eq!(headers.len(), 1);
}

#[test]
fn headers_attach_csrf_token() {
    let headers = request_headers(None, Some("xyz"));
    assert!(headers.contains(&("X-CSRFToken", "xyz".to_owned())));
}

// =============================================================
// csrf_from_cookie
// =============================================================

#[test]
fn csrf_found_among_other_cookies() {
    assert_eq!(csrf_from_cookie("sessionid=abc; csrftoken=tok123; theme=dark"), Some("tok123".to_owned()));
}

#[test]
fn csrf_missing_returns_none() {
    assert_eq!(csrf_from_cookie("sessionid=abc"), None);
    assert_eq!(csrf_from_cookie(""), None);
}

#[test]
fn csrf_prefix_must_match_whole_name() {
    assert_eq!(csrf_from_cookie("xcsrftoken=nope"), None);
}

#[test]
fn csrf_empty_value_returns_none() {
    assert_eq!(csrf_from_cookie("csrftoken="), None);
}

// =============================================================
// non_empty_query
// =============================================================

#[test]
fn non_empty_query_drops_blank_values() {
    let pairs = [("query", "phone".to_owned()), ("category_id", String::new()), ("page", "2".to_owned())];
    assert_eq!(non_empty_query(&pairs), vec![("query", "phone".to_owned()), ("page", "2".to_owned())]);
}

// =============================================================
// Bearer
// =============================================================

#[test]
fn explicit_bearer_resolves_to_token() {
    assert_eq!(Bearer::Token("t").resolve(), Some("t".to_owned()));
    assert_eq!(Bearer::None.resolve(), None);
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn requests_are_unavailable_outside_the_browser() {
    let cfg = ApiConfig::default();
    let result: Result<serde_json::Value, ApiError> =
        futures::executor::block_on(get_json(&cfg, "/api/user/", &[], Bearer::Stored));
    assert_eq!(result, Err(ApiError::Unavailable));
}
