//! Where to send a user after they log in.
//!
//! The target is carried through the log-in page as the `redirect_url` query
//! parameter. Only same-site paths are accepted so the parameter cannot be
//! used to bounce users to another site.

use axum::{extract::Request, http::Uri};

use crate::endpoints;

fn is_safe_path(path_and_query: &str) -> bool {
    if !path_and_query.starts_with('/') || path_and_query.starts_with("//") {
        return false;
    }

    let path = path_and_query
        .split_once('?')
        .map_or(path_and_query, |(path, _)| path);

    path != endpoints::LOG_IN_VIEW
}

/// Reduce `raw_url` to its path and query if it is a relative URL for this
/// site, other than the log-in page itself.
pub fn normalize_redirect_url(raw_url: &str) -> Option<String> {
    let uri = raw_url.parse::<Uri>().ok()?;
    if uri.scheme().is_some() || uri.authority().is_some() {
        return None;
    }

    let path_and_query = uri.path_and_query()?.as_str();
    is_safe_path(path_and_query).then(|| path_and_query.to_owned())
}

/// htmx sends the absolute URL of the page in `HX-Current-URL`, so its origin
/// is dropped rather than rejected.
fn normalize_hx_current_url(raw_url: &str) -> Option<String> {
    let uri = raw_url.parse::<Uri>().ok()?;
    let path_and_query = uri.path_and_query()?.as_str();

    is_safe_path(path_and_query).then(|| path_and_query.to_owned())
}

/// The log-in page URL that returns the user to the page they requested.
///
/// For `/api` requests the page is taken from the htmx headers since the API
/// route itself is not something to return to.
pub fn build_log_in_redirect_url(request: &Request) -> Option<String> {
    let target = if request.uri().path().starts_with("/api") {
        redirect_target_from_hx_request(request)?
    } else {
        normalize_redirect_url(request.uri().path_and_query()?.as_str())?
    };

    build_log_in_redirect_url_from_target(&target)
}

pub fn build_log_in_redirect_url_from_target(target: &str) -> Option<String> {
    serde_urlencoded::to_string([("redirect_url", target)])
        .inspect_err(|error| tracing::error!("Could not encode redirect URL {target}: {error}"))
        .ok()
        .map(|query| format!("{}?{}", endpoints::LOG_IN_VIEW, query))
}

fn redirect_target_from_hx_request(request: &Request) -> Option<String> {
    let headers = request.headers();
    let is_hx_request = headers
        .get("hx-request")
        .and_then(|header| header.to_str().ok())
        .is_some_and(|header| header.eq_ignore_ascii_case("true"));

    if !is_hx_request {
        tracing::warn!("Missing HX-Request header for /api request.");
        return None;
    }

    let Some(current_url) = headers
        .get("hx-current-url")
        .and_then(|header| header.to_str().ok())
    else {
        tracing::warn!("Missing HX-Current-URL header for /api request.");
        return None;
    };

    let redirect_url = normalize_hx_current_url(current_url);
    if redirect_url.is_none() {
        tracing::warn!("Invalid HX-Current-URL header value: {current_url}");
    }

    redirect_url
}
