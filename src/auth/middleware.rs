//! Authentication middleware that validates cookies, extends sessions, and handles redirects.

use axum::{
    extract::{FromRef, Request, State},
    http::{StatusCode, header::SET_COOKIE},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use axum_htmx::HxRedirect;
use time::Duration;

use crate::{
    AppState,
    auth::{
        cookie::{extend_auth_cookie_duration_if_needed, get_token_from_cookies},
        redirect::{build_log_in_redirect_url, build_log_in_redirect_url_from_target},
    },
    endpoints,
};

/// The state needed for the auth middleware
#[derive(Clone)]
pub struct AuthState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// How far each authenticated request pushes the session expiry.
    pub cookie_duration: Duration,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<AuthState> for Key {
    fn from_ref(state: &AuthState) -> Self {
        state.cookie_key.clone()
    }
}

/// The log-in page URL that sends the user back to where they were headed.
fn log_in_redirect_url(request: &Request) -> String {
    build_log_in_redirect_url(request).unwrap_or_else(|| {
        tracing::warn!(
            "Could not build a redirect URL for {}. Falling back to the dashboard.",
            request.uri()
        );

        build_log_in_redirect_url_from_target(endpoints::DASHBOARD_VIEW)
            .unwrap_or_else(|| endpoints::LOG_IN_VIEW.to_owned())
    })
}

async fn guard(
    state: AuthState,
    request: Request,
    next: Next,
    redirect: impl Fn(String) -> Response,
) -> Response {
    let (mut parts, body) = request.into_parts();
    let jar = PrivateCookieJar::from_headers(&parts.headers, state.cookie_key.clone());

    let user_id = match get_token_from_cookies(&jar) {
        Ok(token) => token.user_id,
        Err(error) => {
            tracing::debug!("Rejected request to {}: {error}", parts.uri.path());
            let request = Request::from_parts(parts, body);
            return redirect(log_in_redirect_url(&request));
        }
    };

    parts.extensions.insert(user_id);
    let mut response = next.run(Request::from_parts(parts, body)).await;

    // The session slides forward with every authenticated request.
    let jar = extend_auth_cookie_duration_if_needed(jar.clone(), state.cookie_duration)
        .inspect_err(|error| {
            tracing::error!("Could not extend the session of user {user_id}: {error}")
        })
        .unwrap_or(jar);

    for cookie in jar.into_response().headers().get_all(SET_COOKIE) {
        response.headers_mut().append(SET_COOKIE, cookie.clone());
    }

    response
}

/// Middleware function that checks for a valid authorization cookie.
/// The user ID is placed into request and then the request executed normally if the cookie is valid, otherwise a redirect to the log-in page is returned.
///
/// **Note**: Route handlers can use the function argument `Extension(user_id): Extension<UserID>` to receive the user ID.
pub async fn auth_guard(State(state): State<AuthState>, request: Request, next: Next) -> Response {
    guard(state, request, next, |redirect_url| {
        Redirect::to(&redirect_url).into_response()
    })
    .await
}

/// Like [auth_guard], but answers unauthenticated requests with an HTMX
/// redirect so that form submissions navigate the whole page.
pub async fn auth_guard_hx(
    State(state): State<AuthState>,
    request: Request,
    next: Next,
) -> Response {
    guard(state, request, next, |redirect_url| {
        (HxRedirect(redirect_url), StatusCode::OK).into_response()
    })
    .await
}
