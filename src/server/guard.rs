#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::server::AppState;
use crate::server::error::ApiError;

/// Identity of the authenticated caller, inserted as a request
/// extension by [`require_token`].
#[derive(Debug, Clone)]
pub struct AuthUser(pub String);

const DEFAULT_USER: &str = "local";

/// Shared-token guard. With no token configured every request passes,
/// otherwise the `Authorization` header must carry the token with a
/// `Token` or `Bearer` scheme. The caller identity is taken from the
/// `X-User` header.
pub async fn require_token(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Some(expected) = state.auth_token.as_deref() {
        let presented = request
            .headers()
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(strip_scheme);

        if presented != Some(expected) {
            return Err(ApiError::unauthorized("Invalid credentials"));
        }
    }

    let user = request
        .headers()
        .get("X-User")
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty())
        .unwrap_or(DEFAULT_USER)
        .to_string();
    request.extensions_mut().insert(AuthUser(user));

    Ok(next.run(request).await)
}

fn strip_scheme(header: &str) -> Option<&str> {
    header
        .strip_prefix("Token ")
        .or_else(|| header.strip_prefix("Bearer "))
        .map(str::trim)
}
