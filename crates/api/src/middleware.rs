//! Authentication middleware: token extraction and identity attachment.

use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::context::CurrentUser;

/// Authenticate the request and attach a [`CurrentUser`] extension.
///
/// A missing token is access-denied (403); a token that fails verification is
/// an authorization failure (401). Handlers behind this middleware can rely
/// on the extension being present.
pub async fn auth_middleware(
    State(services): State<Arc<AppServices>>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let Some(token) = extract_token(req.headers()) else {
        return ApiError::MissingToken.into_response();
    };

    let claims = match services.tokens.verify(token) {
        Ok(claims) => claims,
        Err(_) => return ApiError::Unauthorized.into_response(),
    };

    req.extensions_mut()
        .insert(CurrentUser::new(claims.sub, claims.role));

    next.run(req).await
}

/// Pull the token from `Authorization: Bearer <token>` or the legacy
/// `x-access-token` header.
fn extract_token(headers: &HeaderMap) -> Option<&str> {
    if let Some(legacy) = headers.get("x-access-token") {
        let token = legacy.to_str().ok()?.trim();
        if !token.is_empty() {
            return Some(token);
        }
    }

    let header = headers.get(axum::http::header::AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn extracts_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc.def.ghi"),
        );
        assert_eq!(extract_token(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn extracts_legacy_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-access-token", HeaderValue::from_static("tok123"));
        assert_eq!(extract_token(&headers), Some("tok123"));
    }

    #[test]
    fn legacy_header_wins_over_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert("x-access-token", HeaderValue::from_static("legacy"));
        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_static("Bearer modern"),
        );
        assert_eq!(extract_token(&headers), Some("legacy"));
    }

    #[test]
    fn missing_or_empty_token_is_none() {
        assert_eq!(extract_token(&HeaderMap::new()), None);

        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_static("Bearer "),
        );
        assert_eq!(extract_token(&headers), None);
    }

    #[test]
    fn non_bearer_authorization_is_none() {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_static("Basic dXNlcjpwYXNz"),
        );
        assert_eq!(extract_token(&headers), None);
    }
}
