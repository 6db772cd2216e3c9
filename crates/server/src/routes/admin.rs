use axum::{
    extract::{Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use serde::Deserialize;
use tracing::warn;

use crate::{errors::JsonApiError, state::ServerState};

#[derive(Deserialize)]
struct KeyQuery {
    api_key: Option<String>,
}

fn provided_key(req: &Request) -> Option<String> {
    let from_header = req
        .headers()
        .get("X-API-Key")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    // fallback to query param, percent-decoded
    from_header.or_else(|| {
        Query::<KeyQuery>::try_from_uri(req.uri())
            .ok()
            .and_then(|Query(q)| q.api_key)
    })
}

fn keys_match(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Middleware: when an admin key is configured, require it in `X-API-Key`
/// (or query `api_key`). Without a configured key every request passes.
pub async fn require_admin_key(
    State(state): State<ServerState>,
    req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let Some(expected) = state.admin_api_key.as_deref() else {
        return Ok(next.run(req).await);
    };

    match provided_key(&req) {
        Some(k) if keys_match(k.trim().as_bytes(), expected.as_bytes()) => Ok(next.run(req).await),
        Some(_) => {
            warn!(path = %req.uri().path(), "admin key mismatch");
            Err(JsonApiError::new(StatusCode::UNAUTHORIZED, "invalid admin key"))
        }
        None => Err(JsonApiError::new(StatusCode::UNAUTHORIZED, "admin key required")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_comparison() {
        assert!(keys_match(b"secret", b"secret"));
        assert!(!keys_match(b"secret", b"secreT"));
        assert!(!keys_match(b"secret", b"secret2"));
    }

    #[test]
    fn key_from_header_or_query() {
        let req = Request::builder()
            .uri("/api/hero-data")
            .header("X-API-Key", "k1")
            .body(axum::body::Body::empty())
            .unwrap();
        assert_eq!(provided_key(&req).as_deref(), Some("k1"));

        let req = Request::builder()
            .uri("/api/hero-data?x=1&api_key=k2")
            .body(axum::body::Body::empty())
            .unwrap();
        assert_eq!(provided_key(&req).as_deref(), Some("k2"));

        let req = Request::builder()
            .uri("/api/hero-data?api_key=a%2Bb%26c%25")
            .body(axum::body::Body::empty())
            .unwrap();
        assert_eq!(provided_key(&req).as_deref(), Some("a+b&c%"));

        let req = Request::builder().uri("/api/hero-data").body(axum::body::Body::empty()).unwrap();
        assert_eq!(provided_key(&req), None);
    }
}
