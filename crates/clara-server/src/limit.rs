//! Per-caller admission control for the HTTP surface.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;

use clara_limiter::{Decision, RateLimiter};

use crate::error::ServerError;
use crate::state::AppState;

pub const LIMIT_HEADER: &str = "x-ratelimit-limit";
pub const REMAINING_HEADER: &str = "x-ratelimit-remaining";
pub const RESET_HEADER: &str = "x-ratelimit-reset";

/// Admission gate for the public transparency routes.
pub async fn public_admission(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    admit(&state.public_limiter, request, next).await
}

/// Admission gate for the administrative routes.
pub async fn admin_admission(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    admit(&state.admin_limiter, request, next).await
}

async fn admit(
    limiter: &Arc<RateLimiter>,
    request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let caller = caller_key(&request);
    let decision = limiter.admit(&caller);
    if !decision.allowed {
        tracing::warn!(caller = %caller, limit = decision.limit, "admission denied");
        return Err(ServerError::AdmissionDenied(decision));
    }
    let mut response = next.run(request).await;
    apply_headers(response.headers_mut(), &decision);
    Ok(response)
}

/// Identify the caller: proxy-forwarded address first, then the socket
/// peer, then a fixed key (in-process test clients have neither).
fn caller_key(request: &Request) -> String {
    if let Some(forwarded) = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
    {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().to_string())
        .unwrap_or_else(|| "local".to_string())
}

/// Expose the admission metadata on a response.
pub fn apply_headers(headers: &mut HeaderMap, decision: &Decision) {
    if let Ok(value) = HeaderValue::from_str(&decision.limit.to_string()) {
        headers.insert(LIMIT_HEADER, value);
    }
    if let Ok(value) = HeaderValue::from_str(&decision.remaining.to_string()) {
        headers.insert(REMAINING_HEADER, value);
    }
    if let Some(reset_at) = decision.reset_at {
        if let Ok(value) = HeaderValue::from_str(&reset_at.timestamp().to_string()) {
            headers.insert(RESET_HEADER, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_reflect_decision() {
        let mut headers = HeaderMap::new();
        let decision = Decision {
            allowed: true,
            limit: 20,
            remaining: 19,
            reset_at: None,
        };
        apply_headers(&mut headers, &decision);
        assert_eq!(headers.get(LIMIT_HEADER).unwrap(), "20");
        assert_eq!(headers.get(REMAINING_HEADER).unwrap(), "19");
        assert!(headers.get(RESET_HEADER).is_none());
    }

    #[test]
    fn forwarded_header_wins() {
        let request = Request::builder()
            .uri("/ngos")
            .header("x-forwarded-for", "203.0.113.9, 10.0.0.1")
            .body(axum::body::Body::empty())
            .unwrap();
        assert_eq!(caller_key(&request), "203.0.113.9");
    }

    #[test]
    fn bare_request_uses_local_key() {
        let request = Request::builder()
            .uri("/ngos")
            .body(axum::body::Body::empty())
            .unwrap();
        assert_eq!(caller_key(&request), "local");
    }
}
