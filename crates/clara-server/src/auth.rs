//! Administrative identity extraction.
//!
//! Administrative routes require an `X-Admin-ID` header carrying the
//! numeric identifier of the acting administrator. The platform's identity
//! provider sits in front of this service; by the time a request arrives
//! here the header is trusted, and this layer only makes the actor
//! available to handlers for audit attribution.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use clara_types::ActorId;

use crate::error::ServerError;

pub const ADMIN_HEADER: &str = "x-admin-id";

pub async fn require_admin(mut request: Request, next: Next) -> Result<Response, ServerError> {
    let actor = request
        .headers()
        .get(ADMIN_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<u64>().ok())
        .map(ActorId::new)
        .ok_or(ServerError::Unauthorized)?;
    request.extensions_mut().insert(actor);
    Ok(next.run(request).await)
}
