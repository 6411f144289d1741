use axum::body::Bytes;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use serde_json::json;

use clara_audit::{AuditFilter, AuditLogEntry, AuditTargetKind, VerificationResult};
use clara_types::{
    ActorId, EntityKind, Organization, OrganizationId, Registration, RegistrationId,
    RegistrationRequest, TypeError,
};

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

/// Health check handler.
pub async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "name": "clara-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// -- Public transparency routes ---------------------------------------------

pub async fn list_organizations(
    State(state): State<AppState>,
) -> ServerResult<Json<Vec<Organization>>> {
    Ok(Json(state.workflow.organizations()?))
}

pub async fn get_organization(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> ServerResult<Json<Organization>> {
    Ok(Json(state.workflow.organization(OrganizationId::new(id))?))
}

// -- Administrative onboarding routes ---------------------------------------

pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegistrationRequest>,
) -> ServerResult<(StatusCode, Json<Registration>)> {
    let registration = state.workflow.register(request)?;
    Ok((StatusCode::CREATED, Json(registration)))
}

pub async fn list_registrations(
    State(state): State<AppState>,
) -> ServerResult<Json<Vec<Registration>>> {
    Ok(Json(state.workflow.list()?))
}

#[derive(Debug, Deserialize)]
pub struct TaxIdQuery {
    pub tax_id: String,
}

pub async fn registrations_by_tax_id(
    State(state): State<AppState>,
    Query(query): Query<TaxIdQuery>,
) -> ServerResult<Json<Vec<Registration>>> {
    Ok(Json(state.workflow.get_by_tax_id(&query.tax_id)?))
}

pub async fn get_registration(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> ServerResult<Json<Registration>> {
    Ok(Json(state.workflow.get(RegistrationId::new(id))?))
}

pub async fn validate_tax_id(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> ServerResult<Json<Registration>> {
    Ok(Json(state.workflow.validate_tax_id(RegistrationId::new(id))?))
}

pub async fn upload_documents(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    body: Bytes,
) -> ServerResult<Json<Registration>> {
    Ok(Json(
        state
            .workflow
            .upload_documents(RegistrationId::new(id), &body)?,
    ))
}

#[derive(Debug, Default, Deserialize)]
pub struct ApproveRequest {
    #[serde(default)]
    pub comments: String,
}

pub async fn approve(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Extension(actor): Extension<ActorId>,
    Json(request): Json<ApproveRequest>,
) -> ServerResult<Json<Organization>> {
    Ok(Json(state.workflow.approve(
        RegistrationId::new(id),
        actor,
        &request.comments,
    )?))
}

#[derive(Debug, Deserialize)]
pub struct RejectRequest {
    pub reason: String,
}

pub async fn reject(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Extension(actor): Extension<ActorId>,
    Json(request): Json<RejectRequest>,
) -> ServerResult<Json<Registration>> {
    Ok(Json(state.workflow.reject(
        RegistrationId::new(id),
        actor,
        &request.reason,
    )?))
}

// -- Audit routes ------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub entity_type: String,
    pub entity_id: u64,
}

pub async fn verify(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorId>,
    Json(request): Json<VerifyRequest>,
) -> ServerResult<Json<VerificationResult>> {
    let kind: EntityKind = request.entity_type.parse()?;
    Ok(Json(state.engine.verify(kind, request.entity_id, actor)?))
}

#[derive(Debug, Default, Deserialize)]
pub struct LogQuery {
    pub entity_type: Option<String>,
    pub entity_id: Option<u64>,
}

pub async fn audit_logs(
    State(state): State<AppState>,
    Query(query): Query<LogQuery>,
) -> ServerResult<Json<Vec<AuditLogEntry>>> {
    let filter = match (query.entity_type.as_deref(), query.entity_id) {
        (Some(kind), Some(id)) => AuditFilter::by_entity(parse_target(kind)?, id),
        (Some(kind), None) => AuditFilter::by_kind(parse_target(kind)?),
        (None, Some(id)) => AuditFilter::by_id(id),
        (None, None) => AuditFilter::all(),
    };
    Ok(Json(state.trail.entries(&filter)?))
}

/// Audit targets are the tracked entities plus registrations themselves.
fn parse_target(s: &str) -> Result<AuditTargetKind, TypeError> {
    if s == "registration" {
        return Ok(AuditTargetKind::Registration);
    }
    s.parse::<EntityKind>().map(AuditTargetKind::from)
}
