use axum::middleware;
use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;
use crate::{auth, handler, limit};

/// Build the axum router with all Clara endpoints.
pub fn build_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/ngos", get(handler::list_organizations))
        .route("/ngos/:id", get(handler::get_organization))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            limit::public_admission,
        ));

    let admin = Router::new()
        .route("/ngos/register", post(handler::register))
        .route("/ngos/registrations", get(handler::list_registrations))
        .route(
            "/ngos/registrations/by-tax-id",
            get(handler::registrations_by_tax_id),
        )
        .route("/ngos/registrations/:id", get(handler::get_registration))
        .route(
            "/ngos/registrations/:id/validate-taxid",
            post(handler::validate_tax_id),
        )
        .route(
            "/ngos/registrations/:id/documents",
            post(handler::upload_documents),
        )
        .route("/ngos/registrations/:id/approve", post(handler::approve))
        .route("/ngos/registrations/:id/reject", post(handler::reject))
        .route("/audit", post(handler::verify))
        .route("/audit/logs", get(handler::audit_logs))
        .layer(middleware::from_fn(auth::require_admin))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            limit::admin_admission,
        ));

    Router::new()
        .route("/health", get(handler::health_handler))
        .merge(public)
        .nest("/admin", admin)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(tower_http::cors::CorsLayer::permissive())
        .with_state(state)
}
