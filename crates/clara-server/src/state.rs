use std::sync::Arc;

use clara_anchor::{SimulatedContentStore, SimulatedLedger};
use clara_audit::{AuditEngine, AuditTrail, InMemoryAuditTrail, InMemoryDirectory};
use clara_limiter::RateLimiter;
use clara_registry::{InMemoryRegistry, RegistrationWorkflow, RegistryDirectory};

use crate::config::ServerConfig;

/// Shared application state: the composed in-memory service stack.
#[derive(Clone)]
pub struct AppState {
    pub workflow: Arc<RegistrationWorkflow>,
    pub engine: Arc<AuditEngine>,
    pub trail: Arc<dyn AuditTrail>,
    /// Reference seeds for entities the registry does not own
    /// (donations, expenses).
    pub seeds: Arc<InMemoryDirectory>,
    pub public_limiter: Arc<RateLimiter>,
    pub admin_limiter: Arc<RateLimiter>,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Self {
        let store = Arc::new(InMemoryRegistry::new());
        let trail: Arc<dyn AuditTrail> = Arc::new(InMemoryAuditTrail::new());
        let seeds = Arc::new(InMemoryDirectory::new());

        let workflow = Arc::new(RegistrationWorkflow::new(
            store.clone(),
            trail.clone(),
            Arc::new(SimulatedLedger::new()),
            Arc::new(SimulatedContentStore::new()),
        ));
        let directory = Arc::new(RegistryDirectory::new(store, seeds.clone()));
        let engine = Arc::new(AuditEngine::new(trail.clone(), directory));

        Self {
            workflow,
            engine,
            trail,
            seeds,
            public_limiter: Arc::new(RateLimiter::new(config.public_rate.to_limiter())),
            admin_limiter: Arc::new(RateLimiter::new(config.admin_rate.to_limiter())),
        }
    }
}
