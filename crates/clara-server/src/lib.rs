//! HTTP server for the Clara donation-transparency platform.
//!
//! Exposes the onboarding workflow and audit engine over a small REST
//! surface: public transparency routes under `/ngos`, administrative
//! routes under `/admin` guarded by an `X-Admin-ID` header, and per-caller
//! sliding-window admission control on both groups.

pub mod auth;
pub mod config;
pub mod error;
pub mod handler;
pub mod limit;
pub mod router;
pub mod server;
pub mod state;

pub use config::{RateSettings, ServerConfig};
pub use error::{ServerError, ServerResult};
pub use server::ClaraServer;
pub use state::AppState;
