//! Foundation types for the Clara donation-transparency platform.
//!
//! This crate provides the core identifiers and domain records used
//! throughout the Clara system. Every other Clara crate depends on
//! `clara-types`.
//!
//! # Key Types
//!
//! - [`RegistrationId`] / [`OrganizationId`] / [`ActorId`] — sequential entity identifiers
//! - [`EntityKind`] — closed enumeration of auditable entity kinds
//! - [`RegistrationStatus`] — lifecycle states of an onboarding attempt
//! - [`Registration`] — one organization onboarding attempt
//! - [`Organization`] — an approved, active organization

pub mod entity;
pub mod error;
pub mod id;
pub mod registration;

pub use entity::{EntityKind, Organization};
pub use error::TypeError;
pub use id::{ActorId, OrganizationId, RegistrationId};
pub use registration::{Registration, RegistrationRequest, RegistrationStatus};
