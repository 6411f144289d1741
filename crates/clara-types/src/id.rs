//! Sequential entity identifiers.
//!
//! Clara assigns identifiers in insertion order (1-based), matching the
//! storage layer's primary keys. Each entity family gets its own newtype so
//! a registration id can never be passed where an organization id is
//! expected.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! sequential_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord,
            Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Wrap a raw identifier value.
            pub fn new(value: u64) -> Self {
                Self(value)
            }

            /// The underlying numeric value.
            pub fn value(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }
    };
}

sequential_id!(
    /// Identifier of a registration (onboarding attempt).
    RegistrationId
);
sequential_id!(
    /// Identifier of an approved organization.
    OrganizationId
);
sequential_id!(
    /// Identifier of the actor performing an administrative action.
    ///
    /// `ActorId(0)` denotes an unauthenticated or system actor.
    ActorId
);

impl ActorId {
    /// The unauthenticated/system actor.
    pub const SYSTEM: ActorId = ActorId(0);

    /// Returns `true` if this is the system actor.
    pub fn is_system(&self) -> bool {
        self.0 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct_types() {
        let reg = RegistrationId::new(1);
        let org = OrganizationId::new(1);
        assert_eq!(reg.value(), org.value());
    }

    #[test]
    fn display_is_bare_number() {
        assert_eq!(format!("{}", RegistrationId::new(42)), "42");
    }

    #[test]
    fn system_actor() {
        assert!(ActorId::SYSTEM.is_system());
        assert!(!ActorId::new(7).is_system());
    }

    #[test]
    fn serde_transparent() {
        let id = OrganizationId::new(9);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "9");
        let back: OrganizationId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
