//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Declares a UUID-backed identifier newtype.
///
/// `generate()` creates a fresh UUID v4; `From<String>`/`From<&str>` wrap
/// existing identifiers loaded from storage or request paths.
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing identifier.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a new random identifier.
            #[must_use]
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            /// Get the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

entity_id!(
    /// Team identifier.
    TeamId
);

entity_id!(
    /// Sales agent identifier.
    AgentId
);

entity_id!(
    /// Sale entry identifier.
    SaleId
);

entity_id!(
    /// Announcement identifier.
    AnnouncementId
);

entity_id!(
    /// Cash offer identifier.
    CashOfferId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(TeamId::generate(), TeamId::generate());
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = AgentId::from("agent-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"agent-1\"");

        let parsed: AgentId = serde_json::from_str("\"agent-1\"").unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn display_matches_inner_value() {
        let id = SaleId::new("sale-9");
        assert_eq!(id.to_string(), "sale-9");
        assert_eq!(id.as_str(), "sale-9");
    }
}
