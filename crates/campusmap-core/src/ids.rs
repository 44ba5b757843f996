//! Identifier newtypes for buildings, floors, and pins.
//!
//! Server-assigned ids are opaque strings; wrapping them keeps a building id
//! from being handed to an operation that wanted a floor id. Pins are the
//! one entity created client-side first, so [`PinId::local`] allocates a
//! locally-unique id that the server replaces on save.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id! {
    /// Identifier of a top-level building.
    BuildingId
}

string_id! {
    /// Identifier of one floor within a building.
    FloorId
}

string_id! {
    /// Identifier of a point-of-interest pin.
    PinId
}

impl PinId {
    /// Allocates a locally-unique id for a pin that has not been persisted
    /// yet. The server assigns the durable id on the next save.
    pub fn local() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}
