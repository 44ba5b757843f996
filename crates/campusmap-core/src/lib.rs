//! # CampusMap Core
//!
//! Core types, traits, and errors for the CampusMap floor-plan editor.
//! Provides the domain model (buildings, floors, pins, layers), the
//! persistence gateway trait the editor talks through, and the error
//! taxonomy shared by the editor and the HTTP gateway.

pub mod error;
pub mod gateway;
pub mod ids;
pub mod model;

pub use error::{EditorError, GatewayError, Result};
pub use gateway::{FloorWithPins, ImageUpload, NewFloor, PersistenceGateway};
pub use ids::{BuildingId, FloorId, PinId};
pub use model::{Building, Floor, Layer, PercentPoint, Pin, PinDetails};
