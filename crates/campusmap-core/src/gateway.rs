//! The persistence gateway boundary.
//!
//! [`PersistenceGateway`] is the only path between the editor and the
//! remote API. The editor holds it as a trait object so sessions can be
//! driven against the HTTP implementation in `campusmap-gateway` or a
//! scripted double in tests.
//!
//! Calls carry no client-side atomicity guarantees beyond what one request
//! gives: a pin save ships the whole per-floor diff (upserts plus the
//! deletion queue) in a single round-trip, so it is all-or-nothing per
//! floor. There is no optimistic concurrency control; the server applies
//! last-writer-wins.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::GatewayError;
use crate::ids::{BuildingId, FloorId, PinId};
use crate::model::{Building, Floor, Pin};

/// A floor together with the pins embedded in its load response.
#[derive(Debug, Clone, PartialEq)]
pub struct FloorWithPins {
    pub floor: Floor,
    pub pins: Vec<Pin>,
}

/// An image file staged for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    /// Declared MIME type, e.g. `image/png`.
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Payload for creating a floor (multipart upload on the wire).
#[derive(Debug, Clone)]
pub struct NewFloor {
    /// Owning building; absent only for draft floors created before the
    /// building record exists.
    pub building_id: Option<BuildingId>,
    pub name: String,
    pub number: i32,
    pub image: ImageUpload,
    pub updated_at: DateTime<Utc>,
}

/// Remote persistence operations the editor depends on.
///
/// Every call requires bearer authorization supplied by the implementation's
/// token collaborator; a missing token is a precondition failure
/// ([`GatewayError::MissingAuth`]) and no request is made.
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Lists the buildings previously saved by this account.
    async fn load_buildings(&self) -> Result<Vec<Building>, GatewayError>;

    /// Creates a building with a name and a declared floor cap.
    async fn create_building(
        &self,
        name: &str,
        floor_cap: u32,
    ) -> Result<Building, GatewayError>;

    /// Renames a building and/or adjusts its floor cap.
    async fn update_building(
        &self,
        building: &BuildingId,
        name: &str,
        floor_cap: u32,
    ) -> Result<(), GatewayError>;

    /// Deletes a building and everything it owns. Not reversible.
    async fn delete_building(&self, building: &BuildingId) -> Result<(), GatewayError>;

    /// Makes the building's current floor/pin data visible to end users.
    async fn publish_building(&self, building: &BuildingId) -> Result<(), GatewayError>;

    /// Loads all floors of a building, with their pins embedded.
    async fn load_floors(
        &self,
        building: &BuildingId,
    ) -> Result<Vec<FloorWithPins>, GatewayError>;

    /// Uploads a new floor (metadata plus plan image).
    async fn create_floor(&self, floor: NewFloor) -> Result<Floor, GatewayError>;

    /// Renames an existing floor.
    async fn rename_floor(
        &self,
        building: &BuildingId,
        floor: &FloorId,
        new_name: &str,
    ) -> Result<(), GatewayError>;

    /// Deletes a floor and cascades its pins. Not reversible.
    async fn delete_floor(
        &self,
        building: &BuildingId,
        floor: &FloorId,
    ) -> Result<(), GatewayError>;

    /// Persists one floor's pin diff: the full current pin set plus the ids
    /// queued for server-side removal.
    async fn save_pins(
        &self,
        building: &BuildingId,
        floor: &FloorId,
        upserts: &[Pin],
        deletions: &[PinId],
    ) -> Result<(), GatewayError>;
}
