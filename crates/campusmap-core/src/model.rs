//! Domain model for the floor-plan editor.
//!
//! A [`Building`] owns up to `floor_cap` [`Floor`]s; each floor carries one
//! immutable plan image and a set of [`Pin`]s placed at percentage
//! coordinates on that image. [`Layer`] entries mirror pin names for the
//! sidebar outline and are never independently authoritative.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{BuildingId, FloorId, PinId};

/// A resolution-independent position on a floor image, expressed as
/// percentages of the rendered width and height (0–100 on each axis).
///
/// Percentages survive viewport resizes and zoom changes, so persisted
/// coordinates stay valid on any screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentPoint {
    pub x: f64,
    pub y: f64,
}

impl PercentPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Builds a point with both axes clamped into the 0–100 range.
    /// Used when ingesting coordinates from the wire.
    pub fn clamped(x: f64, y: f64) -> Self {
        Self {
            x: x.clamp(0.0, 100.0),
            y: y.clamp(0.0, 100.0),
        }
    }

    /// True when both axes already lie within 0–100.
    pub fn in_bounds(&self) -> bool {
        (0.0..=100.0).contains(&self.x) && (0.0..=100.0).contains(&self.y)
    }
}

/// Descriptive fields of a pin, edited through the detail dialog.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PinDetails {
    /// Display name; required, also mirrored into the pin's [`Layer`].
    pub name: String,
    pub description: Option<String>,
    /// Service category of the location (e.g. "room", "exit").
    pub pin_type: Option<String>,
    /// Reference to an illustrative image, if one was supplied.
    pub image: Option<String>,
}

impl PinDetails {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A point-of-interest marker placed on a floor image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    pub id: PinId,
    /// Back-reference to the owning floor (not ownership).
    pub floor_id: FloorId,
    pub details: PinDetails,
    pub coordinates: PercentPoint,
}

/// One level of a building.
///
/// The plan image is immutable once set: replacing it requires deleting the
/// floor and re-creating it (product constraint, not a technical limit).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    pub id: FloorId,
    pub building_id: BuildingId,
    pub name: String,
    pub number: i32,
    /// URL of the rendered plan image.
    pub image_url: String,
    pub updated_at: DateTime<Utc>,
}

/// Top-level container of floors, with a publish state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub id: BuildingId,
    pub name: String,
    /// Declared maximum number of floors; the floor count never exceeds it.
    pub floor_cap: u32,
    /// Whether the building is visible to end-user-facing consumers.
    pub is_live: bool,
}

/// Display-only sidebar entry mirroring one pin's name.
///
/// Keyed by `pin_id` so registry mutations can update the matching layer
/// without positional bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    pub floor_id: FloorId,
    pub pin_id: PinId,
    pub name: String,
}
