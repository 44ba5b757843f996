//! Wire schemas for the CampusMap API.
//!
//! Every response is parsed into a typed DTO here and validated before a
//! domain entity is constructed — raw JSON never crosses this module's
//! boundary. The API uses camelCase fields, Mongo-style `_id` keys, and a
//! `success` envelope on every body; a couple of fields arrive in more
//! than one historical shape (string-or-number counts, `published` vs
//! `isLive`) and are normalized here.

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use campusmap_core::{
    Building, BuildingId, Floor, FloorId, FloorWithPins, GatewayError, PercentPoint, Pin,
    PinDetails, PinId,
};

/// Accepts a count serialized either as a JSON number or a numeric string.
fn u32_from_number_or_string<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("invalid count: {s:?}"))),
    }
}

// ---- response envelopes ----

/// The bare `success` envelope returned by mutation endpoints.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl Envelope {
    /// Converts a `success: false` body into [`GatewayError::Rejected`].
    pub fn into_result(self) -> Result<(), GatewayError> {
        if self.success {
            Ok(())
        } else {
            Err(GatewayError::Rejected {
                message: self
                    .error
                    .or(self.message)
                    .unwrap_or_else(|| "server reported failure".to_string()),
            })
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoadBuildingsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub buildings: Vec<RawBuilding>,
}

#[derive(Debug, Deserialize)]
pub struct CreateBuildingResponse {
    #[serde(default = "default_true")]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    pub building: Option<RawBuilding>,
}

#[derive(Debug, Deserialize)]
pub struct LoadFloorsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default, rename = "floorData")]
    pub floor_data: Vec<RawFloor>,
}

#[derive(Debug, Deserialize)]
pub struct CreateFloorResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    pub curfloor: Option<RawFloor>,
}

fn default_true() -> bool {
    true
}

// ---- raw entities ----

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBuilding {
    #[serde(rename = "_id")]
    pub id: String,
    pub building_name: String,
    #[serde(deserialize_with = "u32_from_number_or_string")]
    pub floor_count: u32,
    // Historically `published` on creation and `isLive` on listing.
    #[serde(default, alias = "published")]
    pub is_live: bool,
}

impl RawBuilding {
    pub fn into_domain(self) -> Building {
        Building {
            id: BuildingId::new(self.id),
            name: self.building_name,
            floor_cap: self.floor_count,
            is_live: self.is_live,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFloor {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, rename = "buildingID")]
    pub building_id: Option<String>,
    pub floor_name: String,
    pub floor_number: i32,
    #[serde(default)]
    pub floor_image: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub pois: Vec<RawPin>,
}

impl RawFloor {
    /// Builds the floor and its embedded pins. Pin coordinates are clamped
    /// into the 0–100 percent range on ingest.
    pub fn into_domain(self, building: &BuildingId) -> FloorWithPins {
        let floor_id = FloorId::new(self.id);
        let pins = self
            .pois
            .into_iter()
            .map(|pin| pin.into_domain(&floor_id))
            .collect();
        FloorWithPins {
            floor: Floor {
                id: floor_id,
                building_id: building.clone(),
                name: self.floor_name,
                number: self.floor_number,
                image_url: self.floor_image.unwrap_or_default(),
                updated_at: self.updated_at.unwrap_or_else(Utc::now),
            },
            pins,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RawPin {
    #[serde(rename = "_id")]
    pub id: String,
    pub details: RawPinDetails,
    pub coordinates: RawCoordinates,
    // Some payloads carry the image at the top level instead of in details.
    #[serde(default, rename = "pinImage")]
    pub pin_image: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPinDetails {
    pub pin_name: String,
    #[serde(default)]
    pub pin_type: Option<String>,
    #[serde(default)]
    pub pin_description: Option<String>,
    #[serde(default)]
    pub pin_image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawCoordinates {
    pub x: f64,
    pub y: f64,
}

impl RawPin {
    pub fn into_domain(self, floor: &FloorId) -> Pin {
        let image = self.details.pin_image.or(self.pin_image);
        Pin {
            id: PinId::new(self.id),
            floor_id: floor.clone(),
            details: PinDetails {
                name: self.details.pin_name,
                description: self.details.pin_description,
                pin_type: self.details.pin_type,
                image,
            },
            coordinates: PercentPoint::clamped(self.coordinates.x, self.coordinates.y),
        }
    }
}

// ---- request payloads ----

#[derive(Debug, Serialize)]
pub struct CreateBuildingRequest<'a> {
    #[serde(rename = "rawBuildingName")]
    pub name: &'a str,
    #[serde(rename = "rawFloorCount")]
    pub floor_count: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBuildingRequest<'a> {
    #[serde(rename = "buildingID")]
    pub building_id: &'a str,
    pub building_name: &'a str,
    pub floor_count: u32,
}

#[derive(Debug, Serialize)]
pub struct BuildingRef<'a> {
    #[serde(rename = "buildingID")]
    pub building_id: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RenameFloorRequest<'a> {
    #[serde(rename = "buildingID")]
    pub building_id: &'a str,
    #[serde(rename = "floorID")]
    pub floor_id: &'a str,
    #[serde(rename = "floorName")]
    pub floor_name: &'a str,
}

#[derive(Debug, Serialize)]
pub struct FloorRef<'a> {
    #[serde(rename = "buildingID")]
    pub building_id: &'a str,
    #[serde(rename = "floorID")]
    pub floor_id: &'a str,
}

#[derive(Debug, Serialize)]
pub struct SavePinsRequest<'a> {
    #[serde(rename = "buildingID")]
    pub building_id: &'a str,
    #[serde(rename = "floorID")]
    pub floor_id: &'a str,
    pub pins: Vec<WirePin<'a>>,
    #[serde(rename = "toDeletePin")]
    pub to_delete_pin: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct WirePin<'a> {
    #[serde(rename = "pinID")]
    pub id: &'a str,
    pub details: WirePinDetails<'a>,
    pub coordinates: WireCoordinates,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WirePinDetails<'a> {
    #[serde(rename = "floorID")]
    pub floor_id: &'a str,
    pub pin_name: &'a str,
    pub pin_type: Option<&'a str>,
    pub pin_description: Option<&'a str>,
    pub pin_image: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct WireCoordinates {
    pub x: f64,
    pub y: f64,
}

impl<'a> From<&'a Pin> for WirePin<'a> {
    fn from(pin: &'a Pin) -> Self {
        Self {
            id: pin.id.as_str(),
            details: WirePinDetails {
                floor_id: pin.floor_id.as_str(),
                pin_name: &pin.details.name,
                pin_type: pin.details.pin_type.as_deref(),
                pin_description: pin.details.description.as_deref(),
                pin_image: pin.details.image.as_deref(),
            },
            coordinates: WireCoordinates {
                x: pin.coordinates.x,
                y: pin.coordinates.y,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_floor_listing_with_embedded_pois() {
        let body = r#"{
            "success": true,
            "floorData": [{
                "_id": "f1",
                "floorName": "Ground",
                "floorNumber": 0,
                "floorImage": "https://cdn.example/f1.png",
                "updatedAt": "2026-04-09T18:40:07Z",
                "pois": [{
                    "_id": "p1",
                    "details": {
                        "pinName": "Registrar",
                        "pinType": "office",
                        "pinDescription": "Records window"
                    },
                    "coordinates": { "x": 140.0, "y": -2.5 }
                }]
            }]
        }"#;

        let parsed: LoadFloorsResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.success);
        let building = BuildingId::from("b1");
        let floors: Vec<FloorWithPins> = parsed
            .floor_data
            .into_iter()
            .map(|f| f.into_domain(&building))
            .collect();

        assert_eq!(floors.len(), 1);
        assert_eq!(floors[0].floor.name, "Ground");
        assert_eq!(floors[0].pins.len(), 1);
        let pin = &floors[0].pins[0];
        assert_eq!(pin.details.name, "Registrar");
        // Out-of-range wire coordinates are clamped on ingest.
        assert_eq!(pin.coordinates, PercentPoint::new(100.0, 0.0));
    }

    #[test]
    fn draft_floor_response_echoes_the_assigned_building_id() {
        let body = r#"{
            "success": true,
            "curfloor": {
                "_id": "f1",
                "buildingID": "b9",
                "floorName": "Ground",
                "floorNumber": 0
            }
        }"#;

        let parsed: CreateFloorResponse = serde_json::from_str(body).unwrap();
        let raw = parsed.curfloor.unwrap();
        assert_eq!(raw.building_id.as_deref(), Some("b9"));

        let with_pins = raw.into_domain(&BuildingId::from("b9"));
        assert_eq!(with_pins.floor.building_id, BuildingId::from("b9"));
        assert!(with_pins.pins.is_empty());
    }

    #[test]
    fn building_accepts_both_publish_field_spellings() {
        let created: RawBuilding = serde_json::from_str(
            r#"{"_id":"b1","buildingName":"Science Hall","floorCount":"4","published":true}"#,
        )
        .unwrap();
        assert!(created.is_live);
        assert_eq!(created.floor_count, 4);

        let listed: RawBuilding = serde_json::from_str(
            r#"{"_id":"b2","buildingName":"Library","floorCount":2,"isLive":false}"#,
        )
        .unwrap();
        assert!(!listed.into_domain().is_live);
    }

    #[test]
    fn save_payload_uses_the_wire_field_names() {
        let pin = Pin {
            id: PinId::from("p1"),
            floor_id: FloorId::from("f1"),
            details: PinDetails::named("Exit"),
            coordinates: PercentPoint::new(10.0, 20.0),
        };
        let request = SavePinsRequest {
            building_id: "b1",
            floor_id: "f1",
            pins: vec![WirePin::from(&pin)],
            to_delete_pin: vec!["p9"],
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["buildingID"], "b1");
        assert_eq!(json["toDeletePin"][0], "p9");
        assert_eq!(json["pins"][0]["pinID"], "p1");
        assert_eq!(json["pins"][0]["details"]["pinName"], "Exit");
        assert_eq!(json["pins"][0]["details"]["floorID"], "f1");
    }

    #[test]
    fn rejected_envelope_carries_the_server_reason() {
        let envelope: Envelope =
            serde_json::from_str(r#"{"success":false,"error":"floor not found"}"#).unwrap();
        match envelope.into_result() {
            Err(GatewayError::Rejected { message }) => assert_eq!(message, "floor not found"),
            other => panic!("expected rejection, got {other:?}"),
        }
    }
}
