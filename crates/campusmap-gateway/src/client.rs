//! HTTP client for the CampusMap canvas API.
//!
//! Implements [`PersistenceGateway`] over [`reqwest`]. Every call fetches
//! the bearer value from the [`TokenSource`] first and fails with
//! [`GatewayError::MissingAuth`] — before any request is issued — when no
//! token is available. Non-2xx statuses become [`GatewayError::Api`];
//! bodies that answer `success: false` become [`GatewayError::Rejected`].

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use tracing::debug;

use async_trait::async_trait;
use campusmap_core::{
    Building, BuildingId, Floor, FloorId, FloorWithPins, GatewayError, NewFloor,
    PersistenceGateway, Pin, PinId,
};

use crate::auth::TokenSource;
use crate::config::GatewayConfig;
use crate::schema::{
    BuildingRef, CreateBuildingRequest, CreateBuildingResponse, CreateFloorResponse, Envelope,
    FloorRef, LoadBuildingsResponse, LoadFloorsResponse, RenameFloorRequest, SavePinsRequest,
    UpdateBuildingRequest, WirePin,
};

/// `reqwest`-backed implementation of the persistence gateway.
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
    token: Arc<dyn TokenSource>,
}

impl HttpGateway {
    /// Builds a client from configuration and a token collaborator.
    pub fn new(config: &GatewayConfig, token: Arc<dyn TokenSource>) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(transport)?;
        Ok(Self {
            client,
            base_url: config.normalized_base_url().to_string(),
            token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Current bearer value, or the auth precondition failure.
    fn bearer(&self) -> Result<String, GatewayError> {
        self.token.bearer().ok_or(GatewayError::MissingAuth)
    }

    /// Maps a non-success status into [`GatewayError::Api`].
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message: if body.is_empty() {
                    status.to_string()
                } else {
                    body
                },
            });
        }
        Ok(response)
    }

    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, GatewayError> {
        let body = response.text().await.map_err(transport)?;
        serde_json::from_str(&body).map_err(|err| GatewayError::Decode {
            message: err.to_string(),
        })
    }

    /// POST a JSON body and interpret the bare `success` envelope.
    async fn post_envelope<B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), GatewayError> {
        let bearer = self.bearer()?;
        debug!(path, "gateway call");
        let response = self
            .client
            .post(self.url(path))
            .header(AUTHORIZATION, bearer)
            .json(body)
            .send()
            .await
            .map_err(transport)?;
        let response = Self::ensure_success(response).await?;
        let envelope: Envelope = Self::parse(response).await?;
        envelope.into_result()
    }
}

fn transport(err: reqwest::Error) -> GatewayError {
    GatewayError::Transport {
        message: err.to_string(),
    }
}

fn rejected(error: Option<String>) -> GatewayError {
    GatewayError::Rejected {
        message: error.unwrap_or_else(|| "server reported failure".to_string()),
    }
}

#[async_trait]
impl PersistenceGateway for HttpGateway {
    async fn load_buildings(&self) -> Result<Vec<Building>, GatewayError> {
        let bearer = self.bearer()?;
        debug!("loading building history");
        let response = self
            .client
            .get(self.url("/canvas/load-bldg"))
            .header(AUTHORIZATION, bearer)
            .send()
            .await
            .map_err(transport)?;
        let response = Self::ensure_success(response).await?;
        let parsed: LoadBuildingsResponse = Self::parse(response).await?;
        if !parsed.success {
            return Err(rejected(parsed.error));
        }
        Ok(parsed
            .buildings
            .into_iter()
            .map(|raw| raw.into_domain())
            .collect())
    }

    async fn create_building(&self, name: &str, floor_cap: u32) -> Result<Building, GatewayError> {
        let bearer = self.bearer()?;
        debug!(name, floor_cap, "creating building");
        let response = self
            .client
            .post(self.url("/canvas/create-bldg"))
            .header(AUTHORIZATION, bearer)
            .json(&CreateBuildingRequest {
                name,
                floor_count: floor_cap,
            })
            .send()
            .await
            .map_err(transport)?;
        let response = Self::ensure_success(response).await?;
        let parsed: CreateBuildingResponse = Self::parse(response).await?;
        if !parsed.success {
            return Err(rejected(parsed.error));
        }
        let raw = parsed.building.ok_or(GatewayError::Decode {
            message: "create-bldg response is missing the building record".to_string(),
        })?;
        Ok(raw.into_domain())
    }

    async fn update_building(
        &self,
        building: &BuildingId,
        name: &str,
        floor_cap: u32,
    ) -> Result<(), GatewayError> {
        self.post_envelope(
            "/canvas/update-bldg",
            &UpdateBuildingRequest {
                building_id: building.as_str(),
                building_name: name,
                floor_count: floor_cap,
            },
        )
        .await
    }

    async fn delete_building(&self, building: &BuildingId) -> Result<(), GatewayError> {
        self.post_envelope(
            "/canvas/delete-bldg",
            &BuildingRef {
                building_id: building.as_str(),
            },
        )
        .await
    }

    async fn publish_building(&self, building: &BuildingId) -> Result<(), GatewayError> {
        self.post_envelope(
            "/canvas/publish-bldg",
            &BuildingRef {
                building_id: building.as_str(),
            },
        )
        .await
    }

    async fn load_floors(&self, building: &BuildingId) -> Result<Vec<FloorWithPins>, GatewayError> {
        let bearer = self.bearer()?;
        debug!(%building, "loading floors");
        let response = self
            .client
            .get(self.url("/canvas/load-floor"))
            .query(&[("buildingID", building.as_str())])
            .header(AUTHORIZATION, bearer)
            .send()
            .await
            .map_err(transport)?;
        let response = Self::ensure_success(response).await?;
        let parsed: LoadFloorsResponse = Self::parse(response).await?;
        if !parsed.success {
            return Err(rejected(parsed.error));
        }
        Ok(parsed
            .floor_data
            .into_iter()
            .map(|raw| raw.into_domain(building))
            .collect())
    }

    async fn create_floor(&self, floor: NewFloor) -> Result<Floor, GatewayError> {
        let bearer = self.bearer()?;
        debug!(name = floor.name, "uploading floor draft");

        let image = reqwest::multipart::Part::bytes(floor.image.bytes)
            .file_name(floor.image.file_name)
            .mime_str(&floor.image.content_type)
            .map_err(transport)?;
        let mut form = reqwest::multipart::Form::new()
            .text("floorName", floor.name)
            .text("floorNumber", floor.number.to_string())
            .text("updatedAt", floor.updated_at.to_rfc3339())
            .part("floorImage", image);
        if let Some(building) = &floor.building_id {
            form = form.text("buildingID", building.to_string());
        }

        let response = self
            .client
            .post(self.url("/canvas/store-bldg-draft"))
            .header(AUTHORIZATION, bearer)
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;
        let response = Self::ensure_success(response).await?;
        let parsed: CreateFloorResponse = Self::parse(response).await?;
        if !parsed.success {
            return Err(rejected(parsed.error));
        }
        let raw = parsed.curfloor.ok_or(GatewayError::Decode {
            message: "store-bldg-draft response is missing the floor record".to_string(),
        })?;
        // Draft floors are created before a building id is known locally;
        // the server assigns one and echoes it in the floor record.
        let building = match floor.building_id {
            Some(building) => building,
            None => raw
                .building_id
                .clone()
                .map(BuildingId::new)
                .ok_or(GatewayError::Decode {
                    message: "store-bldg-draft response is missing the building id".to_string(),
                })?,
        };
        Ok(raw.into_domain(&building).floor)
    }

    async fn rename_floor(
        &self,
        building: &BuildingId,
        floor: &FloorId,
        new_name: &str,
    ) -> Result<(), GatewayError> {
        self.post_envelope(
            "/canvas/update-floor-name",
            &RenameFloorRequest {
                building_id: building.as_str(),
                floor_id: floor.as_str(),
                floor_name: new_name,
            },
        )
        .await
    }

    async fn delete_floor(
        &self,
        building: &BuildingId,
        floor: &FloorId,
    ) -> Result<(), GatewayError> {
        self.post_envelope(
            "/canvas/delete-floor",
            &FloorRef {
                building_id: building.as_str(),
                floor_id: floor.as_str(),
            },
        )
        .await
    }

    async fn save_pins(
        &self,
        building: &BuildingId,
        floor: &FloorId,
        upserts: &[Pin],
        deletions: &[PinId],
    ) -> Result<(), GatewayError> {
        debug!(%floor, upserts = upserts.len(), deletions = deletions.len(), "saving pin diff");
        self.post_envelope(
            "/canvas/update-pin",
            &SavePinsRequest {
                building_id: building.as_str(),
                floor_id: floor.as_str(),
                pins: upserts.iter().map(WirePin::from).collect(),
                to_delete_pin: deletions.iter().map(PinId::as_str).collect(),
            },
        )
        .await
    }
}
