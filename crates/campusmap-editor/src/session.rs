//! The edit session: one open building, its floors and pins, and the
//! edit-mode state machine.
//!
//! A session cycles between [`EditMode::Viewing`] and [`EditMode::Editing`]
//! for its whole life. Local pin mutations are optimistic: they land in the
//! registry immediately and are flushed to the gateway as one per-floor
//! diff on save. A failed save still exits edit mode but keeps the local
//! pins and the deletion queue, so the work survives for a retry.

use std::sync::Arc;

use tracing::{debug, error, warn};

use campusmap_core::{
    Building, EditorError, Floor, FloorId, Layer, NewFloor, PercentPoint,
    PersistenceGateway, Pin, PinDetails, PinId, Result,
};

use crate::floors::{FloorRegistry, NewFloorInput};
use crate::registry::PinRegistry;
use crate::shell::{Notice, ShellContext};
use crate::viewport::ImageViewport;

/// Whether floor/pin mutation is currently permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    /// Read-only; navigation and floor switching are free.
    Viewing,
    /// Mutation permitted; navigation and floor switching are blocked
    /// until the session saves.
    Editing,
}

/// An open editing session on one building.
pub struct EditorSession {
    gateway: Arc<dyn PersistenceGateway>,
    shell: ShellContext,
    building: Building,
    floors: FloorRegistry,
    pins: PinRegistry,
    viewport: ImageViewport,
    mode: EditMode,
    selected_floor: Option<FloorId>,
    active_pin: Option<PinId>,
    pending_pin: Option<PercentPoint>,
    deletion_queue: Vec<PinId>,
    has_changes: bool,
}

impl EditorSession {
    /// Creates a session without touching the network. Call
    /// [`EditorSession::load_floors`] (or use [`EditorSession::open`])
    /// before rendering anything.
    pub fn new(
        gateway: Arc<dyn PersistenceGateway>,
        building: Building,
        shell: ShellContext,
    ) -> Self {
        Self {
            gateway,
            shell,
            building,
            floors: FloorRegistry::new(),
            pins: PinRegistry::new(),
            viewport: ImageViewport::default(),
            mode: EditMode::Viewing,
            selected_floor: None,
            active_pin: None,
            pending_pin: None,
            deletion_queue: Vec::new(),
            has_changes: false,
        }
    }

    /// Creates a session and performs the initial floor load. A load
    /// failure is logged and leaves an empty session; the shell shows
    /// stale-or-empty data rather than crashing.
    pub async fn open(
        gateway: Arc<dyn PersistenceGateway>,
        building: Building,
        shell: ShellContext,
    ) -> Self {
        let mut session = Self::new(gateway, building, shell);
        if session.building.is_live {
            // Non-blocking: editing stays available on a live building.
            session.shell.notify(
                Notice::Warning,
                "Building is already published. Changes will not reach live users until republished.",
            );
        }
        if let Err(err) = session.load_floors().await {
            error!(building = %session.building.id, %err, "initial floor load failed");
        }
        session
    }

    // ---- accessors ----

    pub fn building(&self) -> &Building {
        &self.building
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn has_changes(&self) -> bool {
        self.has_changes
    }

    pub fn selected_floor(&self) -> Option<&FloorId> {
        self.selected_floor.as_ref()
    }

    pub fn active_pin(&self) -> Option<&PinId> {
        self.active_pin.as_ref()
    }

    pub fn pending_pin(&self) -> Option<&PercentPoint> {
        self.pending_pin.as_ref()
    }

    pub fn deletion_queue(&self) -> &[PinId] {
        &self.deletion_queue
    }

    pub fn floors(&self) -> impl Iterator<Item = &Floor> {
        self.floors.iter()
    }

    pub fn floor_count(&self) -> usize {
        self.floors.len()
    }

    /// Pins of the selected floor, in insertion order. Empty while no
    /// floor is selected.
    pub fn pins_on_selected_floor(&self) -> &[Pin] {
        match &self.selected_floor {
            Some(floor) => self.pins.pins_on(floor),
            None => &[],
        }
    }

    /// Sidebar layer entries, all floors.
    pub fn layers(&self) -> &[Layer] {
        self.pins.layers()
    }

    /// Sidebar layer entries for one floor.
    pub fn layers_on<'a>(&'a self, floor: &'a FloorId) -> impl Iterator<Item = &'a Layer> {
        self.pins.layers_on(floor)
    }

    /// Plan image URL of the selected floor.
    pub fn selected_floor_image(&self) -> Option<&str> {
        let floor = self.selected_floor.as_ref()?;
        self.floors.get(floor).map(|f| f.image_url.as_str())
    }

    pub fn viewport(&self) -> &ImageViewport {
        &self.viewport
    }

    /// Records the rendered image's bounding box after a layout pass.
    pub fn set_image_bounds(&mut self, left: f64, top: f64, width: f64, height: f64) {
        self.viewport.set_bounds(left, top, width, height);
    }

    // ---- leave guard ----

    /// Single predicate both in-app navigation and platform-level
    /// navigation (back button, tab close) consult before leaving.
    pub fn can_leave(&self) -> bool {
        self.mode == EditMode::Viewing
    }

    /// Guard form of [`EditorSession::can_leave`] for callers that want
    /// the rejection as an error.
    pub fn try_leave(&self) -> Result<()> {
        if self.can_leave() {
            Ok(())
        } else {
            Err(EditorError::UnsavedWork)
        }
    }

    // ---- floor lifecycle ----

    /// Reloads every floor (and its pins) from the gateway.
    ///
    /// On success the registries are rebuilt and `has_changes` resets; on
    /// failure the prior in-memory state is left untouched.
    pub async fn load_floors(&mut self) -> Result<()> {
        self.shell.begin(Some("Setting up floor data..."));
        let result = self.gateway.load_floors(&self.building.id).await;
        self.shell.end();

        let loaded = match result {
            Ok(loaded) => loaded,
            Err(err) => {
                error!(building = %self.building.id, %err, "floor load failed; keeping prior state");
                return Err(err.into());
            }
        };

        debug!(building = %self.building.id, floors = loaded.len(), "floors loaded");
        self.floors
            .replace_all(loaded.iter().map(|f| f.floor.clone()).collect());
        self.pins.replace_all(&loaded);

        // Selection survives a reload only if the floor still exists.
        if let Some(selected) = &self.selected_floor {
            if !self.floors.contains(selected) {
                self.selected_floor = None;
            }
        }
        self.active_pin = None;
        self.pending_pin = None;
        self.deletion_queue.clear();
        self.has_changes = false;
        Ok(())
    }

    /// Selects a floor for viewing/editing.
    ///
    /// Refused while the previous floor is still in edit mode — the user
    /// must save first. The refusal changes nothing and issues no gateway
    /// call.
    pub fn select_floor(&mut self, floor: &FloorId) -> Result<()> {
        if self.mode == EditMode::Editing && self.selected_floor.is_some() {
            warn!(%floor, "floor switch blocked by edit mode");
            return Err(EditorError::UnsavedWork);
        }
        if !self.floors.contains(floor) {
            return Err(EditorError::UnknownFloor(floor.clone()));
        }
        self.selected_floor = Some(floor.clone());
        self.active_pin = None;
        self.pending_pin = None;
        Ok(())
    }

    /// Validates and uploads a new floor, then appends it to the registry.
    ///
    /// The floor-cap check runs with the rest of the validation, before any
    /// network call.
    pub async fn add_floor(&mut self, input: NewFloorInput) -> Result<Floor> {
        let number = input.validate()?;
        let cap = self.building.floor_cap;
        if self.floors.len() as u32 >= cap {
            warn!(cap, "floor cap reached; upload refused");
            return Err(EditorError::FloorCapReached { cap });
        }

        self.shell.begin(Some("Uploading floor plan..."));
        let result = self
            .gateway
            .create_floor(NewFloor {
                building_id: Some(self.building.id.clone()),
                name: input.name.trim().to_string(),
                number,
                image: input.image,
                updated_at: chrono::Utc::now(),
            })
            .await;
        self.shell.end();

        match result {
            Ok(floor) => {
                debug!(floor = %floor.id, "floor created");
                self.floors.push(floor.clone());
                self.shell.notify(Notice::Success, "Floor created");
                Ok(floor)
            }
            Err(err) => {
                error!(%err, "floor creation failed");
                self.shell.notify(Notice::Error, "Failed to create floor");
                Err(err.into())
            }
        }
    }

    /// Renames a floor through the gateway, then locally on success.
    pub async fn rename_floor(&mut self, floor: &FloorId, new_name: &str) -> Result<()> {
        if new_name.trim().is_empty() {
            return Err(EditorError::MissingField { field: "floorName" });
        }
        if !self.floors.contains(floor) {
            return Err(EditorError::UnknownFloor(floor.clone()));
        }

        self.shell.begin(Some("Updating floor name..."));
        let result = self
            .gateway
            .rename_floor(&self.building.id, floor, new_name.trim())
            .await;
        self.shell.end();

        match result {
            Ok(()) => {
                self.floors.rename(floor, new_name.trim());
                self.has_changes = true;
                self.shell.notify(Notice::Success, "Floor name updated");
                Ok(())
            }
            Err(err) => {
                error!(%floor, %err, "floor rename failed");
                self.shell.notify(Notice::Error, "Failed to update floor name");
                Err(err.into())
            }
        }
    }

    /// Deletes a floor and cascades its pins. Refused while editing; hard,
    /// non-reversible product action (the shell runs the typed-name
    /// confirmation before calling this).
    pub async fn delete_floor(&mut self, floor: &FloorId) -> Result<()> {
        if self.mode == EditMode::Editing {
            return Err(EditorError::UnsavedWork);
        }
        if !self.floors.contains(floor) {
            return Err(EditorError::UnknownFloor(floor.clone()));
        }

        self.shell.begin(Some("Deleting floor..."));
        let result = self.gateway.delete_floor(&self.building.id, floor).await;
        self.shell.end();

        match result {
            Ok(()) => {
                self.floors.remove(floor);
                self.pins.remove_floor(floor);
                if self.selected_floor.as_ref() == Some(floor) {
                    self.selected_floor = None;
                    self.active_pin = None;
                    self.pending_pin = None;
                    self.mode = EditMode::Viewing;
                }
                self.has_changes = true;
                self.shell.notify(Notice::Success, "Floor deleted");
                Ok(())
            }
            Err(err) => {
                error!(%floor, %err, "floor deletion failed");
                self.shell.notify(Notice::Error, "Failed to delete floor");
                Err(err.into())
            }
        }
    }

    // ---- edit mode & save ----

    /// `Viewing -> Editing`. Requires a selected floor; otherwise there is
    /// nothing to edit.
    pub fn enter_edit_mode(&mut self) -> Result<()> {
        if self.selected_floor.is_none() {
            return Err(EditorError::NoFloorSelected);
        }
        self.mode = EditMode::Editing;
        Ok(())
    }

    /// `Editing -> Viewing`, flushing the selected floor's pins and the
    /// deletion queue as one gateway call.
    ///
    /// The mode flips back to `Viewing` whether or not the round-trip
    /// succeeds; only a success clears the deletion queue. `has_changes`
    /// stays set either way — publish is what resets it.
    pub async fn save(&mut self) -> Result<()> {
        let floor = self
            .selected_floor
            .clone()
            .ok_or(EditorError::NoFloorSelected)?;
        if self.mode != EditMode::Editing {
            return Err(EditorError::NotEditing);
        }

        self.shell.begin(Some("Saving pins..."));
        let upserts: Vec<Pin> = self.pins.pins_on(&floor).to_vec();
        let result = self
            .gateway
            .save_pins(&self.building.id, &floor, &upserts, &self.deletion_queue)
            .await;
        self.shell.end();

        // The save was attempted; the session exits edit mode regardless
        // of the outcome. An unconfirmed placement cannot outlive edit
        // mode, so it is dropped here too.
        self.mode = EditMode::Viewing;
        self.pending_pin = None;

        match result {
            Ok(()) => {
                debug!(%floor, pins = upserts.len(), deleted = self.deletion_queue.len(), "pins saved");
                self.deletion_queue.clear();
                self.shell.notify(Notice::Success, "Floor changes saved");
                Ok(())
            }
            Err(err) => {
                // Local pins and the deletion queue survive for a retry.
                error!(%floor, %err, "pin save failed");
                self.shell.notify(Notice::Error, "Failed to save floor changes");
                Err(err.into())
            }
        }
    }

    // ---- pin lifecycle ----

    /// Translates a pointer click on the floor image into a pending pin
    /// placement. Clears any active pin highlight first.
    pub fn place_pin_at(&mut self, pointer_x: f64, pointer_y: f64) -> Result<PercentPoint> {
        if self.selected_floor.is_none() {
            return Err(EditorError::NoFloorSelected);
        }
        if self.mode != EditMode::Editing {
            return Err(EditorError::NotEditing);
        }
        let point = self
            .viewport
            .pointer_to_percent(pointer_x, pointer_y)
            .ok_or(EditorError::ImageNotLaidOut)?;

        self.active_pin = None;
        self.pending_pin = Some(point);
        Ok(point)
    }

    /// Turns the pending placement into a real pin once the user supplies
    /// details. Allocates a local id; the server assigns the durable one on
    /// the next save.
    pub fn confirm_pending_pin(&mut self, details: PinDetails) -> Result<Pin> {
        let floor = self
            .selected_floor
            .clone()
            .ok_or(EditorError::NoFloorSelected)?;
        if self.mode != EditMode::Editing {
            return Err(EditorError::NotEditing);
        }
        let coordinates = self
            .pending_pin
            .take()
            .ok_or(EditorError::NoPendingPlacement)?;
        if details.name.trim().is_empty() {
            // Keep the placement so the dialog can be re-submitted.
            self.pending_pin = Some(coordinates);
            return Err(EditorError::MissingField { field: "pinName" });
        }

        let pin = Pin {
            id: PinId::local(),
            floor_id: floor,
            details,
            coordinates,
        };
        debug!(pin = %pin.id, "pin placed");
        self.pins.add(pin.clone());
        self.has_changes = true;
        Ok(pin)
    }

    /// Drops the pending placement (dialog cancelled).
    pub fn cancel_pending_pin(&mut self) {
        self.pending_pin = None;
    }

    /// Toggles the active-pin highlight. Clicking the already-active pin
    /// deactivates it. Only pins of the selected floor can populate the
    /// detail panel.
    pub fn toggle_pin(&mut self, pin: &PinId) -> Option<&PinDetails> {
        if self.active_pin.as_ref() == Some(pin) {
            self.active_pin = None;
            return None;
        }
        let floor = self.selected_floor.as_ref()?;
        if self.pins.get(floor, pin).is_none() {
            return None;
        }
        self.active_pin = Some(pin.clone());
        self.pins.get(floor, pin).map(|p| &p.details)
    }

    /// Details of the active pin, if any.
    pub fn active_pin_details(&self) -> Option<&PinDetails> {
        let floor = self.selected_floor.as_ref()?;
        let pin = self.active_pin.as_ref()?;
        self.pins.get(floor, pin).map(|p| &p.details)
    }

    /// Replaces a pin's details (and its layer name) on the selected floor.
    pub fn edit_pin(&mut self, pin: &PinId, details: PinDetails) -> Result<()> {
        let floor = self
            .selected_floor
            .clone()
            .ok_or(EditorError::NoFloorSelected)?;
        if self.mode != EditMode::Editing {
            return Err(EditorError::NotEditing);
        }
        if details.name.trim().is_empty() {
            return Err(EditorError::MissingField { field: "pinName" });
        }
        if self.pins.edit(&floor, pin, details).is_none() {
            return Err(EditorError::UnknownPin(pin.clone()));
        }
        self.has_changes = true;
        Ok(())
    }

    /// Removes a pin locally and queues its id for server-side removal on
    /// the next save. The queue only grows between saves.
    pub fn delete_pin(&mut self, pin: &PinId) -> Result<()> {
        let floor = self
            .selected_floor
            .clone()
            .ok_or(EditorError::NoFloorSelected)?;
        if self.mode != EditMode::Editing {
            return Err(EditorError::NotEditing);
        }
        let removed = self
            .pins
            .remove(&floor, pin)
            .ok_or_else(|| EditorError::UnknownPin(pin.clone()))?;

        debug!(pin = %removed.id, "pin deleted locally; queued for server removal");
        self.deletion_queue.push(removed.id);
        self.active_pin = None;
        self.has_changes = true;
        Ok(())
    }

    // ---- publish & building lifecycle ----

    /// Publishes the building. Only invocable while the session is dirty;
    /// a success clears `has_changes`, a failure leaves it set.
    pub async fn publish(&mut self) -> Result<()> {
        if !self.has_changes {
            return Err(EditorError::NothingToPublish);
        }

        self.shell.begin(Some("Publishing building..."));
        let result = self.gateway.publish_building(&self.building.id).await;
        self.shell.end();

        match result {
            Ok(()) => {
                debug!(building = %self.building.id, "building published");
                self.has_changes = false;
                self.building.is_live = true;
                self.shell
                    .notify(Notice::Success, "Building published successfully");
                Ok(())
            }
            Err(err) => {
                error!(building = %self.building.id, %err, "publish failed");
                self.shell.notify(Notice::Error, "Failed to publish building");
                Err(err.into())
            }
        }
    }

    /// Renames the building and/or adjusts its floor cap. The cap can
    /// never drop below the number of floors that already exist.
    pub async fn update_building(&mut self, name: &str, floor_cap: u32) -> Result<()> {
        if name.trim().is_empty() {
            return Err(EditorError::MissingField {
                field: "buildingName",
            });
        }
        let count = self.floors.len() as u32;
        if floor_cap < count {
            return Err(EditorError::CapBelowFloorCount {
                cap: floor_cap,
                count,
            });
        }

        self.shell.begin(Some("Updating building details..."));
        let result = self
            .gateway
            .update_building(&self.building.id, name.trim(), floor_cap)
            .await;
        self.shell.end();

        match result {
            Ok(()) => {
                self.building.name = name.trim().to_string();
                self.building.floor_cap = floor_cap;
                self.has_changes = true;
                self.shell
                    .notify(Notice::Success, "Building details updated");
                Ok(())
            }
            Err(err) => {
                error!(building = %self.building.id, %err, "building update failed");
                self.shell
                    .notify(Notice::Error, "Failed to update building details");
                Err(err.into())
            }
        }
    }

    /// Deletes the building and everything it owns. The shell navigates
    /// away afterwards; this session is no longer meaningful on success.
    pub async fn delete_building(&mut self) -> Result<()> {
        self.shell.begin(Some("Deleting building..."));
        let result = self.gateway.delete_building(&self.building.id).await;
        self.shell.end();

        match result {
            Ok(()) => {
                self.shell.notify(Notice::Success, "Building deleted");
                Ok(())
            }
            Err(err) => {
                error!(building = %self.building.id, %err, "building deletion failed");
                self.shell.notify(Notice::Error, "Failed to delete building");
                Err(err.into())
            }
        }
    }
}

impl std::fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorSession")
            .field("building", &self.building.id)
            .field("mode", &self.mode)
            .field("selected_floor", &self.selected_floor)
            .field("floors", &self.floors.len())
            .field("has_changes", &self.has_changes)
            .finish_non_exhaustive()
    }
}

/// Creates a building record ahead of opening a session on it.
pub async fn create_building(
    gateway: &Arc<dyn PersistenceGateway>,
    name: &str,
    floor_cap: u32,
) -> Result<Building> {
    if name.trim().is_empty() {
        return Err(EditorError::MissingField {
            field: "buildingName",
        });
    }
    if floor_cap == 0 {
        return Err(EditorError::MissingField { field: "floorCount" });
    }
    let building = gateway.create_building(name.trim(), floor_cap).await?;
    debug!(building = %building.id, "building created");
    Ok(building)
}

/// Lists previously saved buildings for the picker screen.
pub async fn load_buildings(gateway: &Arc<dyn PersistenceGateway>) -> Result<Vec<Building>> {
    Ok(gateway.load_buildings().await?)
}
