//! Per-floor pin storage and the sidebar layer list.
//!
//! `PinRegistry` is the single source of truth the canvas renders from.
//! Pins are stored per floor in insertion order (no sort is ever applied)
//! and every cross-structure update — pin set, layer list, callers'
//! deletion queues — is keyed by [`PinId`], never by list position, so a
//! mutation on one floor can not drift indices on another.

use std::collections::HashMap;

use campusmap_core::{FloorId, FloorWithPins, Layer, Pin, PinDetails, PinId};

/// Pin collections for every floor of the open building, plus the layer
/// list kept in lockstep with them.
#[derive(Debug, Clone, Default)]
pub struct PinRegistry {
    by_floor: HashMap<FloorId, Vec<Pin>>,
    layers: Vec<Layer>,
}

impl PinRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole registry from a load response and rebuilds the
    /// layer list to match.
    pub fn replace_all(&mut self, floors: &[FloorWithPins]) {
        self.by_floor.clear();
        self.layers.clear();
        for entry in floors {
            for pin in &entry.pins {
                self.add(pin.clone());
            }
            // Keep an entry even for floors with no pins yet.
            self.by_floor.entry(entry.floor.id.clone()).or_default();
        }
    }

    /// Appends a pin to its floor's collection and mirrors it as a layer.
    pub fn add(&mut self, pin: Pin) {
        self.layers.push(Layer {
            floor_id: pin.floor_id.clone(),
            pin_id: pin.id.clone(),
            name: pin.details.name.clone(),
        });
        self.by_floor
            .entry(pin.floor_id.clone())
            .or_default()
            .push(pin);
    }

    /// Replaces a pin's details and renames its layer. Returns the updated
    /// pin, or `None` when the id is not on that floor.
    pub fn edit(
        &mut self,
        floor: &FloorId,
        pin_id: &PinId,
        details: PinDetails,
    ) -> Option<&Pin> {
        let pins = self.by_floor.get_mut(floor)?;
        let pin = pins.iter_mut().find(|p| &p.id == pin_id)?;
        pin.details = details;

        let name = pin.details.name.clone();
        if let Some(layer) = self.layers.iter_mut().find(|l| &l.pin_id == pin_id) {
            layer.name = name;
        }
        self.by_floor
            .get(floor)
            .and_then(|pins| pins.iter().find(|p| &p.id == pin_id))
    }

    /// Removes a pin and its layer. Returns the removed pin.
    pub fn remove(&mut self, floor: &FloorId, pin_id: &PinId) -> Option<Pin> {
        let pins = self.by_floor.get_mut(floor)?;
        let position = pins.iter().position(|p| &p.id == pin_id)?;
        let removed = pins.remove(position);
        self.layers.retain(|l| &l.pin_id != pin_id);
        Some(removed)
    }

    /// Drops a whole floor's pins and layers (floor-deletion cascade).
    pub fn remove_floor(&mut self, floor: &FloorId) {
        self.by_floor.remove(floor);
        self.layers.retain(|l| &l.floor_id != floor);
    }

    /// Pins of one floor in insertion order.
    pub fn pins_on(&self, floor: &FloorId) -> &[Pin] {
        self.by_floor.get(floor).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Looks a pin up by id within one floor.
    pub fn get(&self, floor: &FloorId, pin_id: &PinId) -> Option<&Pin> {
        self.pins_on(floor).iter().find(|p| &p.id == pin_id)
    }

    /// The full layer list, all floors, in insertion order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Layer entries for one floor's sidebar section.
    pub fn layers_on<'a>(&'a self, floor: &'a FloorId) -> impl Iterator<Item = &'a Layer> {
        self.layers.iter().filter(move |l| &l.floor_id == floor)
    }

    /// Number of pins on one floor.
    pub fn count_on(&self, floor: &FloorId) -> usize {
        self.pins_on(floor).len()
    }
}
