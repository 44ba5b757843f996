//! Floor collection and new-floor input validation.
//!
//! Floors belong to exactly one building and keep their load order. All
//! validation of a floor upload happens here, before any network traffic:
//! name and number must be present, the number must parse, and the file is
//! sniffed to confirm it really is an image (the declared MIME type alone
//! is not trusted).

use campusmap_core::{EditorError, Floor, FloorId, ImageUpload, Result};

/// Collection of the open building's floors, in load/creation order.
#[derive(Debug, Clone, Default)]
pub struct FloorRegistry {
    floors: Vec<Floor>,
}

impl FloorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the collection from a load response.
    pub fn replace_all(&mut self, floors: Vec<Floor>) {
        self.floors = floors;
    }

    /// Appends a freshly created floor.
    pub fn push(&mut self, floor: Floor) {
        self.floors.push(floor);
    }

    pub fn get(&self, id: &FloorId) -> Option<&Floor> {
        self.floors.iter().find(|f| &f.id == id)
    }

    pub fn contains(&self, id: &FloorId) -> bool {
        self.get(id).is_some()
    }

    /// Renames a floor in place. Returns false when the id is unknown.
    pub fn rename(&mut self, id: &FloorId, new_name: &str) -> bool {
        match self.floors.iter_mut().find(|f| &f.id == id) {
            Some(floor) => {
                floor.name = new_name.to_string();
                true
            }
            None => false,
        }
    }

    /// Removes a floor. Returns the removed record.
    pub fn remove(&mut self, id: &FloorId) -> Option<Floor> {
        let position = self.floors.iter().position(|f| &f.id == id)?;
        Some(self.floors.remove(position))
    }

    pub fn len(&self) -> usize {
        self.floors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.floors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Floor> {
        self.floors.iter()
    }
}

/// User input for a floor upload, before validation.
#[derive(Debug, Clone)]
pub struct NewFloorInput {
    pub name: String,
    /// Raw form value; parsed during validation.
    pub number: String,
    pub image: ImageUpload,
}

impl NewFloorInput {
    /// Validates the input and returns the parsed floor number.
    ///
    /// Checks, in order: non-empty name, non-empty and parsable number,
    /// `image/*` declared MIME type, and a magic-byte sniff of the file
    /// contents. All of this runs before any gateway call.
    pub fn validate(&self) -> Result<i32> {
        if self.name.trim().is_empty() {
            return Err(EditorError::MissingField { field: "floorName" });
        }
        if self.number.trim().is_empty() {
            return Err(EditorError::MissingField {
                field: "floorNumber",
            });
        }
        let number: i32 =
            self.number
                .trim()
                .parse()
                .map_err(|_| EditorError::InvalidFloorNumber {
                    input: self.number.clone(),
                })?;

        if !self.image.content_type.starts_with("image/") {
            return Err(EditorError::NotAnImage);
        }
        if image::guess_format(&self.image.bytes).is_err() {
            return Err(EditorError::NotAnImage);
        }

        Ok(number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campusmap_core::BuildingId;
    use chrono::Utc;

    // Enough of a PNG for format sniffing.
    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn png_upload() -> ImageUpload {
        ImageUpload {
            file_name: "plan.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: PNG_MAGIC.to_vec(),
        }
    }

    fn input(name: &str, number: &str, image: ImageUpload) -> NewFloorInput {
        NewFloorInput {
            name: name.to_string(),
            number: number.to_string(),
            image,
        }
    }

    #[test]
    fn valid_input_parses_the_number() {
        assert_eq!(input("Ground", "0", png_upload()).validate().unwrap(), 0);
        assert_eq!(input("Basement", "-1", png_upload()).validate().unwrap(), -1);
    }

    #[test]
    fn empty_fields_are_rejected() {
        assert!(matches!(
            input("", "1", png_upload()).validate(),
            Err(EditorError::MissingField { field: "floorName" })
        ));
        assert!(matches!(
            input("Ground", "  ", png_upload()).validate(),
            Err(EditorError::MissingField { field: "floorNumber" })
        ));
    }

    #[test]
    fn non_numeric_floor_number_is_rejected() {
        assert!(matches!(
            input("Ground", "zero", png_upload()).validate(),
            Err(EditorError::InvalidFloorNumber { .. })
        ));
    }

    #[test]
    fn wrong_mime_and_wrong_bytes_are_rejected() {
        let mut pdf = png_upload();
        pdf.content_type = "application/pdf".to_string();
        assert!(matches!(
            input("Ground", "0", pdf).validate(),
            Err(EditorError::NotAnImage)
        ));

        let mut fake = png_upload();
        fake.bytes = b"not actually an image".to_vec();
        assert!(matches!(
            input("Ground", "0", fake).validate(),
            Err(EditorError::NotAnImage)
        ));
    }

    #[test]
    fn rename_and_remove_by_id() {
        let mut reg = FloorRegistry::new();
        reg.push(Floor {
            id: FloorId::from("f1"),
            building_id: BuildingId::from("b1"),
            name: "Ground".to_string(),
            number: 0,
            image_url: "https://cdn.example/f1.png".to_string(),
            updated_at: Utc::now(),
        });

        assert!(reg.rename(&"f1".into(), "Lobby Level"));
        assert_eq!(reg.get(&"f1".into()).unwrap().name, "Lobby Level");
        assert!(!reg.rename(&"f9".into(), "Nope"));

        assert!(reg.remove(&"f1".into()).is_some());
        assert!(reg.is_empty());
    }
}
