//! Error handling for the CampusMap editor.
//!
//! Two layers of errors:
//! - [`GatewayError`] — failures at the persistence API boundary
//!   (missing auth, transport, server rejection, malformed responses).
//! - [`EditorError`] — precondition and guard violations inside the edit
//!   session, plus gateway failures propagated transparently.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

use crate::ids::{FloorId, PinId};

/// Errors from the persistence gateway boundary.
#[derive(Error, Debug, Clone)]
pub enum GatewayError {
    /// No authorization token is available; the call was never issued.
    #[error("Authorization token is missing")]
    MissingAuth,

    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("Transport failure: {message}")]
    Transport {
        /// Description of the underlying transport failure.
        message: String,
    },

    /// The server answered with a non-success HTTP status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body or status text.
        message: String,
    },

    /// The server answered 2xx but reported `success: false`.
    #[error("Request rejected: {message}")]
    Rejected {
        /// The server-provided rejection reason.
        message: String,
    },

    /// The response body did not match the expected schema.
    #[error("Malformed response: {message}")]
    Decode {
        /// Description of the decode failure.
        message: String,
    },
}

/// Errors from the edit session.
#[derive(Error, Debug)]
pub enum EditorError {
    /// An operation that needs a selected floor was called without one.
    #[error("No floor is selected")]
    NoFloorSelected,

    /// An operation that needs edit mode was called while viewing.
    #[error("Edit mode is not active")]
    NotEditing,

    /// A navigation or floor switch was attempted with unsaved work.
    #[error("Unsaved work in progress; save before leaving the floor")]
    UnsavedWork,

    /// The referenced floor is not part of this building.
    #[error("Unknown floor: {0}")]
    UnknownFloor(FloorId),

    /// The referenced pin is not on the selected floor.
    #[error("Unknown pin: {0}")]
    UnknownPin(PinId),

    /// Adding a floor would exceed the building's declared cap.
    #[error("Maximum floor count ({cap}) reached")]
    FloorCapReached {
        /// The building's declared floor cap.
        cap: u32,
    },

    /// A required input field was empty.
    #[error("Missing required field: {field}")]
    MissingField {
        /// Name of the missing field.
        field: &'static str,
    },

    /// The floor number could not be parsed.
    #[error("Invalid floor number: {input}")]
    InvalidFloorNumber {
        /// The rejected input.
        input: String,
    },

    /// The uploaded file is not an image.
    #[error("Uploaded file is not an image")]
    NotAnImage,

    /// A pin was confirmed without a pending placement.
    #[error("No pin placement is pending")]
    NoPendingPlacement,

    /// The rendered image bounds are not known yet.
    #[error("Floor image is not laid out yet")]
    ImageNotLaidOut,

    /// Publish was requested with nothing to publish.
    #[error("No unsaved changes to publish")]
    NothingToPublish,

    /// The new floor cap is below the number of floors that already exist.
    #[error("Floor cap {cap} is below the current floor count {count}")]
    CapBelowFloorCount {
        /// The requested cap.
        cap: u32,
        /// The number of floors the building already has.
        count: u32,
    },

    /// A gateway call failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Convenience result alias used throughout the editor.
pub type Result<T> = std::result::Result<T, EditorError>;
