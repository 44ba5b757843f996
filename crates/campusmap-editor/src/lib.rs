//! # CampusMap Editor
//!
//! The interactive floor-plan pin editor: place, edit, and delete
//! points-of-interest on floor-plan images, with optimistic local editing
//! and deferred persistence through a gateway.
//!
//! ## Core components
//!
//! - **[`ImageViewport`]**: pointer-pixel ↔ percentage coordinate mapping
//!   against the rendered floor image.
//! - **[`PinRegistry`]**: per-floor pin collections plus the sidebar layer
//!   list, kept in lockstep and keyed by stable pin ids.
//! - **[`FloorRegistry`]**: the open building's floors and new-floor
//!   validation (cap check included) ahead of any network call.
//! - **[`EditorSession`]**: the edit-mode state machine and orchestrator —
//!   floor selection guard, save/load/publish round-trips, deletion queue,
//!   unsaved-change tracking, and the leave guard.
//! - **[`ShellContext`]**: injected progress/notification collaborators;
//!   the session renders nothing itself.
//!
//! ## Architecture
//!
//! ```text
//! EditorSession (state machine, dirty flag, guards)
//!   ├── FloorRegistry (floors, upload validation)
//!   ├── PinRegistry   (pins + layers, per floor)
//!   ├── ImageViewport (coordinate mapping)
//!   └── PersistenceGateway (trait, campusmap-core)
//! ```

pub mod floors;
pub mod registry;
pub mod session;
pub mod shell;
pub mod viewport;

pub use floors::{FloorRegistry, NewFloorInput};
pub use registry::PinRegistry;
pub use session::{create_building, load_buildings, EditMode, EditorSession};
pub use shell::{Notice, Notifier, NullNotifier, NullProgress, ProgressSink, ShellContext};
pub use viewport::ImageViewport;
