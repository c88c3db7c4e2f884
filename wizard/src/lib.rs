//! Gift wizard core: configuration model, step machine, and preview sync.
//!
//! ARCHITECTURE
//! ============
//! The operator edits a [`WizardConfiguration`] through a [`WizardSession`].
//! The session owns the pure [`WizardState`] machine, pushes debounced
//! snapshots to an attached preview surface, and persists finished projects
//! through an injected [`ProjectStore`]. This crate owns every type that
//! crosses the preview boundary so the server and any other host agree on
//! the JSON shape.

pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod debounce;
pub mod error;
pub mod machine;
pub mod message;
pub mod session;
pub mod steps;
pub mod store;
pub mod sync;

pub use catalog::{PAGE_CATALOG, PageDescriptor, PageKind};
pub use config::{PageContent, WizardConfiguration};
pub use error::WizardError;
pub use machine::{Toggle, WizardState};
pub use message::PreviewMessage;
pub use session::WizardSession;
pub use steps::{StepKind, WizardStep};
pub use store::{ListOrder, MemoryProjectStore, NewProject, ProjectRecord, ProjectStore, StoreError};
pub use sync::{ChannelSurface, PreviewSlot, PreviewSurface, PreviewSync, SurfaceError};
