//! Building blocks shared by every resource type
//!
//! - [`link`] - link references (`{"@odata.id": ...}` or bare URI)
//! - [`entity`] - identity, retained payload, client handle, [`Resource`] trait
//! - [`actions`] - `Actions` sub-object and flattened action descriptors
//! - [`opaque`] - vendor payload kept verbatim
//! - [`status`] - common `Status` object

pub mod actions;
pub mod entity;
pub mod link;
pub mod opaque;
pub mod status;

pub use actions::{ActionDescriptor, Actions};
pub use entity::{fetch, Entity, Resource};
pub use link::Link;
pub use opaque::{BlobOrigin, OpaqueBlob};
pub use status::{Health, State, Status};
