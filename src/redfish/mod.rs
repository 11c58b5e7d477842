//! Redfish resource types
//!
//! Each type follows the same shape: an embedded [`Entity`](crate::common::Entity),
//! a private wire struct for stage-one decoding, flattened actions, links kept
//! as URI strings, vendor payload kept as
//! [`OpaqueBlob`](crate::common::OpaqueBlob)s, and accessors that resolve links
//! on demand.

mod service_root;
mod software_inventory;
mod update_service;

pub use service_root::{get_service_root, ServiceRoot, SERVICE_ROOT};
pub use software_inventory::{get_software_inventory, SoftwareInventory};
pub use update_service::{get_update_service, UpdateService, SIMPLE_UPDATE, START_UPDATE};
