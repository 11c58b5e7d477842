//! Link resolution layer
//!
//! Resources hold related resources as URI strings. This module turns those
//! strings back into typed entities on demand, through the client the parent
//! entity was fetched with.
//!
//! # Architecture
//!
//! - [`fetcher`] - collection envelopes, member listing, single-link lookup
//!
//! # Example
//!
//! ```ignore
//! use rfmodel::resource::list_referenced;
//! use rfmodel::redfish::SoftwareInventory;
//!
//! async fn list_firmware(client: &ClientHandle) -> rfmodel::Result<Vec<SoftwareInventory>> {
//!     list_referenced(client, "/redfish/v1/UpdateService/FirmwareInventory").await
//! }
//! ```

mod fetcher;

pub use fetcher::{collection_links, get_referenced, list_referenced, list_referenced_concurrent};
