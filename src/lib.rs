//! Typed object model for Redfish services
//!
//! Resources are decoded from the exact bytes the service returned: identity
//! fields go into an embedded [`common::Entity`], actions are flattened into
//! named fields, links become URI strings, and vendor extensions are kept as
//! opaque blobs. Links are only followed when an accessor asks for them.
//!
//! # Module Structure
//!
//! - [`client`] - transport seam and the reqwest-backed HTTP client
//! - [`common`] - link references, entity base, actions, opaque blobs
//! - [`resource`] - collection and link resolution
//! - [`redfish`] - concrete resource types
//! - [`error`] - error types
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use rfmodel::client::{ClientHandle, http::{HttpClient, HttpConfig}};
//!
//! async fn firmware_versions(endpoint: &str) -> anyhow::Result<Vec<String>> {
//!     let client: ClientHandle = Arc::new(HttpClient::new(HttpConfig::new(endpoint))?);
//!     let root = rfmodel::redfish::get_service_root(&client).await?;
//!     let Some(update_service) = root.update_service().await? else {
//!         return Ok(Vec::new());
//!     };
//!     let firmware = update_service.firmware_inventories().await?;
//!     Ok(firmware.into_iter().map(|f| f.version).collect())
//! }
//! ```

pub mod client;
pub mod common;
pub mod error;
pub mod redfish;
pub mod resource;

pub use error::{DecodeError, Error, Result, TransportError};
