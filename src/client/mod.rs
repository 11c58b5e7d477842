//! Transport seam
//!
//! The object model only needs one thing from the outside world: the raw bytes
//! behind a URI. [`Client`] is that contract; [`http::HttpClient`] is the
//! reqwest-backed implementation used against a live service.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use rfmodel::client::{ClientHandle, http::{HttpClient, HttpConfig}};
//!
//! async fn example() -> anyhow::Result<()> {
//!     let http = HttpClient::new(HttpConfig::new("https://10.0.0.2"))?;
//!     let client: ClientHandle = Arc::new(http);
//!     let root = rfmodel::redfish::get_service_root(&client).await?;
//!     Ok(())
//! }
//! ```

use crate::error::TransportError;
use async_trait::async_trait;
use std::sync::Arc;

pub mod http;

#[cfg(test)]
pub(crate) mod mock;

/// Read access to a Redfish service.
///
/// Implementations own retries, sessions and connection reuse. The object
/// model calls `get` once per resource and surfaces failures unchanged.
#[async_trait]
pub trait Client: Send + Sync {
    /// Fetch the raw body stored at `uri`.
    async fn get(&self, uri: &str) -> Result<Vec<u8>, TransportError>;
}

/// Shared client handle held by every fetched entity.
pub type ClientHandle = Arc<dyn Client>;
