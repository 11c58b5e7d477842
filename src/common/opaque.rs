//! Vendor-defined payload kept verbatim
//!
//! `Oem` sections and vendor actions have no fixed shape. They are never typed
//! here; the exact bytes are carried along with where they came from so a
//! vendor-specific layer can parse them later.

use serde::de::DeserializeOwned;
use serde_json::value::RawValue;
use std::fmt;

/// Where an [`OpaqueBlob`] was found in the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlobOrigin {
    /// Top-level `Oem` member
    Oem,
    /// `Actions.Oem` member
    OemActions,
    /// Action keys under `Actions` that the resource type does not know
    VendorActions,
}

impl fmt::Display for BlobOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BlobOrigin::Oem => "Oem",
            BlobOrigin::OemActions => "Actions.Oem",
            BlobOrigin::VendorActions => "Actions",
        };
        f.write_str(name)
    }
}

/// Uninterpreted JSON bytes tagged with their origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpaqueBlob {
    origin: BlobOrigin,
    bytes: Vec<u8>,
}

impl OpaqueBlob {
    pub fn new(origin: BlobOrigin, bytes: Vec<u8>) -> Self {
        Self { origin, bytes }
    }

    pub(crate) fn from_raw(origin: BlobOrigin, raw: &RawValue) -> Self {
        Self::new(origin, raw.get().as_bytes().to_vec())
    }

    pub fn origin(&self) -> BlobOrigin {
        self.origin
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Parse the blob into a caller-chosen vendor type.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.bytes)
    }
}
