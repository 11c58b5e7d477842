//! SoftwareInventory

use crate::client::ClientHandle;
use crate::common::actions::Actions;
use crate::common::entity::{fetch, Entity, Resource};
use crate::common::link::{into_uris, Link};
use crate::common::opaque::{BlobOrigin, OpaqueBlob};
use crate::common::status::Status;
use crate::error::{DecodeError, Result};
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use serde_json::value::RawValue;

/// A single piece of software or firmware installed on (or staged for) a
/// component.
#[derive(Debug, Clone, PartialEq)]
pub struct SoftwareInventory {
    pub entity: Entity,
    pub description: String,
    /// Oldest version this software may be downgraded to
    pub lowest_supported_version: String,
    pub manufacturer: String,
    /// Release date as sent, see [`SoftwareInventory::release_date`]
    pub release_date: String,
    pub software_id: String,
    pub status: Status,
    pub uefi_device_paths: Vec<String>,
    pub updateable: bool,
    pub version: String,
    pub write_protected: bool,
    /// Resources this software is associated with
    pub related_item: Vec<String>,
    pub oem_actions: Option<OpaqueBlob>,
    pub vendor_actions: Option<OpaqueBlob>,
    pub oem: Option<OpaqueBlob>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SoftwareInventoryWire {
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    lowest_supported_version: Option<String>,
    #[serde(default)]
    manufacturer: Option<String>,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    software_id: Option<String>,
    #[serde(default)]
    status: Option<Status>,
    #[serde(default)]
    uefi_device_paths: Option<Vec<String>>,
    #[serde(default)]
    updateable: Option<bool>,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    write_protected: Option<bool>,
    #[serde(default)]
    related_item: Option<Vec<Link>>,
    #[serde(default)]
    actions: Actions,
    #[serde(default)]
    oem: Option<Box<RawValue>>,
}

impl Resource for SoftwareInventory {
    const TYPE_NAME: &'static str = "SoftwareInventory";

    fn decode(raw: &[u8]) -> std::result::Result<Self, DecodeError> {
        let entity = Entity::from_payload(raw).map_err(Self::decode_error)?;
        let wire: SoftwareInventoryWire =
            serde_json::from_slice(raw).map_err(Self::decode_error)?;

        Ok(Self {
            entity,
            description: wire.description.unwrap_or_default(),
            lowest_supported_version: wire.lowest_supported_version.unwrap_or_default(),
            manufacturer: wire.manufacturer.unwrap_or_default(),
            release_date: wire.release_date.unwrap_or_default(),
            software_id: wire.software_id.unwrap_or_default(),
            status: wire.status.unwrap_or_default(),
            uefi_device_paths: wire.uefi_device_paths.unwrap_or_default(),
            updateable: wire.updateable.unwrap_or_default(),
            version: wire.version.unwrap_or_default(),
            write_protected: wire.write_protected.unwrap_or_default(),
            related_item: into_uris(wire.related_item.unwrap_or_default()),
            oem_actions: wire.actions.oem(),
            vendor_actions: wire.actions.unrecognized(&[]),
            oem: wire
                .oem
                .map(|raw| OpaqueBlob::from_raw(BlobOrigin::Oem, &raw)),
        })
    }

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }
}

impl SoftwareInventory {
    /// Parsed `ReleaseDate`. `None` when absent or not RFC 3339, which some
    /// BMCs send as `00:00:00Z`.
    pub fn release_date(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.release_date).ok()
    }
}

/// Get a SoftwareInventory from the service
pub async fn get_software_inventory(
    client: &ClientHandle,
    uri: &str,
) -> Result<SoftwareInventory> {
    fetch(client, uri).await
}
