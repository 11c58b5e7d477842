//! ServiceRoot
//!
//! Entry point of every Redfish service, always at `/redfish/v1`.

use super::UpdateService;
use crate::client::ClientHandle;
use crate::common::entity::{fetch, Entity, Resource};
use crate::common::link::Link;
use crate::common::opaque::{BlobOrigin, OpaqueBlob};
use crate::error::{DecodeError, Result};
use serde::Deserialize;
use serde_json::value::RawValue;

/// Conventional Redfish service root path.
pub const SERVICE_ROOT: &str = "/redfish/v1";

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceRoot {
    pub entity: Entity,
    pub redfish_version: String,
    pub uuid: String,
    pub vendor: String,
    pub product: String,
    pub update_service: String,
    pub systems: String,
    pub chassis: String,
    pub managers: String,
    pub oem: Option<OpaqueBlob>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ServiceRootWire {
    #[serde(default)]
    redfish_version: Option<String>,
    #[serde(rename = "UUID", default)]
    uuid: Option<String>,
    #[serde(default)]
    vendor: Option<String>,
    #[serde(default)]
    product: Option<String>,
    #[serde(default)]
    update_service: Link,
    #[serde(default)]
    systems: Link,
    #[serde(default)]
    chassis: Link,
    #[serde(default)]
    managers: Link,
    #[serde(default)]
    oem: Option<Box<RawValue>>,
}

impl Resource for ServiceRoot {
    const TYPE_NAME: &'static str = "ServiceRoot";

    fn decode(raw: &[u8]) -> std::result::Result<Self, DecodeError> {
        let entity = Entity::from_payload(raw).map_err(Self::decode_error)?;
        let wire: ServiceRootWire = serde_json::from_slice(raw).map_err(Self::decode_error)?;

        Ok(Self {
            entity,
            redfish_version: wire.redfish_version.unwrap_or_default(),
            uuid: wire.uuid.unwrap_or_default(),
            vendor: wire.vendor.unwrap_or_default(),
            product: wire.product.unwrap_or_default(),
            update_service: wire.update_service.into_string(),
            systems: wire.systems.into_string(),
            chassis: wire.chassis.into_string(),
            managers: wire.managers.into_string(),
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

impl ServiceRoot {
    /// The update service, if this implementation has one
    pub async fn update_service(&self) -> Result<Option<UpdateService>> {
        self.entity.get_linked(&self.update_service).await
    }
}

/// Get the service root
pub async fn get_service_root(client: &ClientHandle) -> Result<ServiceRoot> {
    fetch(client, SERVICE_ROOT).await
}
