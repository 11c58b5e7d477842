//! UpdateService
//!
//! Firmware/software update service of a Redfish implementation. Its two
//! actions are flattened onto the struct, its inventory collections are kept
//! as links and resolved through [`UpdateService::firmware_inventories`] and
//! [`UpdateService::software_inventories`].

use super::SoftwareInventory;
use crate::client::ClientHandle;
use crate::common::actions::Actions;
use crate::common::entity::{fetch, Entity, Resource};
use crate::common::link::Link;
use crate::common::opaque::{BlobOrigin, OpaqueBlob};
use crate::common::status::Status;
use crate::error::{DecodeError, Result};
use serde::Deserialize;
use serde_json::value::RawValue;

pub const SIMPLE_UPDATE: &str = "#UpdateService.SimpleUpdate";
pub const START_UPDATE: &str = "#UpdateService.StartUpdate";

/// Update service offered by the Redfish API
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateService {
    pub entity: Entity,
    pub description: String,
    /// Link to the firmware inventory collection
    pub firmware_inventory: String,
    /// Link to the software inventory collection
    pub software_inventory: String,
    /// Endpoint accepting firmware images pushed with POST
    pub http_push_uri: String,
    /// Endpoint accepting multipart firmware pushes
    pub multipart_http_push_uri: String,
    pub service_enabled: bool,
    pub status: Status,
    /// Protocols SimpleUpdate can fetch images with
    pub transfer_protocol: Vec<String>,
    /// SimpleUpdate action target
    pub update_service_target: String,
    pub simple_update_action_info: String,
    /// StartUpdate action target, applies images staged with
    /// `OperationApplyTime` = `OnStartUpdateRequest`
    pub start_update_target: String,
    /// `Actions.Oem`, left for vendor code to parse
    pub oem_actions: Option<OpaqueBlob>,
    /// Action keys other than the schema actions and `Oem`
    pub vendor_actions: Option<OpaqueBlob>,
    pub oem: Option<OpaqueBlob>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct UpdateServiceWire {
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    firmware_inventory: Link,
    #[serde(default)]
    software_inventory: Link,
    #[serde(default)]
    http_push_uri: Option<String>,
    #[serde(default)]
    multipart_http_push_uri: Option<String>,
    /// Pre-1.4 spelling; some services still send it, sometimes alongside
    #[serde(rename = "MultiPartHttpPushUri", default)]
    legacy_multipart_http_push_uri: Option<String>,
    #[serde(default)]
    service_enabled: Option<bool>,
    #[serde(default)]
    status: Option<Status>,
    #[serde(default)]
    actions: Actions,
    #[serde(default)]
    oem: Option<Box<RawValue>>,
}

impl Resource for UpdateService {
    const TYPE_NAME: &'static str = "UpdateService";

    fn decode(raw: &[u8]) -> std::result::Result<Self, DecodeError> {
        let entity = Entity::from_payload(raw).map_err(Self::decode_error)?;
        let wire: UpdateServiceWire = serde_json::from_slice(raw).map_err(Self::decode_error)?;

        let simple_update = wire
            .actions
            .descriptor(SIMPLE_UPDATE)
            .map_err(Self::decode_error)?;
        let start_update = wire
            .actions
            .descriptor(START_UPDATE)
            .map_err(Self::decode_error)?;

        Ok(Self {
            entity,
            description: wire.description.unwrap_or_default(),
            firmware_inventory: wire.firmware_inventory.into_string(),
            software_inventory: wire.software_inventory.into_string(),
            http_push_uri: wire.http_push_uri.unwrap_or_default(),
            multipart_http_push_uri: wire
                .multipart_http_push_uri
                .or(wire.legacy_multipart_http_push_uri)
                .unwrap_or_default(),
            service_enabled: wire.service_enabled.unwrap_or_default(),
            status: wire.status.unwrap_or_default(),
            transfer_protocol: simple_update.allowable("TransferProtocol"),
            update_service_target: simple_update.target,
            simple_update_action_info: simple_update.action_info,
            start_update_target: start_update.target,
            oem_actions: wire.actions.oem(),
            vendor_actions: wire.actions.unrecognized(&[SIMPLE_UPDATE, START_UPDATE]),
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

impl UpdateService {
    /// Software inventories linked from this update service
    pub async fn software_inventories(&self) -> Result<Vec<SoftwareInventory>> {
        self.entity.list_linked(&self.software_inventory).await
    }

    /// Firmware inventories linked from this update service
    pub async fn firmware_inventories(&self) -> Result<Vec<SoftwareInventory>> {
        self.entity.list_linked(&self.firmware_inventory).await
    }
}

/// Get an UpdateService from the service
pub async fn get_update_service(client: &ClientHandle, uri: &str) -> Result<UpdateService> {
    fetch(client, uri).await
}
