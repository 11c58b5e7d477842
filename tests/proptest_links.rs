//! Property-based tests using proptest
//!
//! These tests verify link normalization, decode idempotence and opaque
//! passthrough of vendor actions using randomized payloads.

use proptest::prelude::*;
use rfmodel::common::{Link, Resource};
use rfmodel::redfish::UpdateService;
use serde_json::{json, Value};

/// Generate service-relative Redfish URIs
fn arb_uri() -> impl Strategy<Value = String> {
    prop::collection::vec("[A-Za-z0-9_.-]{1,16}", 0..6)
        .prop_map(|segments| format!("/redfish/v1/{}", segments.join("/")))
}

/// Generate vendor action names that never collide with schema actions
fn arb_vendor_action() -> impl Strategy<Value = String> {
    ("[A-Z][a-z]{2,8}", "[A-Z][A-Za-z]{2,12}")
        .prop_map(|(vendor, action)| format!("#{}Vendor.{}", vendor, action))
}

/// Generate UpdateService payloads with optional links and actions
fn arb_update_service() -> impl Strategy<Value = Value> {
    (
        arb_uri(),
        proptest::option::of(arb_uri()),
        proptest::option::of(arb_uri()),
        prop::collection::vec(prop_oneof!["HTTP", "HTTPS", "FTP", "SCP", "NFS", "CIFS"], 0..4),
        any::<bool>(),
    )
        .prop_map(|(id, firmware, target, protocols, enabled)| {
            let mut payload = json!({
                "@odata.id": id,
                "ServiceEnabled": enabled,
            });
            if let Some(firmware) = firmware {
                payload["FirmwareInventory"] = json!({"@odata.id": firmware});
            }
            if let Some(target) = target {
                payload["Actions"] = json!({
                    "#UpdateService.SimpleUpdate": {
                        "target": target,
                        "TransferProtocol@Redfish.AllowableValues": protocols,
                    }
                });
            }
            payload
        })
}

proptest! {
    /// Bare string and link object decode to the identical URI
    #[test]
    fn link_encodings_agree(uri in arb_uri()) {
        let bare: Link = serde_json::from_value(json!(uri)).unwrap();
        let object: Link = serde_json::from_value(json!({"@odata.id": uri})).unwrap();
        prop_assert_eq!(bare.as_str(), uri.as_str());
        prop_assert_eq!(bare, object);
    }

    /// Serialized links decode back to the same URI
    #[test]
    fn link_survives_reencoding(uri in arb_uri()) {
        let link = Link::new(&uri);
        let encoded = serde_json::to_string(&link).unwrap();
        let decoded: Link = serde_json::from_str(&encoded).unwrap();
        prop_assert_eq!(decoded, link);
    }

    /// Decoding the same bytes twice yields equal entities holding the input bytes
    #[test]
    fn decode_is_idempotent(payload in arb_update_service()) {
        let raw = serde_json::to_vec_pretty(&payload).unwrap();
        let first = UpdateService::decode(&raw).unwrap();
        let second = UpdateService::decode(&raw).unwrap();

        prop_assert_eq!(first.entity.raw(), raw.as_slice());
        prop_assert_eq!(second.entity.raw(), raw.as_slice());
        prop_assert_eq!(first, second);
    }

    /// Absent links and actions decode to empty strings
    #[test]
    fn absent_fields_are_empty(payload in arb_update_service()) {
        let raw = serde_json::to_vec(&payload).unwrap();
        let service = UpdateService::decode(&raw).unwrap();

        if payload.get("FirmwareInventory").is_none() {
            prop_assert!(service.firmware_inventory.is_empty());
        }
        if payload.get("Actions").is_none() {
            prop_assert!(service.update_service_target.is_empty());
            prop_assert!(service.transfer_protocol.is_empty());
        }
        prop_assert!(service.software_inventory.is_empty());
    }

    /// Unrecognized vendor actions come back unchanged
    #[test]
    fn vendor_actions_round_trip(
        name in arb_vendor_action(),
        target in arb_uri(),
    ) {
        let action = json!({"target": target, "Mode@Redfish.AllowableValues": ["Now"]});
        let payload = json!({
            "@odata.id": "/redfish/v1/UpdateService",
            "Actions": {
                "#UpdateService.SimpleUpdate": {"target": "/redfish/v1/UpdateService/Actions/SimpleUpdate"},
                name.clone(): action.clone(),
            }
        });
        let raw = serde_json::to_vec(&payload).unwrap();
        let service = UpdateService::decode(&raw).unwrap();

        let blob = service.vendor_actions.expect("vendor actions kept");
        let preserved: Value = blob.parse().unwrap();
        prop_assert_eq!(preserved, json!({ name: action }));
    }
}
