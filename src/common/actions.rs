//! `Actions` sub-object decoding
//!
//! Every resource may carry an `Actions` object keyed by qualified action name
//! (`#UpdateService.SimpleUpdate`), plus an `Oem` key for vendor actions.
//! Stage one of a resource decode keeps the object as ordered raw members;
//! stage two pulls the actions it knows into [`ActionDescriptor`]s and hands
//! everything else back as opaque blobs.

use super::opaque::{BlobOrigin, OpaqueBlob};
use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Deserialize;
use serde_json::value::RawValue;
use std::collections::BTreeMap;
use std::fmt;

/// Suffix of the annotation listing the values a parameter accepts.
pub const ALLOWABLE_VALUES_SUFFIX: &str = "@Redfish.AllowableValues";

/// Annotation linking to the action's parameter description.
pub const ACTION_INFO: &str = "@Redfish.ActionInfo";

const OEM_KEY: &str = "Oem";

/// Raw `Actions` members in payload order.
#[derive(Debug, Clone, Default)]
pub struct Actions {
    entries: Vec<(String, Box<RawValue>)>,
}

impl Actions {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&RawValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, raw)| &**raw)
    }

    /// Decode a known action. An absent action yields an empty descriptor.
    pub fn descriptor(&self, name: &str) -> Result<ActionDescriptor, serde_json::Error> {
        match self.get(name) {
            Some(raw) => serde_json::from_str(raw.get()),
            None => Ok(ActionDescriptor::default()),
        }
    }

    /// The `Oem` member, verbatim.
    pub fn oem(&self) -> Option<OpaqueBlob> {
        self.get(OEM_KEY)
            .map(|raw| OpaqueBlob::from_raw(BlobOrigin::OemActions, raw))
    }

    /// Members that are neither `Oem` nor one of `known`, re-assembled into a
    /// JSON object whose values are byte-identical to the payload.
    pub fn unrecognized(&self, known: &[&str]) -> Option<OpaqueBlob> {
        let mut members = Vec::new();
        for (name, raw) in &self.entries {
            if name == OEM_KEY || known.contains(&name.as_str()) {
                continue;
            }
            // a String always serializes
            let key = serde_json::to_string(name).unwrap_or_default();
            members.push(format!("{}:{}", key, raw.get()));
        }

        if members.is_empty() {
            return None;
        }

        let object = format!("{{{}}}", members.join(","));
        Some(OpaqueBlob::new(BlobOrigin::VendorActions, object.into_bytes()))
    }
}

struct ActionsVisitor;

impl<'de> Visitor<'de> for ActionsVisitor {
    type Value = Actions;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an Actions object")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Actions, E> {
        Ok(Actions::default())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Actions, A::Error> {
        let mut entries = Vec::new();
        while let Some((name, raw)) = map.next_entry::<String, Box<RawValue>>()? {
            entries.push((name, raw));
        }
        Ok(Actions { entries })
    }
}

impl<'de> Deserialize<'de> for Actions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ActionsVisitor)
    }
}

/// One action flattened out of `Actions`: where to POST it and which values
/// its parameters accept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionDescriptor {
    pub target: String,
    pub action_info: String,
    /// Parameter name -> allowed values
    pub allowable_values: BTreeMap<String, Vec<String>>,
}

impl ActionDescriptor {
    /// Allowed values for `parameter`, empty when the service lists none.
    pub fn allowable(&self, parameter: &str) -> Vec<String> {
        self.allowable_values
            .get(parameter)
            .cloned()
            .unwrap_or_default()
    }
}

struct DescriptorVisitor;

impl<'de> Visitor<'de> for DescriptorVisitor {
    type Value = ActionDescriptor;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an action object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<ActionDescriptor, A::Error> {
        let mut descriptor = ActionDescriptor::default();
        while let Some(key) = map.next_key::<String>()? {
            // Some services capitalize it
            // null reads as absent
            if key.eq_ignore_ascii_case("target") {
                descriptor.target = map.next_value::<Option<String>>()?.unwrap_or_default();
            } else if key == ACTION_INFO {
                descriptor.action_info = map.next_value::<Option<String>>()?.unwrap_or_default();
            } else if let Some(parameter) = key.strip_suffix(ALLOWABLE_VALUES_SUFFIX) {
                let values = map.next_value::<Option<Vec<String>>>()?.unwrap_or_default();
                descriptor
                    .allowable_values
                    .insert(parameter.to_string(), values);
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(descriptor)
    }
}

impl<'de> Deserialize<'de> for ActionDescriptor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(DescriptorVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACTIONS: &str = r##"{
        "#UpdateService.SimpleUpdate": {
            "target": "/redfish/v1/UpdateService/Actions/UpdateService.SimpleUpdate",
            "@Redfish.ActionInfo": "/redfish/v1/UpdateService/SimpleUpdateActionInfo",
            "TransferProtocol@Redfish.AllowableValues": ["HTTP", "HTTPS"],
            "title": "Simple update"
        },
        "#Contoso.Reflash": {"target": "/redfish/v1/UpdateService/Actions/Contoso.Reflash"},
        "Oem": {"#Contoso.Wipe": {"target": "/wipe"}}
    }"##;

    #[test]
    fn descriptor_flattens_target_and_allowable_values() {
        let actions: Actions = serde_json::from_str(ACTIONS).unwrap();
        let simple = actions.descriptor("#UpdateService.SimpleUpdate").unwrap();

        assert_eq!(
            simple.target,
            "/redfish/v1/UpdateService/Actions/UpdateService.SimpleUpdate"
        );
        assert_eq!(
            simple.action_info,
            "/redfish/v1/UpdateService/SimpleUpdateActionInfo"
        );
        assert_eq!(simple.allowable("TransferProtocol"), vec!["HTTP", "HTTPS"]);
        assert!(simple.allowable("Targets").is_empty());
    }

    #[test]
    fn missing_action_is_empty() {
        let actions: Actions = serde_json::from_str(ACTIONS).unwrap();
        let start = actions.descriptor("#UpdateService.StartUpdate").unwrap();
        assert_eq!(start, ActionDescriptor::default());
    }

    #[test]
    fn names_keep_payload_order() {
        let actions: Actions = serde_json::from_str(ACTIONS).unwrap();
        let names: Vec<&str> = actions.names().collect();
        assert_eq!(
            names,
            vec!["#UpdateService.SimpleUpdate", "#Contoso.Reflash", "Oem"]
        );
    }

    #[test]
    fn oem_and_unknown_actions_stay_opaque() {
        let actions: Actions = serde_json::from_str(ACTIONS).unwrap();

        let oem = actions.oem().unwrap();
        assert_eq!(oem.origin(), BlobOrigin::OemActions);
        assert_eq!(oem.as_bytes(), br##"{"#Contoso.Wipe": {"target": "/wipe"}}"##);

        let vendor = actions
            .unrecognized(&["#UpdateService.SimpleUpdate"])
            .unwrap();
        assert_eq!(vendor.origin(), BlobOrigin::VendorActions);
        assert_eq!(
            vendor.as_bytes(),
            br##"{"#Contoso.Reflash":{"target": "/redfish/v1/UpdateService/Actions/Contoso.Reflash"}}"##
        );
    }

    #[test]
    fn nothing_unrecognized_yields_none() {
        let actions: Actions = serde_json::from_str(
            r##"{"#UpdateService.SimpleUpdate": {"target": "/s"}, "Oem": {}}"##,
        )
        .unwrap();
        assert!(actions
            .unrecognized(&["#UpdateService.SimpleUpdate"])
            .is_none());
    }

    #[test]
    fn malformed_descriptor_is_an_error() {
        let actions: Actions =
            serde_json::from_str(r##"{"#UpdateService.SimpleUpdate": {"target": 12}}"##).unwrap();
        assert!(actions.descriptor("#UpdateService.SimpleUpdate").is_err());

        let actions: Actions =
            serde_json::from_str(r##"{"#UpdateService.SimpleUpdate": "nope"}"##).unwrap();
        assert!(actions.descriptor("#UpdateService.SimpleUpdate").is_err());
    }

    #[test]
    fn null_annotations_read_as_absent() {
        let actions: Actions = serde_json::from_str(
            r##"{"#UpdateService.SimpleUpdate": {
                "target": "/t",
                "@Redfish.ActionInfo": null,
                "TransferProtocol@Redfish.AllowableValues": null
            }}"##,
        )
        .unwrap();
        let simple = actions.descriptor("#UpdateService.SimpleUpdate").unwrap();
        assert_eq!(simple.target, "/t");
        assert!(simple.action_info.is_empty());
        assert!(simple.allowable("TransferProtocol").is_empty());

        let actions: Actions =
            serde_json::from_str(r##"{"#UpdateService.SimpleUpdate": {"target": null}}"##).unwrap();
        let simple = actions.descriptor("#UpdateService.SimpleUpdate").unwrap();
        assert!(simple.target.is_empty());
    }

    #[test]
    fn null_actions_are_empty() {
        let actions: Actions = serde_json::from_str("null").unwrap();
        assert!(actions.is_empty());
    }
}
