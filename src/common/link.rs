//! Link references between resources
//!
//! Redfish points at related resources with `{"@odata.id": "/redfish/v1/..."}`,
//! and some services emit the bare URI string instead. [`Link`] accepts both
//! and keeps only the URI, so the rest of the crate deals in plain strings.
//!
//! An empty link means "not linked": nothing is fetched for it.

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Key holding a resource's canonical URI.
pub const ODATA_ID: &str = "@odata.id";

/// URI of a related resource, not yet fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Link(String);

impl Link {
    pub fn new(uri: &str) -> Self {
        Self(uri.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Collapse decoded links into their URIs, keeping order.
pub fn into_uris(links: Vec<Link>) -> Vec<String> {
    links.into_iter().map(Link::into_string).collect()
}

impl From<String> for Link {
    fn from(uri: String) -> Self {
        Self(uri)
    }
}

impl From<&str> for Link {
    fn from(uri: &str) -> Self {
        Self::new(uri)
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

struct LinkVisitor;

impl<'de> Visitor<'de> for LinkVisitor {
    type Value = Link;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a URI string or an object with an @odata.id member")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Link, E> {
        Ok(Link::new(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Link, E> {
        Ok(Link(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Link, E> {
        Ok(Link::default())
    }

    fn visit_none<E: de::Error>(self) -> Result<Link, E> {
        Ok(Link::default())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Link, A::Error> {
        let mut uri: Option<String> = None;
        while let Some(key) = map.next_key::<String>()? {
            if key == ODATA_ID {
                if uri.is_some() {
                    return Err(de::Error::duplicate_field(ODATA_ID));
                }
                uri = Some(map.next_value()?);
            } else {
                // expanded navigation property, only the id matters here
                map.next_value::<IgnoredAny>()?;
            }
        }
        uri.map(Link).ok_or_else(|| de::Error::missing_field(ODATA_ID))
    }
}

impl<'de> Deserialize<'de> for Link {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(LinkVisitor)
    }
}

impl Serialize for Link {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(ODATA_ID, &self.0)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(rename = "FirmwareInventory", default)]
        firmware_inventory: Link,
    }

    #[test]
    fn bare_string_and_object_decode_the_same() {
        let bare: Link = serde_json::from_str(r#""/redfish/v1/UpdateService/FirmwareInventory""#).unwrap();
        let object: Link =
            serde_json::from_str(r#"{"@odata.id": "/redfish/v1/UpdateService/FirmwareInventory"}"#)
                .unwrap();
        assert_eq!(bare, object);
        assert_eq!(object.as_str(), "/redfish/v1/UpdateService/FirmwareInventory");
    }

    #[test]
    fn expanded_object_keeps_only_the_id() {
        let link: Link = serde_json::from_str(
            r#"{"@odata.id": "/redfish/v1/Systems/1", "Name": "System", "Links": {"Chassis": []}}"#,
        )
        .unwrap();
        assert_eq!(link.as_str(), "/redfish/v1/Systems/1");
    }

    #[test]
    fn absent_and_null_links_are_empty() {
        let absent: Holder = serde_json::from_str("{}").unwrap();
        assert!(absent.firmware_inventory.is_empty());

        let null: Holder = serde_json::from_str(r#"{"FirmwareInventory": null}"#).unwrap();
        assert!(null.firmware_inventory.is_empty());
    }

    #[test]
    fn object_without_id_is_rejected() {
        let err = serde_json::from_str::<Link>(r#"{"Name": "orphan"}"#).unwrap_err();
        assert!(err.to_string().contains("missing field `@odata.id`"));
    }

    #[test]
    fn other_json_types_are_rejected() {
        assert!(serde_json::from_str::<Link>("42").is_err());
        assert!(serde_json::from_str::<Link>("true").is_err());
        assert!(serde_json::from_str::<Link>(r#"["/a"]"#).is_err());
        assert!(serde_json::from_str::<Link>(r#"{"@odata.id": 7}"#).is_err());
    }

    #[test]
    fn serializes_as_link_object() {
        let json = serde_json::to_string(&Link::new("/redfish/v1")).unwrap();
        assert_eq!(json, r#"{"@odata.id":"/redfish/v1"}"#);
    }

    #[test]
    fn link_arrays_keep_order() {
        let links: Vec<Link> =
            serde_json::from_str(r#"[{"@odata.id": "/b"}, "/a", {"@odata.id": "/c"}]"#).unwrap();
        assert_eq!(into_uris(links), vec!["/b", "/a", "/c"]);
    }
}
