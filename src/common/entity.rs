//! Entity base shared by every resource
//!
//! Concrete resources embed an [`Entity`] and implement [`Resource`]. The
//! entity carries identity, the payload exactly as received, and the client
//! handle used to follow links later.

use crate::client::ClientHandle;
use crate::error::{DecodeError, Error, Result};
use crate::resource::{get_referenced, list_referenced};
use serde::Deserialize;
use std::fmt;

/// Identity fields plus the retained payload and client handle.
#[derive(Clone, Default)]
pub struct Entity {
    pub odata_id: String,
    pub odata_type: String,
    pub odata_context: String,
    pub etag: String,
    pub id: String,
    pub name: String,
    raw: Vec<u8>,
    /// URI the payload was fetched from; empty for entities decoded locally
    fetched_from: String,
    client: Option<ClientHandle>,
}

#[derive(Deserialize)]
struct EntityWire {
    #[serde(rename = "@odata.id", default)]
    odata_id: Option<String>,
    #[serde(rename = "@odata.type", default)]
    odata_type: Option<String>,
    #[serde(rename = "@odata.context", default)]
    odata_context: Option<String>,
    #[serde(rename = "@odata.etag", default)]
    etag: Option<String>,
    #[serde(rename = "Id", default)]
    id: Option<String>,
    #[serde(rename = "Name", default)]
    name: Option<String>,
}

impl Entity {
    /// Decode the identity fields of `raw` and keep `raw` itself untouched.
    pub fn from_payload(raw: &[u8]) -> std::result::Result<Self, serde_json::Error> {
        let wire: EntityWire = serde_json::from_slice(raw)?;
        Ok(Self {
            odata_id: wire.odata_id.unwrap_or_default(),
            odata_type: wire.odata_type.unwrap_or_default(),
            odata_context: wire.odata_context.unwrap_or_default(),
            etag: wire.etag.unwrap_or_default(),
            id: wire.id.unwrap_or_default(),
            name: wire.name.unwrap_or_default(),
            raw: raw.to_vec(),
            fetched_from: String::new(),
            client: None,
        })
    }

    /// Payload bytes as received from the service.
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// True when `payload` is byte-identical to the stored payload.
    pub fn matches_payload(&self, payload: &[u8]) -> bool {
        self.raw == payload
    }

    pub(crate) fn attach(&mut self, client: ClientHandle, uri: &str) {
        self.client = Some(client);
        self.fetched_from = uri.to_string();
    }

    /// URI to re-read this entity from: where it was fetched, else its
    /// `@odata.id`.
    pub fn location(&self) -> &str {
        if self.fetched_from.is_empty() {
            &self.odata_id
        } else {
            &self.fetched_from
        }
    }

    pub fn is_attached(&self) -> bool {
        self.client.is_some()
    }

    /// Client this entity was fetched through.
    pub fn client(&self) -> Result<&ClientHandle> {
        self.client.as_ref().ok_or_else(|| Error::Detached {
            resource: self.describe(),
        })
    }

    /// Re-fetch this entity and report whether the payload changed.
    pub async fn has_changed(&self) -> Result<bool> {
        let client = self.client()?;
        let location = self.location();
        if location.is_empty() {
            return Err(Error::Detached {
                resource: self.describe(),
            });
        }
        let fresh = get_raw(client, location).await?;
        let changed = !self.matches_payload(&fresh);
        tracing::debug!("{} changed: {}", location, changed);
        Ok(changed)
    }

    /// Resolve a collection link held by this entity.
    ///
    /// An empty link resolves to an empty list without any request.
    pub async fn list_linked<T: Resource>(&self, uri: &str) -> Result<Vec<T>> {
        if uri.is_empty() {
            tracing::debug!("{}: no {} collection linked", self.describe(), T::TYPE_NAME);
            return Ok(Vec::new());
        }
        list_referenced(self.client()?, uri).await
    }

    /// Resolve a single-resource link held by this entity.
    pub async fn get_linked<T: Resource>(&self, uri: &str) -> Result<Option<T>> {
        if uri.is_empty() {
            tracing::debug!("{}: no {} linked", self.describe(), T::TYPE_NAME);
            return Ok(None);
        }
        get_referenced(self.client()?, uri).await
    }

    fn describe(&self) -> String {
        if self.odata_id.is_empty() {
            "<unidentified resource>".to_string()
        } else {
            self.odata_id.clone()
        }
    }
}

/// The client handle is not part of an entity's value.
impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.odata_id == other.odata_id
            && self.odata_type == other.odata_type
            && self.odata_context == other.odata_context
            && self.etag == other.etag
            && self.id == other.id
            && self.name == other.name
            && self.raw == other.raw
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("odata_id", &self.odata_id)
            .field("odata_type", &self.odata_type)
            .field("id", &self.id)
            .field("name", &self.name)
            .field("raw_len", &self.raw.len())
            .field("fetched_from", &self.fetched_from)
            .field("attached", &self.client.is_some())
            .finish()
    }
}

/// A typed resource decoded from a Redfish payload.
pub trait Resource: Sized + Send + 'static {
    /// Schema name, used in errors and logs.
    const TYPE_NAME: &'static str;

    /// Two-stage decode: identity via [`Entity::from_payload`], then the
    /// type's own fields. Must not touch the network.
    fn decode(raw: &[u8]) -> std::result::Result<Self, DecodeError>;

    fn entity(&self) -> &Entity;

    fn entity_mut(&mut self) -> &mut Entity;

    fn odata_id(&self) -> &str {
        &self.entity().odata_id
    }

    fn decode_error(source: serde_json::Error) -> DecodeError {
        DecodeError::new(Self::TYPE_NAME, source)
    }
}

/// Raw GET with the URI attached to any transport failure.
pub(crate) async fn get_raw(client: &ClientHandle, uri: &str) -> Result<Vec<u8>> {
    client.get(uri).await.map_err(|source| Error::Transport {
        uri: uri.to_string(),
        source,
    })
}

/// Fetch `uri`, decode it as `T` and attach `client` to the result.
pub async fn fetch<T: Resource>(client: &ClientHandle, uri: &str) -> Result<T> {
    tracing::debug!("fetch {} {}", T::TYPE_NAME, uri);
    let raw = get_raw(client, uri).await?;
    let mut resource = T::decode(&raw)?;
    resource.entity_mut().attach(client.clone(), uri);
    Ok(resource)
}
