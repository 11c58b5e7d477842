//! Collection Fetcher
//!
//! Resolves collection links: fetch the envelope, walk its `Members` in order
//! (following `Members@odata.nextLink` pages), then fetch and decode each
//! member.

use crate::client::ClientHandle;
use crate::common::entity::{fetch, get_raw, Resource};
use crate::common::link::{into_uris, Link};
use crate::error::{DecodeError, Result};
use futures::stream::{self, StreamExt, TryStreamExt};
use serde::Deserialize;
use std::collections::HashSet;

const COLLECTION_TYPE_NAME: &str = "ResourceCollection";

/// Member fetches in flight at once for [`list_referenced_concurrent`]
pub const MAX_CONCURRENT_FETCHES: usize = 4;

/// One page of a collection envelope
#[derive(Debug, Deserialize)]
struct CollectionPage {
    #[serde(rename = "Members", default)]
    members: Option<Vec<Link>>,
    #[serde(rename = "Members@odata.count", default)]
    count: Option<u64>,
    #[serde(rename = "Members@odata.nextLink", default)]
    next_link: Link,
}

/// Member URIs of the collection at `uri`, in envelope order (auto-paginate)
pub async fn collection_links(client: &ClientHandle, uri: &str) -> Result<Vec<String>> {
    if uri.is_empty() {
        return Ok(Vec::new());
    }

    let mut all_members = Vec::new();
    let mut visited = HashSet::new();
    let mut page_uri = uri.to_string();
    let mut declared = None;

    loop {
        visited.insert(page_uri.clone());
        let raw = get_raw(client, &page_uri).await?;
        let page: CollectionPage = serde_json::from_slice(&raw)
            .map_err(|e| DecodeError::new(COLLECTION_TYPE_NAME, e))?;

        declared = declared.or(page.count);
        all_members.extend(into_uris(page.members.unwrap_or_default()));

        if page.next_link.is_empty() {
            break;
        }
        if visited.contains(page.next_link.as_str()) {
            tracing::warn!("{}: nextLink {} loops back, stopping", uri, page.next_link);
            break;
        }
        page_uri = page.next_link.into_string();
    }

    if let Some(count) = declared {
        if count != all_members.len() as u64 {
            tracing::warn!(
                "{}: Members@odata.count is {} but {} members listed",
                uri,
                count,
                all_members.len()
            );
        }
    }

    // An empty member link points nowhere; there is nothing to fetch for it
    all_members.retain(|member| !member.is_empty());
    tracing::debug!("{}: {} members", uri, all_members.len());

    Ok(all_members)
}

/// Fetch every member of the collection at `uri`, one after another.
///
/// An empty `uri` is not an error: the resource simply links no collection.
/// Any member failure fails the whole call.
pub async fn list_referenced<T: Resource>(client: &ClientHandle, uri: &str) -> Result<Vec<T>> {
    let member_uris = collection_links(client, uri).await?;

    let mut members = Vec::with_capacity(member_uris.len());
    for member in &member_uris {
        members.push(fetch::<T>(client, member).await?);
    }

    Ok(members)
}

/// Like [`list_referenced`], with up to [`MAX_CONCURRENT_FETCHES`] member
/// fetches in flight.
///
/// Results keep envelope order.
pub async fn list_referenced_concurrent<T: Resource>(
    client: &ClientHandle,
    uri: &str,
) -> Result<Vec<T>> {
    let member_uris = collection_links(client, uri).await?;
    stream::iter(member_uris.iter().map(|member| fetch::<T>(client, member)))
        .buffered(MAX_CONCURRENT_FETCHES)
        .try_collect()
        .await
}

/// Fetch a single linked resource. An empty `uri` yields `None`.
pub async fn get_referenced<T: Resource>(client: &ClientHandle, uri: &str) -> Result<Option<T>> {
    if uri.is_empty() {
        return Ok(None);
    }
    fetch(client, uri).await.map(Some)
}
