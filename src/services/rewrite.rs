//! Event-triggered relocation of staged documents from `raw/` to `processed/`.

use serde_json::Value;

use super::object_store::{ObjectStore, JSON_CONTENT_TYPE};
use crate::error::RewriteError;
use crate::models::{ObjectCreatedEvent, ObjectLocation, RewriteStatus};

const RAW_SEGMENT: &str = "raw/";
const PROCESSED_SEGMENT: &str = "processed/";

pub fn parse_event(payload: &[u8]) -> Result<ObjectLocation, RewriteError> {
    let event: ObjectCreatedEvent = serde_json::from_slice(payload).map_err(RewriteError::Event)?;
    event.location().ok_or(RewriteError::EmptyEvent)
}

/// Swap the first `raw/` path segment for `processed/`. Keys without one
/// come back unchanged.
pub fn destination_key(key: &str) -> String {
    let mut offset = 0;
    while let Some(found) = key[offset..].find(RAW_SEGMENT) {
        let at = offset + found;
        if at == 0 || key.as_bytes()[at - 1] == b'/' {
            return format!("{}{}{}", &key[..at], PROCESSED_SEGMENT, &key[at + RAW_SEGMENT.len()..]);
        }
        offset = at + RAW_SEGMENT.len();
    }
    key.to_string()
}

/// Enrichment hook for staged documents. Must stay pure so that replaying a
/// notification rewrites the same bytes.
pub fn transform(document: Value) -> Value {
    document
}

pub async fn handle_object_created(
    store: &dyn ObjectStore,
    location: &ObjectLocation,
) -> Result<RewriteStatus, RewriteError> {
    let body = store.get_object(&location.bucket, &location.key).await?;
    let document: Value = serde_json::from_slice(&body).map_err(RewriteError::Parse)?;

    let processed = transform(document);

    let new_key = destination_key(&location.key);
    if new_key == location.key {
        log::warn!(
            "Key {} has no raw/ segment, rewriting in place",
            location.key
        );
    }

    let payload = serde_json::to_vec(&processed).map_err(RewriteError::Encode)?;
    store
        .put_object(&location.bucket, &new_key, payload, JSON_CONTENT_TYPE)
        .await?;

    log::info!(
        "Rewrote s3://{}/{} -> s3://{}/{}",
        location.bucket,
        location.key,
        location.bucket,
        new_key
    );
    Ok(RewriteStatus::ok(new_key))
}

/// Full notification handling: decode the event, then rewrite its object.
pub async fn handle_event(
    store: &dyn ObjectStore,
    payload: &[u8],
) -> Result<RewriteStatus, RewriteError> {
    let location = parse_event(payload)?;
    handle_object_created(store, &location).await
}
