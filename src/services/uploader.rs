use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;

use super::object_store::{ObjectStore, JSON_CONTENT_TYPE};
use super::writer::{to_pretty_json, RecordSink};
use crate::models::MonthGroups;

pub fn raw_key(source_name: &str, month: &str) -> String {
    format!("raw/{}/{}.json", source_name, month)
}

/// Pushes each month's payload to `raw/<source>/<month>.json`. One attempt
/// per object; the first failure aborts the run.
pub struct ObjectStoreSink {
    store: Arc<dyn ObjectStore>,
    bucket: String,
    source_name: String,
}

impl ObjectStoreSink {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        bucket: impl Into<String>,
        source_name: impl Into<String>,
    ) -> Self {
        Self {
            store,
            bucket: bucket.into(),
            source_name: source_name.into(),
        }
    }
}

#[async_trait]
impl RecordSink for ObjectStoreSink {
    fn name(&self) -> &str {
        "object-store"
    }

    async fn write(&self, groups: &MonthGroups) -> Result<()> {
        for group in groups.iter() {
            let key = raw_key(&self.source_name, &group.month);
            let body = to_pretty_json(&group.records)?;

            self.store
                .put_object(&self.bucket, &key, body, JSON_CONTENT_TYPE)
                .await
                .with_context(|| format!("Failed to upload s3://{}/{}", self.bucket, key))?;

            log::info!(
                "Uploaded data for {} ({} records) to s3://{}/{}",
                group.month,
                group.records.len(),
                self.bucket,
                key
            );
        }
        Ok(())
    }
}
