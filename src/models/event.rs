use serde::{Deserialize, Serialize};

/// S3 "object created" notification, trimmed to the fields the rewrite needs.
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectCreatedEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<EventRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventRecord {
    pub s3: S3Entity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Entity {
    pub bucket: S3Bucket,
    pub object: S3Object,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Bucket {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Object {
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectLocation {
    pub bucket: String,
    pub key: String,
}

impl ObjectCreatedEvent {
    /// Location of the object named by the first record.
    pub fn location(&self) -> Option<ObjectLocation> {
        self.records.first().map(|r| ObjectLocation {
            bucket: r.s3.bucket.name.clone(),
            key: r.s3.object.key.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteStatus {
    pub status: String,
    pub destination_key: String,
}

impl RewriteStatus {
    pub fn ok(destination_key: String) -> Self {
        Self {
            status: "ok".to_string(),
            destination_key,
        }
    }
}
