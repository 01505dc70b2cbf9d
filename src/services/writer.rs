use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;

use crate::models::MonthGroups;

pub const COMBINED_FILE_NAME: &str = "all_screen_time_data.json";

pub fn month_file_name(month: &str) -> String {
    format!("screen_time_{}.json", month)
}

/// Destination for grouped usage records.
#[async_trait]
pub trait RecordSink: Send + Sync {
    fn name(&self) -> &str;

    async fn write(&self, groups: &MonthGroups) -> Result<()>;
}

/// Two-space indented JSON.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(value)?)
}

/// Writes one file per month plus a combined file into a local directory.
pub struct JsonFileSink {
    dir: PathBuf,
}

impl JsonFileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn write_file(&self, file_name: &str, body: &[u8]) -> Result<()> {
        let path = self.dir.join(file_name);
        fs::write(&path, body).with_context(|| format!("Failed to write {}", path.display()))?;
        log::debug!("Wrote {} ({} bytes)", path.display(), body.len());
        Ok(())
    }
}

#[async_trait]
impl RecordSink for JsonFileSink {
    fn name(&self) -> &str {
        "json-files"
    }

    async fn write(&self, groups: &MonthGroups) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create output directory {}", self.dir.display()))?;

        for group in groups.iter() {
            let body = to_pretty_json(&group.records)?;
            self.write_file(&month_file_name(&group.month), &body)?;
        }

        let all = groups.flatten();
        self.write_file(COMBINED_FILE_NAME, &to_pretty_json(&all)?)?;

        log::info!(
            "Wrote {} monthly files and {} ({} records) to {}",
            groups.len(),
            COMBINED_FILE_NAME,
            all.len(),
            self.dir.display()
        );
        Ok(())
    }
}
