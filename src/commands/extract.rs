use std::sync::Arc;

use anyhow::Result;

use crate::database::{self, queries};
use crate::models::{MonthGroups, Settings};
use crate::services::aggregator;
use crate::services::object_store::S3ObjectStore;
use crate::services::uploader::ObjectStoreSink;
use crate::services::writer::{JsonFileSink, RecordSink};
use crate::utils::config::expand_home;

/// Sinks for a run: local JSON files always, the object store when enabled.
pub async fn build_sinks(settings: &Settings) -> Vec<Box<dyn RecordSink>> {
    let mut sinks: Vec<Box<dyn RecordSink>> =
        vec![Box::new(JsonFileSink::new(expand_home(&settings.output.dir)))];

    if settings.upload.enabled {
        let store = S3ObjectStore::connect(settings.upload.endpoint.as_deref()).await;
        sinks.push(Box::new(ObjectStoreSink::new(
            Arc::new(store),
            settings.upload.bucket.clone(),
            settings.upload.source_name.clone(),
        )));
    }

    sinks
}

/// Read, group and hand the groups to every sink in order. Nothing is
/// written unless the source could be read in full.
pub async fn extract(settings: &Settings, sinks: &[Box<dyn RecordSink>]) -> Result<MonthGroups> {
    let db_path = expand_home(&settings.source.db_path);

    let conn = database::open_source(&db_path)?;
    let rows = queries::fetch_usage_rows(&conn, &db_path)?;
    log::info!("Read {} usage rows from {}", rows.len(), db_path.display());

    let groups = aggregator::group_rows(rows, settings.source.time_basis)?;
    if groups.is_empty() {
        log::warn!("No app usage rows found in {}", db_path.display());
    }

    for sink in sinks {
        log::debug!("Writing to sink {}", sink.name());
        sink.write(&groups).await?;
    }

    Ok(groups)
}

pub async fn run(settings: &Settings) -> Result<()> {
    let sinks = build_sinks(settings).await;
    extract(settings, &sinks).await?;
    Ok(())
}
