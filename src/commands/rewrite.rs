use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::models::RewriteStatus;
use crate::services::object_store::{FsObjectStore, ObjectStore, S3ObjectStore};
use crate::services::rewrite;

pub struct RewriteOptions {
    /// Notification JSON; stdin when absent.
    pub event: Option<PathBuf>,
    /// Serve objects from this directory instead of S3.
    pub store_dir: Option<PathBuf>,
    pub endpoint: Option<String>,
}

fn read_event(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path)
            .with_context(|| format!("Failed to read event {}", path.display())),
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read event from stdin")?;
            Ok(buf)
        }
    }
}

pub async fn run(options: &RewriteOptions) -> Result<RewriteStatus> {
    let payload = read_event(options.event.as_deref())?;

    let store: Box<dyn ObjectStore> = match &options.store_dir {
        Some(dir) => Box::new(FsObjectStore::new(dir)),
        None => Box::new(S3ObjectStore::connect(options.endpoint.as_deref()).await),
    };

    let status = rewrite::handle_event(store.as_ref(), &payload).await?;
    println!("{}", serde_json::to_string(&status)?);
    Ok(status)
}
