use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::models::Settings;

const ENV_DB_PATH: &str = "SCREENFLUX_DB_PATH";
const ENV_OUTPUT_DIR: &str = "SCREENFLUX_OUTPUT_DIR";
const ENV_TIME_BASIS: &str = "SCREENFLUX_TIME_BASIS";
const ENV_UPLOAD: &str = "SCREENFLUX_UPLOAD";
const ENV_BUCKET: &str = "SCREENFLUX_BUCKET";
const ENV_SOURCE_NAME: &str = "SCREENFLUX_SOURCE_NAME";
const ENV_S3_ENDPOINT: &str = "SCREENFLUX_S3_ENDPOINT";

pub fn load_dotenv() {
    let _ = dotenvy::dotenv();
}

/// Defaults, then the optional JSON settings file, then the environment.
pub fn load_settings(config_path: Option<&Path>) -> Result<Settings> {
    let mut settings = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read settings file {}", path.display()))?;
            serde_json::from_str::<Settings>(&content)
                .with_context(|| format!("Invalid settings file {}", path.display()))?
        }
        None => Settings::default(),
    };

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok())?;
    Ok(settings)
}

pub fn apply_env_overrides<F>(settings: &mut Settings, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    if let Some(path) = var(ENV_DB_PATH) {
        settings.source.db_path = PathBuf::from(path);
    }
    if let Some(basis) = var(ENV_TIME_BASIS) {
        settings.source.time_basis = basis
            .parse()
            .map_err(|e: String| anyhow::anyhow!("{}: {}", ENV_TIME_BASIS, e))?;
    }
    if let Some(dir) = var(ENV_OUTPUT_DIR) {
        settings.output.dir = PathBuf::from(dir);
    }
    if let Some(flag) = var(ENV_UPLOAD) {
        settings.upload.enabled = parse_flag(&flag)
            .with_context(|| format!("{} must be true/false, got '{}'", ENV_UPLOAD, flag))?;
    }
    if let Some(bucket) = var(ENV_BUCKET) {
        settings.upload.bucket = bucket;
    }
    if let Some(name) = var(ENV_SOURCE_NAME) {
        settings.upload.source_name = name;
    }
    if let Some(endpoint) = var(ENV_S3_ENDPOINT) {
        settings.upload.endpoint = Some(endpoint);
    }

    Ok(())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Expand a leading `~/` to the user's home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::models::TimeBasis;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_keep_upload_disabled() {
        let settings = Settings::default();
        assert!(!settings.upload.enabled);
        assert_eq!(settings.upload.source_name, "macos-activity");
        assert_eq!(settings.output.dir, PathBuf::from("./data"));
        assert_eq!(settings.source.time_basis, TimeBasis::Local);
    }

    #[test]
    fn environment_overrides_defaults() {
        let vars = env(&[
            (ENV_DB_PATH, "/tmp/knowledgeC.db"),
            (ENV_OUTPUT_DIR, "/tmp/out"),
            (ENV_TIME_BASIS, "UTC"),
            (ENV_UPLOAD, "yes"),
            (ENV_BUCKET, "my-bucket"),
            (ENV_SOURCE_NAME, "  "),
        ]);
        let mut settings = Settings::default();

        apply_env_overrides(&mut settings, |k| vars.get(k).cloned()).unwrap();

        assert_eq!(settings.source.db_path, PathBuf::from("/tmp/knowledgeC.db"));
        assert_eq!(settings.output.dir, PathBuf::from("/tmp/out"));
        assert_eq!(settings.source.time_basis, TimeBasis::Utc);
        assert!(settings.upload.enabled);
        assert_eq!(settings.upload.bucket, "my-bucket");
        // Blank values are ignored.
        assert_eq!(settings.upload.source_name, "macos-activity");
        assert_eq!(settings.upload.endpoint, None);
    }

    #[test]
    fn bad_flag_is_rejected() {
        let vars = env(&[(ENV_UPLOAD, "sometimes")]);
        let mut settings = Settings::default();
        assert!(apply_env_overrides(&mut settings, |k| vars.get(k).cloned()).is_err());
    }

    #[test]
    fn settings_file_sections_are_optional() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"upload": {"enabled": true, "bucket": "b"}}"#).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let settings: Settings = serde_json::from_str(&content).unwrap();

        assert!(settings.upload.enabled);
        assert_eq!(settings.upload.bucket, "b");
        assert_eq!(settings.upload.source_name, "macos-activity");
        assert_eq!(settings.output.dir, PathBuf::from("./data"));
    }

    #[test]
    fn home_prefix_expands() {
        let expanded = expand_home(Path::new("~/Library/x.db"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expanded, home.join("Library/x.db"));
        }
        assert_eq!(expand_home(Path::new("/abs/x.db")), PathBuf::from("/abs/x.db"));
    }
}
