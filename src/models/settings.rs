use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_DB_PATH: &str = "~/Library/Application Support/Knowledge/knowledgeC.db";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub source: SourceSettings,
    #[serde(default)]
    pub output: OutputSettings,
    #[serde(default)]
    pub upload: UploadSettings,
}

/// Time zone the exported timestamps and month keys are rendered in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeBasis {
    #[default]
    Local,
    Utc,
}

impl std::str::FromStr for TimeBasis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(TimeBasis::Local),
            "utc" => Ok(TimeBasis::Utc),
            other => Err(format!("unknown time basis '{}' (expected local or utc)", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    pub db_path: PathBuf,
    pub time_basis: TimeBasis,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            time_basis: TimeBasis::Local,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub dir: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./data"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadSettings {
    pub enabled: bool,
    pub bucket: String,
    pub source_name: String,
    pub endpoint: Option<String>,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            bucket: "aebels-activity".to_string(),
            source_name: "macos-activity".to_string(),
            endpoint: None,
        }
    }
}
