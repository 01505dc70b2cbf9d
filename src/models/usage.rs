use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub const UNKNOWN_DEVICE: &str = "Unknown";

/// One row of the `/app/usage` stream as the source query returns it.
/// Timestamps are seconds since the source's 2001-01-01 reference epoch.
#[derive(Debug, Clone, PartialEq)]
pub struct RawUsageRow {
    pub app: Option<String>,
    pub usage: f64,
    pub start_time: f64,
    pub end_time: f64,
    pub created_at: f64,
    pub timezone: Option<i64>,
    pub device_id: Option<String>,
    pub device_model: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub app: Option<String>,
    pub device_id: String,
    pub device_model: String,
    #[serde(rename = "usage")]
    pub usage_seconds: f64,
    #[serde(rename = "timezone")]
    pub timezone_offset: Option<i64>,
    pub created_at: String,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthGroup {
    pub month: String,
    pub records: Vec<UsageRecord>,
}

/// Records bucketed by `YYYY-MM`, iterating months in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct MonthGroups {
    groups: Vec<MonthGroup>,
    index: HashMap<String, usize>,
}

impl MonthGroups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, month: &str, record: UsageRecord) {
        let slot = match self.index.get(month) {
            Some(&slot) => slot,
            None => {
                self.groups.push(MonthGroup {
                    month: month.to_string(),
                    records: Vec::new(),
                });
                let slot = self.groups.len() - 1;
                self.index.insert(month.to_string(), slot);
                slot
            }
        };
        self.groups[slot].records.push(record);
    }

    pub fn iter(&self) -> impl Iterator<Item = &MonthGroup> {
        self.groups.iter()
    }

    pub fn months(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.month.as_str())
    }

    /// Number of months.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn total_records(&self) -> usize {
        self.groups.iter().map(|g| g.records.len()).sum()
    }

    /// Every record, group by group, in iteration order.
    pub fn flatten(&self) -> Vec<&UsageRecord> {
        self.groups.iter().flat_map(|g| g.records.iter()).collect()
    }
}
