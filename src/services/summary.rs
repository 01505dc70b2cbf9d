use std::collections::{BTreeMap, HashMap};

use chrono::{NaiveDate, NaiveDateTime};

use crate::models::{AppUsage, DailyUsage, UsageRecord, UsageSummary};
use crate::utils::{display_app_name, percentage_of};

const UNNAMED_APP: &str = "(unknown)";

/// Apps with less total usage than this are left out of the app ranking.
pub const MIN_APP_SECONDS: f64 = 60.0;

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").ok()
}

/// Per-app totals, largest first. Apps below `min_seconds` are dropped
/// before percentages are taken, so the shares cover the listed apps only.
pub fn app_usage(records: &[UsageRecord], min_seconds: f64) -> Vec<AppUsage> {
    let mut totals: HashMap<&str, (f64, usize)> = HashMap::new();
    for record in records {
        let app = record.app.as_deref().unwrap_or(UNNAMED_APP);
        let entry = totals.entry(app).or_insert((0.0, 0));
        entry.0 += record.usage_seconds;
        entry.1 += 1;
    }
    totals.retain(|_, (secs, _)| *secs >= min_seconds);

    let grand_total: f64 = totals.values().map(|(secs, _)| secs).sum();

    let mut apps: Vec<AppUsage> = totals
        .into_iter()
        .map(|(app, (usage_seconds, count))| {
            let display_name = match display_app_name(app) {
                name if name.is_empty() => app.to_string(),
                name => name,
            };
            AppUsage {
                app: app.to_string(),
                display_name,
                usage_seconds,
                count,
                percentage: percentage_of(usage_seconds, grand_total),
            }
        })
        .collect();

    apps.sort_by(|a, b| {
        b.usage_seconds
            .total_cmp(&a.usage_seconds)
            .then_with(|| a.app.cmp(&b.app))
    });
    apps
}

/// Usage per calendar date of `start_time`, oldest first. Records whose
/// start time does not parse are skipped.
pub fn daily_usage(records: &[UsageRecord]) -> Vec<DailyUsage> {
    let mut days: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for record in records {
        match parse_timestamp(&record.start_time) {
            Some(start) => *days.entry(start.date()).or_insert(0.0) += record.usage_seconds,
            None => log::debug!(
                "Skipping record with unparseable start_time {}",
                record.start_time
            ),
        }
    }

    days.into_iter()
        .map(|(date, usage_seconds)| DailyUsage { date, usage_seconds })
        .collect()
}

/// Records that start and end on `date`, ordered by start time.
pub fn day_timeline(records: &[UsageRecord], date: NaiveDate) -> Vec<&UsageRecord> {
    let mut day: Vec<(NaiveDateTime, &UsageRecord)> = records
        .iter()
        .filter_map(|r| {
            let start = parse_timestamp(&r.start_time)?;
            let end = parse_timestamp(&r.end_time)?;
            (start.date() == date && end.date() == date).then_some((start, r))
        })
        .collect();

    day.sort_by_key(|(start, _)| *start);
    day.into_iter().map(|(_, r)| r).collect()
}

pub fn summarize(records: &[UsageRecord], top: usize, min_app_seconds: f64) -> UsageSummary {
    let mut top_apps = app_usage(records, min_app_seconds);
    top_apps.truncate(top);

    UsageSummary {
        total_seconds: records.iter().map(|r| r.usage_seconds).sum(),
        total_records: records.len(),
        top_apps,
        daily: daily_usage(records),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(app: Option<&str>, usage: f64, start: &str, end: &str) -> UsageRecord {
        UsageRecord {
            app: app.map(str::to_string),
            device_id: "Unknown".to_string(),
            device_model: "Unknown".to_string(),
            usage_seconds: usage,
            timezone_offset: Some(0),
            created_at: end.to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
        }
    }

    fn sample() -> Vec<UsageRecord> {
        vec![
            record(Some("com.apple.Safari"), 100.0, "2025-10-02T10:00:00", "2025-10-02T10:01:40"),
            record(Some("com.apple.Terminal"), 50.0, "2025-10-01T23:59:30", "2025-10-02T00:00:20"),
            record(
                Some("com.apple.Safari"),
                50.0,
                "2025-10-01T09:00:00.250000",
                "2025-10-01T09:00:50.250000",
            ),
            record(None, 100.0, "2025-10-01T08:00:00", "2025-10-01T08:01:40"),
        ]
    }

    #[test]
    fn app_totals_are_sorted_with_floor_percentages() {
        let apps = app_usage(&sample(), 0.0);

        assert_eq!(apps.len(), 3);
        assert_eq!(apps[0].app, "com.apple.Safari");
        assert_eq!(apps[0].display_name, "Safari");
        assert_eq!(apps[0].usage_seconds, 150.0);
        assert_eq!(apps[0].count, 2);
        assert_eq!(apps[0].percentage, 50);

        assert_eq!(apps[1].app, UNNAMED_APP);
        assert_eq!(apps[1].display_name, UNNAMED_APP);
        assert_eq!(apps[1].percentage, 33);

        assert_eq!(apps[2].display_name, "Terminal");
        assert_eq!(apps[2].percentage, 16);
    }

    #[test]
    fn short_lived_apps_are_dropped_before_percentages() {
        let apps = app_usage(&sample(), MIN_APP_SECONDS);

        let names: Vec<&str> = apps.iter().map(|a| a.app.as_str()).collect();
        assert_eq!(names, vec!["com.apple.Safari", UNNAMED_APP]);
        assert_eq!(apps[0].percentage, 60);
        assert_eq!(apps[1].percentage, 40);
    }

    #[test]
    fn threshold_is_inclusive() {
        let records = vec![record(
            Some("com.apple.Notes"),
            60.0,
            "2025-10-01T08:00:00",
            "2025-10-01T08:01:00",
        )];

        let apps = app_usage(&records, MIN_APP_SECONDS);

        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].percentage, 100);
    }

    #[test]
    fn daily_totals_follow_start_date() {
        let daily = daily_usage(&sample());

        assert_eq!(
            daily,
            vec![
                DailyUsage {
                    date: NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
                    usage_seconds: 200.0
                },
                DailyUsage {
                    date: NaiveDate::from_ymd_opt(2025, 10, 2).unwrap(),
                    usage_seconds: 100.0
                },
            ]
        );
    }

    #[test]
    fn timeline_excludes_records_crossing_midnight() {
        let records = sample();
        let day = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();

        let timeline = day_timeline(&records, day);

        let starts: Vec<&str> = timeline.iter().map(|r| r.start_time.as_str()).collect();
        assert_eq!(starts, vec!["2025-10-01T08:00:00", "2025-10-01T09:00:00.250000"]);
    }

    #[test]
    fn summary_truncates_top_apps_but_totals_everything() {
        let summary = summarize(&sample(), 1, MIN_APP_SECONDS);

        assert_eq!(summary.total_records, 4);
        assert_eq!(summary.total_seconds, 300.0);
        assert_eq!(summary.top_apps.len(), 1);
        assert_eq!(summary.daily.len(), 2);
    }

    #[test]
    fn empty_input_summarizes_to_zero() {
        let summary = summarize(&[], 10, MIN_APP_SECONDS);
        assert_eq!(summary.total_records, 0);
        assert!(summary.top_apps.is_empty());
        assert!(summary.daily.is_empty());
    }
}
