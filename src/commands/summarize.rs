use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::models::{UsageRecord, UsageSummary};
use crate::services::summary;
use crate::utils::{format_duration, format_percentage};

pub struct SummarizeOptions {
    pub input: PathBuf,
    pub top: usize,
    pub min_app_seconds: f64,
    pub day: Option<NaiveDate>,
    pub json: bool,
}

pub fn load_records(path: &std::path::Path) -> Result<Vec<UsageRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("{} is not a usage document", path.display()))
}

pub fn render(summary: &UsageSummary) -> String {
    let mut out = format!(
        "Total: {} across {} records\n",
        format_duration(summary.total_seconds),
        summary.total_records
    );

    if !summary.top_apps.is_empty() {
        out.push_str("\nTop apps:\n");
        for app in &summary.top_apps {
            out.push_str(&format!(
                "  {:<32} {:>10} {:>5}\n",
                app.display_name,
                format_duration(app.usage_seconds),
                format_percentage(app.percentage)
            ));
        }
    }

    if !summary.daily.is_empty() {
        out.push_str("\nDaily:\n");
        for day in &summary.daily {
            out.push_str(&format!("  {} {:>10}\n", day.date, format_duration(day.usage_seconds)));
        }
    }

    out
}

fn render_timeline(date: NaiveDate, records: &[&UsageRecord]) -> String {
    let mut out = format!("\nTimeline for {}:\n", date);
    for record in records {
        out.push_str(&format!(
            "  {} - {}  {}\n",
            record.start_time,
            record.end_time,
            record.app.as_deref().unwrap_or("(unknown)")
        ));
    }
    out
}

pub fn run(options: &SummarizeOptions) -> Result<()> {
    let records = load_records(&options.input)?;
    let summary = summary::summarize(&records, options.top, options.min_app_seconds);
    log::info!("Summarized {} records from {}", records.len(), options.input.display());

    if options.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    print!("{}", render(&summary));
    if let Some(date) = options.day {
        let timeline = summary::day_timeline(&records, date);
        print!("{}", render_timeline(date, &timeline));
    }
    Ok(())
}
