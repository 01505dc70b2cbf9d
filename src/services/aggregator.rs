use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Timelike, Utc};

use crate::error::TransformError;
use crate::models::{MonthGroups, RawUsageRow, TimeBasis, UsageRecord, UNKNOWN_DEVICE};

/// Seconds between the Core Data reference date (2001-01-01T00:00:00Z) and
/// the Unix epoch.
pub const REFERENCE_EPOCH_OFFSET: i64 = 978_307_200;

const MICROS_PER_SEC: i64 = 1_000_000;

/// Convert a reference-epoch timestamp to UTC, rounded to the microsecond.
pub fn reference_to_utc(
    seconds: f64,
    field: &'static str,
) -> Result<DateTime<Utc>, TransformError> {
    let invalid = || TransformError::InvalidTimestamp {
        field,
        value: seconds,
    };

    if !seconds.is_finite() {
        return Err(invalid());
    }

    let micros = (seconds * MICROS_PER_SEC as f64).round();
    if micros.abs() >= i64::MAX as f64 {
        return Err(invalid());
    }

    let unix_micros = (micros as i64)
        .checked_add(REFERENCE_EPOCH_OFFSET * MICROS_PER_SEC)
        .ok_or_else(invalid)?;

    let secs = unix_micros.div_euclid(MICROS_PER_SEC);
    let nanos = (unix_micros.rem_euclid(MICROS_PER_SEC) * 1_000) as u32;
    DateTime::from_timestamp(secs, nanos).ok_or_else(invalid)
}

/// ISO-8601 without offset; the fractional part only appears when non-zero.
pub fn format_timestamp(naive: &NaiveDateTime) -> String {
    if naive.nanosecond() == 0 {
        naive.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        naive.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

fn render<Tz: TimeZone>(
    seconds: f64,
    field: &'static str,
    tz: &Tz,
) -> Result<NaiveDateTime, TransformError> {
    Ok(reference_to_utc(seconds, field)?.with_timezone(tz).naive_local())
}

fn device_field(value: Option<String>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| UNKNOWN_DEVICE.to_string())
}

/// Build the record for one row and the month it belongs to.
pub fn to_record<Tz: TimeZone>(
    row: RawUsageRow,
    tz: &Tz,
) -> Result<(String, UsageRecord), TransformError> {
    let created_at = render(row.created_at, "created_at", tz)?;
    let start_time = render(row.start_time, "start_time", tz)?;
    let end_time = render(row.end_time, "end_time", tz)?;

    let month = created_at.format("%Y-%m").to_string();

    let record = UsageRecord {
        app: row.app,
        device_id: device_field(row.device_id),
        device_model: device_field(row.device_model),
        usage_seconds: row.usage,
        timezone_offset: row.timezone,
        created_at: format_timestamp(&created_at),
        start_time: format_timestamp(&start_time),
        end_time: format_timestamp(&end_time),
    };

    Ok((month, record))
}

pub fn group_by_month<Tz, I>(rows: I, tz: &Tz) -> Result<MonthGroups, TransformError>
where
    Tz: TimeZone,
    I: IntoIterator<Item = RawUsageRow>,
{
    let mut groups = MonthGroups::new();
    for row in rows {
        let (month, record) = to_record(row, tz)?;
        groups.push(&month, record);
    }
    Ok(groups)
}

pub fn group_rows(rows: Vec<RawUsageRow>, basis: TimeBasis) -> Result<MonthGroups, TransformError> {
    let groups = match basis {
        TimeBasis::Local => group_by_month(rows, &Local)?,
        TimeBasis::Utc => group_by_month(rows, &Utc)?,
    };
    log::info!(
        "Grouped {} records into {} months",
        groups.total_records(),
        groups.len()
    );
    log::debug!("Months: {}", groups.months().collect::<Vec<_>>().join(", "));
    Ok(groups)
}
