pub mod config;

/// `3725.0` -> `"1h 2m"`. Seconds below a minute are dropped.
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{}h {}m", total / 3600, (total % 3600) / 60)
}

pub fn format_percentage(percentage: u32) -> String {
    format!("{}%", percentage)
}

/// Floor of the share `part` takes of `total`, in whole percent.
pub fn percentage_of(part: f64, total: f64) -> u32 {
    if total <= 0.0 {
        return 0;
    }
    (100.0 * part / total).floor().max(0.0) as u32
}

/// Human name for a bundle id: `com.apple.Safari` -> `Safari`,
/// `com.microsoft.VSCode.helper` -> `VSCode helper`.
pub fn display_app_name(bundle_id: &str) -> String {
    bundle_id
        .split('.')
        .filter(|part| *part != "com" && *part != "org")
        .skip(1)
        .collect::<Vec<_>>()
        .join(" ")
}
