//! Human-readable durations and percentages

use chrono::Local;

/// Format a number of seconds as `HHh:MMm:SSs`
pub fn seconds_to_hms(seconds: u64) -> String {
    let (minutes, secs) = (seconds / 60, seconds % 60);
    let (hours, minutes) = (minutes / 60, minutes % 60);
    format!("{hours:02}h:{minutes:02}m:{secs:02}s")
}

/// Format a fraction (0.0 - 1.0) as a percentage with two decimals
pub fn decimal_to_percentage(decimal: f64) -> String {
    format!("{:.2}%", decimal * 100.0)
}

/// Current local time as `YYYY-MM-DD HH:MM:SS`
pub fn current_strftime() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
