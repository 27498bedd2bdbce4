use time::{OffsetDateTime, UtcOffset};
use time::macros::format_description;

pub const BYTES_PER_MB: u64 = 1024 * 1024;
pub const BYTES_PER_GB: u64 = 1024 * 1024 * 1024;

/// Format a byte count as a human-readable string (B, KB, MB, GB)
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;

    if bytes >= BYTES_PER_GB {
        format!("{:.2} GB", bytes as f64 / BYTES_PER_GB as f64)
    } else if bytes >= BYTES_PER_MB {
        format!("{:.2} MB", bytes as f64 / BYTES_PER_MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Bytes to mebibytes, rounded to 2 decimal places.
pub fn megabytes(bytes: u64) -> f64 {
    round_to(bytes as f64 / BYTES_PER_MB as f64, 2)
}

/// Bytes to gibibytes, rounded to 3 decimal places.
pub fn gigabytes(bytes: u64) -> f64 {
    round_to(bytes as f64 / BYTES_PER_GB as f64, 3)
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Group digits in thousands: `1234567` -> `1,234,567`
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// The local UTC offset, or UTC when it cannot be determined.
///
/// On Unix the offset can only be read while the process is single-threaded,
/// so call this before starting the async runtime and keep the result.
pub fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}

/// Current time expressed in `offset`
pub fn now_in(offset: UtcOffset) -> OffsetDateTime {
    OffsetDateTime::now_utc().to_offset(offset)
}

/// Format a timestamp as `YYYY-MM-DD HH:MM:SS`
pub fn format_timestamp(at: OffsetDateTime) -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    at.format(&format).unwrap_or_else(|_| "unknown".to_string())
}

/// Compact timestamp for file names: `YYYYMMDD_HHMMSS`
pub fn file_stamp(at: OffsetDateTime) -> String {
    let format = format_description!("[year][month][day]_[hour][minute][second]");
    at.format(&format).unwrap_or_else(|_| "unknown".to_string())
}
