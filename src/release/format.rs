//! Human-readable sizes and timestamps for release pages.

use chrono::{DateTime, NaiveDateTime, Utc};

const KIB: f64 = 1024.0;
const MIB: f64 = KIB * 1024.0;
const GIB: f64 = MIB * 1024.0;

/// Render a byte count with binary units and two decimals.
pub fn format_size(size: Option<u64>) -> String {
    let Some(bytes) = size else {
        return "N/A".to_string();
    };
    #[allow(clippy::cast_precision_loss)]
    let value = bytes as f64;
    if bytes < 1024 {
        format!("{bytes} B")
    } else if value < MIB {
        format!("{:.2} KB", value / KIB)
    } else if value < GIB {
        format!("{:.2} MB", value / MIB)
    } else {
        format!("{:.2} GB", value / GIB)
    }
}

/// Render an ISO 8601 timestamp as `YYYY-MM-DD HH:MM:SS UTC`.
///
/// Timestamps without an offset are taken to be UTC already.
pub fn format_timestamp(timestamp: Option<&str>) -> String {
    let Some(raw) = timestamp.filter(|s| !s.is_empty()) else {
        return "N/A".to_string();
    };
    parse_utc(raw).map_or_else(
        || "Invalid Timestamp".to_string(),
        |dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    )
}

fn parse_utc(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_units() {
        assert_eq!(format_size(None), "N/A");
        assert_eq!(format_size(Some(0)), "0 B");
        assert_eq!(format_size(Some(1023)), "1023 B");
        assert_eq!(format_size(Some(1024)), "1.00 KB");
        assert_eq!(format_size(Some(1536)), "1.50 KB");
        assert_eq!(format_size(Some(5 * 1024 * 1024)), "5.00 MB");
        assert_eq!(format_size(Some(3 * 1024 * 1024 * 1024)), "3.00 GB");
    }

    #[test]
    fn test_format_timestamp_zulu() {
        assert_eq!(
            format_timestamp(Some("2024-05-01T12:34:56Z")),
            "2024-05-01 12:34:56 UTC"
        );
    }

    #[test]
    fn test_format_timestamp_converts_offset_to_utc() {
        assert_eq!(
            format_timestamp(Some("2024-05-01T12:00:00+02:00")),
            "2024-05-01 10:00:00 UTC"
        );
    }

    #[test]
    fn test_format_timestamp_naive_is_utc() {
        assert_eq!(
            format_timestamp(Some("2024-05-01T08:00:00")),
            "2024-05-01 08:00:00 UTC"
        );
    }

    #[test]
    fn test_format_timestamp_missing_or_bad() {
        assert_eq!(format_timestamp(None), "N/A");
        assert_eq!(format_timestamp(Some("")), "N/A");
        assert_eq!(format_timestamp(Some("yesterday")), "Invalid Timestamp");
    }
}
