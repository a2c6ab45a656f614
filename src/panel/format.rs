//! Human-readable formatting for sizes, rates, and durations

/// Format bytes as human readable string
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

/// Format speed as human readable string
pub fn format_speed(bytes_per_second: f64) -> String {
    format!("{}/s", format_bytes(bytes_per_second as u64))
}

/// Format a duration in seconds as `minutes:seconds`.
///
/// Zero, negative, and non-finite inputs render as the `--:--` placeholder,
/// which stands in for "unknown" until a usable speed sample exists.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "--:--".to_string();
    }

    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1024), "1.0 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1048576), "1.0 MB");
        assert_eq!(format_bytes(1073741824), "1.0 GB");
    }

    #[test]
    fn test_format_bytes_saturates_at_gb() {
        // Stays within the unit table for very large inputs
        assert_eq!(format_bytes(1_000_000_000_000), "931.3 GB");
        assert_eq!(format_bytes(u64::MAX), format!("{:.1} GB", u64::MAX as f64 / 1073741824.0));
    }

    #[test]
    fn test_format_speed() {
        assert_eq!(format_speed(0.0), "0 B/s");
        assert_eq!(format_speed(1024.0), "1.0 KB/s");
        assert_eq!(format_speed(1048576.0), "1.0 MB/s");
    }

    #[test]
    fn test_format_time_placeholder() {
        assert_eq!(format_time(0.0), "--:--");
        assert_eq!(format_time(-3.0), "--:--");
        assert_eq!(format_time(f64::INFINITY), "--:--");
        assert_eq!(format_time(f64::NAN), "--:--");
    }

    #[test]
    fn test_format_time_minutes_and_seconds() {
        assert_eq!(format_time(5.0), "0:05");
        assert_eq!(format_time(59.9), "0:59");
        assert_eq!(format_time(60.0), "1:00");
        assert_eq!(format_time(125.0), "2:05");
        assert_eq!(format_time(3601.0), "60:01");
    }
}
