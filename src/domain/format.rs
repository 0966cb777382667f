/// Conversion constants
pub const MS_PER_SEC: u64 = 1000;
pub const SECS_PER_MIN: u64 = 60;
pub const MINS_PER_HOUR: u64 = 60;
pub const HOURS_PER_DAY: u64 = 24;

/// Format milliseconds as "HH:MM:SS".
///
/// Fields are zero-padded to two digits. Hours are not wrapped at a day, so a runtime of
/// 100 hours or more renders with three hour digits ("100:00:00").
pub fn format_hms(milliseconds: u64) -> String {
    let total_secs = milliseconds / MS_PER_SEC;
    let total_mins = total_secs / SECS_PER_MIN;
    let hours = total_mins / MINS_PER_HOUR;

    let seconds = total_secs % SECS_PER_MIN;
    let minutes = total_mins % MINS_PER_HOUR;

    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Convert an hours/minutes/seconds triple to milliseconds
pub fn hms_to_ms(hours: u64, minutes: u64, seconds: u64) -> u64 {
    ((hours * MINS_PER_HOUR + minutes) * SECS_PER_MIN + seconds) * MS_PER_SEC
}

/// Format a percentage with one decimal place
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_hms() {
        assert_eq!(format_hms(0), "00:00:00");
        assert_eq!(format_hms(999), "00:00:00");
        assert_eq!(format_hms(30_000), "00:00:30");
        assert_eq!(format_hms(61_000), "00:01:01");
        assert_eq!(format_hms(hms_to_ms(1, 2, 3)), "01:02:03");
        assert_eq!(format_hms(hms_to_ms(23, 59, 59)), "23:59:59");
    }

    #[test]
    fn test_format_hms_past_two_hour_digits() {
        assert_eq!(format_hms(hms_to_ms(100, 0, 0)), "100:00:00");
    }

    #[test]
    fn test_hms_to_ms() {
        assert_eq!(hms_to_ms(0, 0, 5), 5_000);
        assert_eq!(hms_to_ms(0, 1, 0), 60_000);
        assert_eq!(hms_to_ms(1, 0, 0), 3_600_000);
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(75.0), "75.0%");
        assert_eq!(format_percent(33.333), "33.3%");
    }
}
