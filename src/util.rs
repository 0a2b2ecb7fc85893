// Small helpers with no platform dependencies.

use chrono::{DateTime, Local};

/// Download name for a browser-side capture, `IMG_YYYYMMDD_HHMMSS.jpg`
/// in local time.
pub fn capture_file_name(at: DateTime<Local>) -> String {
    at.format("IMG_%Y%m%d_%H%M%S.jpg").to_string()
}

pub fn capture_file_name_now() -> String {
    capture_file_name(Local::now())
}

/// Clock display for an active recording.
pub fn format_elapsed(secs: u64) -> String {
    let m = secs / 60;
    let s = secs % 60;
    format!("{:02}:{:02}", m, s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn capture_name_matches_the_timestamp_pattern() {
        let at = Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 42).unwrap();
        assert_eq!(capture_file_name(at), "IMG_20240307_090542.jpg");
    }

    #[test]
    fn capture_name_zero_pads_every_field() {
        let at = Local.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(capture_file_name(at), "IMG_20250102_030405.jpg");
    }

    #[test]
    fn elapsed_is_minutes_and_seconds() {
        assert_eq!(format_elapsed(0), "00:00");
        assert_eq!(format_elapsed(59), "00:59");
        assert_eq!(format_elapsed(61), "01:01");
        assert_eq!(format_elapsed(600), "10:00");
    }
}
