//! Shared utility functions for AQM crates.

/// Time label helpers
pub mod time {
    use chrono::{DateTime, Local, NaiveTime, TimeZone, Timelike};

    /// Format a time of day as a 24h "HH:MM" label.
    pub fn format_label(time: &NaiveTime) -> String {
        format!("{:02}:{:02}", time.hour(), time.minute())
    }

    /// "HH:MM" label for an instant in any time zone.
    pub fn label_for<Tz: TimeZone>(instant: &DateTime<Tz>) -> String {
        format_label(&instant.time())
    }

    /// "HH:MM" label for the current local wall-clock time.
    pub fn now_label() -> String {
        label_for(&Local::now())
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::{NaiveDate, Utc};

        #[test]
        fn test_format_label() {
            let t = NaiveTime::from_hms_opt(9, 5, 59).unwrap();
            assert_eq!(format_label(&t), "09:05");
        }

        #[test]
        fn test_label_for() {
            let instant = NaiveDate::from_ymd_opt(2024, 10, 18)
                .unwrap()
                .and_hms_opt(23, 59, 0)
                .unwrap()
                .and_utc();
            assert_eq!(label_for::<Utc>(&instant), "23:59");
        }

        #[test]
        fn test_now_label_shape() {
            let label = now_label();
            assert_eq!(label.len(), 5);
            assert_eq!(&label[2..3], ":");
        }
    }
}

/// Coordinate formatting helpers
pub mod coords {
    /// "lat, lon" with a fixed number of decimals.
    pub fn format_pair(lat: f64, lon: f64, decimals: usize) -> String {
        format!("{:.*}, {:.*}", decimals, lat, decimals, lon)
    }

    /// Label given to an unnamed point picked on the map.
    pub fn point_label(lat: f64, lon: f64) -> String {
        format!("Location ({})", format_pair(lat, lon, 3))
    }

}
