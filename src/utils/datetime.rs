use chrono::{Local, NaiveDateTime};

/// Display format for persisted timestamps: `05-03-2024 02:07 PM`.
pub const DISPLAY_FORMAT: &str = "%d-%m-%Y %I:%M %p";

pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(DISPLAY_FORMAT).to_string()
}

/// Wall-clock time used when recording attendance.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn afternoon_uses_twelve_hour_clock() {
        assert_eq!(format_timestamp(ts(2024, 3, 5, 14, 7)), "05-03-2024 02:07 PM");
    }

    #[test]
    fn midnight_and_noon() {
        assert_eq!(format_timestamp(ts(2024, 12, 31, 0, 0)), "31-12-2024 12:00 AM");
        assert_eq!(format_timestamp(ts(2024, 1, 1, 12, 30)), "01-01-2024 12:30 PM");
    }

    #[test]
    fn parses_iso_input() {
        let at: NaiveDateTime = "2024-03-05T14:07:00".parse().unwrap();
        assert_eq!(format_timestamp(at), "05-03-2024 02:07 PM");
    }
}
