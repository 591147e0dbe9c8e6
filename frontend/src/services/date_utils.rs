use chrono::{Datelike, NaiveDate};

/// Weekday names indexed Monday-first, matching the server's grid layout.
pub const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January", 2 => "February", 3 => "March", 4 => "April",
        5 => "May", 6 => "June", 7 => "July", 8 => "August",
        9 => "September", 10 => "October", 11 => "November", 12 => "December",
        _ => "January",
    }
}

/// Step the visible (year, month) pair by one month in either
/// direction, wrapping across year boundaries.
pub fn step_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let next = month as i32 + delta;
    if next > 12 {
        (year + 1, 1)
    } else if next < 1 {
        (year - 1, 12)
    } else {
        (year, next as u32)
    }
}

/// Build a YYYY-MM-DD string from calendar coordinates.
pub fn iso_date(year: i32, month: u32, day: u32) -> String {
    format!("{:04}-{:02}-{:02}", year, month, day)
}

/// Get current date in YYYY-MM-DD format from the host clock.
pub fn today_string() -> String {
    use js_sys::Date;
    let now = Date::new_0();
    let year = now.get_full_year();
    let month = now.get_month() + 1; // JavaScript months are 0-indexed
    let day = now.get_date();

    format!("{:04}-{:02}-{:02}", year as u32, month as u32, day as u32)
}

/// Parse a YYYY-MM-DD string into its (year, month) coordinates.
pub fn year_month_of(date: &str) -> Option<(i32, u32)> {
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    Some((parsed.year(), parsed.month()))
}

/// Long-form label for the selected day, e.g. "Friday, 14 March 2025".
pub fn format_long_date(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(parsed) => {
            let weekday = DAY_NAMES[parsed.weekday().num_days_from_monday() as usize];
            format!(
                "{}, {} {} {}",
                weekday,
                parsed.day(),
                month_name(parsed.month()),
                parsed.year()
            )
        }
        Err(_) => date.to_string(),
    }
}

/// Short label for search result rows, e.g. "Friday, 14 March".
pub fn format_short_date(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(parsed) => {
            let weekday = DAY_NAMES[parsed.weekday().num_days_from_monday() as usize];
            format!("{}, {} {}", weekday, parsed.day(), month_name(parsed.month()))
        }
        Err(_) => date.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_month_wraps_forward_into_next_year() {
        assert_eq!(step_month(2024, 12, 1), (2025, 1));
    }

    #[test]
    fn step_month_wraps_backward_into_previous_year() {
        assert_eq!(step_month(2025, 1, -1), (2024, 12));
    }

    #[test]
    fn step_month_stays_within_year() {
        assert_eq!(step_month(2025, 6, 1), (2025, 7));
        assert_eq!(step_month(2025, 6, -1), (2025, 5));
    }

    #[test]
    fn iso_date_zero_pads_components() {
        assert_eq!(iso_date(2025, 3, 4), "2025-03-04");
    }

    #[test]
    fn year_month_of_reads_coordinates() {
        assert_eq!(year_month_of("2025-03-14"), Some((2025, 3)));
        assert_eq!(year_month_of("not-a-date"), None);
    }

    #[test]
    fn long_date_uses_monday_first_weekday_names() {
        // 2025-03-14 is a Friday, 2025-03-17 a Monday
        assert_eq!(format_long_date("2025-03-14"), "Friday, 14 March 2025");
        assert_eq!(format_long_date("2025-03-17"), "Monday, 17 March 2025");
    }

    #[test]
    fn long_date_falls_back_to_raw_input() {
        assert_eq!(format_long_date("garbage"), "garbage");
    }

    #[test]
    fn short_date_drops_the_year() {
        assert_eq!(format_short_date("2025-03-14"), "Friday, 14 March");
    }
}
