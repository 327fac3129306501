//! Calendar
//!
//! Promotional and delivery windows derived from a single point in time.
//! Every predicate is computed eagerly from one injected instant, so a
//! snapshot is internally consistent and tests can pin any date they like.

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, Timelike, Weekday};

/// Hour from which the weekend surcharge starts on Fridays.
const SURCHARGE_START_HOUR: u32 = 15;

/// Last hour (inclusive) of the surcharge tail on Monday nights.
const SURCHARGE_TAIL_LAST_HOUR: u32 = 3;

/// Last hour (inclusive) of the Monday morning discount.
const MONDAY_DISCOUNT_LAST_HOUR: u32 = 10;

/// Night delivery applies from this hour...
const NIGHT_START_HOUR: u32 = 23;

/// ...until (exclusive) this hour the next morning.
const NIGHT_END_HOUR: u32 = 6;

/// Friday midday meeting window, inclusive hour range.
const MEETING_HOURS: std::ops::RangeInclusive<u32> = 11..=13;

/// A snapshot of every time-based window the engine reads, taken at one
/// instant.
#[expect(
    clippy::struct_excessive_bools,
    reason = "a calendar snapshot is a record of independent predicates"
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calendar {
    /// The instant the snapshot was taken from.
    timestamp: NaiveDateTime,

    /// Saturday or Sunday.
    pub is_weekend: bool,

    /// The weekend surcharge window: Friday from 15:00, all weekend, and
    /// Monday until 03:59. Spans midnight on both ends of the calendar
    /// weekend.
    pub weekend_surcharge_window: bool,

    /// Monday until 10:59.
    pub monday_morning_discount_window: bool,

    /// Tuesday in an even-numbered week.
    pub tuesday_even_week_discount_window: bool,

    /// From 23:00 until 05:59 on any day.
    pub night_delivery_window: bool,

    /// Friday between 11:00 and 13:59.
    pub friday_midday_meeting_window: bool,

    /// December 13th, any year.
    pub is_lucia: bool,

    /// December 24th, any year.
    pub is_christmas_eve: bool,

    /// Week number, counted in Monday-indexed weeks from January 1st.
    pub week_number: u32,
}

impl Calendar {
    /// Take a snapshot at the given instant.
    pub fn at(timestamp: NaiveDateTime) -> Self {
        let weekday = timestamp.weekday();
        let hour = timestamp.hour();

        let is_weekend = matches!(weekday, Weekday::Sat | Weekday::Sun);
        let is_friday = weekday == Weekday::Fri;
        let is_monday = weekday == Weekday::Mon;
        let week_number = week_number(timestamp);

        Calendar {
            timestamp,
            is_weekend,
            weekend_surcharge_window: (is_friday && hour >= SURCHARGE_START_HOUR)
                || is_weekend
                || (is_monday && hour <= SURCHARGE_TAIL_LAST_HOUR),
            monday_morning_discount_window: is_monday && hour <= MONDAY_DISCOUNT_LAST_HOUR,
            tuesday_even_week_discount_window: weekday == Weekday::Tue && week_number % 2 == 0,
            night_delivery_window: hour >= NIGHT_START_HOUR || hour < NIGHT_END_HOUR,
            friday_midday_meeting_window: is_friday && MEETING_HOURS.contains(&hour),
            is_lucia: timestamp.month() == 12 && timestamp.day() == 13,
            is_christmas_eve: timestamp.month() == 12 && timestamp.day() == 24,
            week_number,
        }
    }

    /// Take a snapshot at the current local time.
    pub fn now() -> Self {
        Self::at(Local::now().naive_local())
    }

    /// The instant this snapshot was taken from.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }
}

/// Week number for an instant: `ceil((day_of_year + jan1_offset - 1) / 7)`,
/// where `jan1_offset` is the Monday-indexed weekday of January 1st.
///
/// January 1st falling on a Monday yields week 0 for that day; the formula
/// is kept as-is since week parity downstream depends on it.
fn week_number(timestamp: NaiveDateTime) -> u32 {
    let jan1_offset = NaiveDate::from_ymd_opt(timestamp.year(), 1, 1)
        .map_or(0, |jan1| jan1.weekday().num_days_from_monday());

    (timestamp.ordinal() + jan1_offset - 1).div_ceil(7)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn calendar(s: &str) -> Result<Calendar, chrono::ParseError> {
        Ok(Calendar::at(NaiveDateTime::parse_from_str(
            s,
            "%Y-%m-%d %H:%M",
        )?))
    }

    #[test]
    fn weekend_surcharge_window_spans_friday_afternoon_to_monday_night() -> TestResult {
        assert!(!calendar("2025-01-10 14:59")?.weekend_surcharge_window);
        assert!(calendar("2025-01-10 15:00")?.weekend_surcharge_window);
        assert!(calendar("2025-01-11 12:00")?.weekend_surcharge_window);
        assert!(calendar("2025-01-12 23:59")?.weekend_surcharge_window);
        assert!(calendar("2025-01-13 03:59")?.weekend_surcharge_window);
        assert!(!calendar("2025-01-13 04:00")?.weekend_surcharge_window);

        Ok(())
    }

    #[test]
    fn is_weekend_covers_saturday_and_sunday_only() -> TestResult {
        assert!(calendar("2025-01-11 00:00")?.is_weekend);
        assert!(calendar("2025-01-12 23:59")?.is_weekend);
        assert!(!calendar("2025-01-10 23:59")?.is_weekend);
        assert!(!calendar("2025-01-13 00:00")?.is_weekend);

        Ok(())
    }

    #[test]
    fn monday_discount_runs_until_eleven() -> TestResult {
        assert!(calendar("2025-01-13 00:00")?.monday_morning_discount_window);
        assert!(calendar("2025-01-13 10:59")?.monday_morning_discount_window);
        assert!(!calendar("2025-01-13 11:00")?.monday_morning_discount_window);
        assert!(!calendar("2025-01-14 09:00")?.monday_morning_discount_window);

        Ok(())
    }

    #[test]
    fn surcharge_and_monday_discount_overlap_in_the_small_hours() -> TestResult {
        let small_hours = calendar("2025-01-13 02:00")?;

        assert!(small_hours.weekend_surcharge_window);
        assert!(small_hours.monday_morning_discount_window);

        Ok(())
    }

    #[test]
    fn week_numbers_follow_the_monday_indexed_formula() -> TestResult {
        // 2025 starts on a Wednesday (offset 2).
        assert_eq!(calendar("2025-01-01 12:00")?.week_number, 1);
        assert_eq!(calendar("2025-01-07 12:00")?.week_number, 2);
        assert_eq!(calendar("2025-01-14 12:00")?.week_number, 3);
        assert_eq!(calendar("2025-01-21 12:00")?.week_number, 4);

        // 2024 starts on a Monday: January 1st itself lands in week 0.
        assert_eq!(calendar("2024-01-01 12:00")?.week_number, 0);
        assert_eq!(calendar("2024-01-02 12:00")?.week_number, 1);

        Ok(())
    }

    #[test]
    fn tuesday_discount_requires_an_even_week() -> TestResult {
        assert!(calendar("2025-01-07 12:00")?.tuesday_even_week_discount_window);
        assert!(!calendar("2025-01-14 12:00")?.tuesday_even_week_discount_window);
        assert!(calendar("2025-01-21 12:00")?.tuesday_even_week_discount_window);

        // An even week, but not a Tuesday.
        assert!(!calendar("2025-01-22 12:00")?.tuesday_even_week_discount_window);

        Ok(())
    }

    #[test]
    fn night_delivery_wraps_midnight() -> TestResult {
        assert!(calendar("2025-01-15 23:00")?.night_delivery_window);
        assert!(calendar("2025-01-16 05:59")?.night_delivery_window);
        assert!(!calendar("2025-01-16 06:00")?.night_delivery_window);
        assert!(!calendar("2025-01-15 22:59")?.night_delivery_window);

        Ok(())
    }

    #[test]
    fn friday_meeting_window_is_late_morning_only() -> TestResult {
        assert!(calendar("2025-01-10 11:00")?.friday_midday_meeting_window);
        assert!(calendar("2025-01-10 13:59")?.friday_midday_meeting_window);
        assert!(!calendar("2025-01-10 10:59")?.friday_midday_meeting_window);
        assert!(!calendar("2025-01-10 14:00")?.friday_midday_meeting_window);

        // Same hours on a Thursday.
        assert!(!calendar("2025-01-09 12:00")?.friday_midday_meeting_window);

        Ok(())
    }

    #[test]
    fn winter_dates_match_exactly() -> TestResult {
        assert!(calendar("2024-12-13 09:00")?.is_lucia);
        assert!(calendar("2024-12-24 09:00")?.is_christmas_eve);

        let ordinary = calendar("2024-12-10 09:00")?;
        assert!(!ordinary.is_lucia);
        assert!(!ordinary.is_christmas_eve);

        Ok(())
    }

    #[test]
    fn snapshot_keeps_its_timestamp() -> TestResult {
        let instant = NaiveDateTime::parse_from_str("2025-01-10 15:00", "%Y-%m-%d %H:%M")?;

        assert_eq!(Calendar::at(instant).timestamp(), instant);

        Ok(())
    }
}
