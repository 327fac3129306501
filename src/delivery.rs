//! Delivery
//!
//! Delivery-time estimation from the calendar windows. The windows overlap;
//! the first match in a fixed precedence order wins.

use std::fmt;

use crate::calendar::Calendar;

/// Estimated delivery for an order placed at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryEstimate {
    /// Friday midday: couriers wait out the lunch rush, delivery happens at
    /// a fixed hour instead of after a delay.
    FridayMeeting,

    /// Late night or early morning.
    Night,

    /// Saturday or Sunday.
    Weekend,

    /// Any other time.
    Standard,
}

impl DeliveryEstimate {
    /// Pick the estimate for a calendar snapshot. Precedence: Friday
    /// midday, then night, then weekend, then standard.
    pub fn for_calendar(calendar: &Calendar) -> Self {
        if calendar.friday_midday_meeting_window {
            DeliveryEstimate::FridayMeeting
        } else if calendar.night_delivery_window {
            DeliveryEstimate::Night
        } else if calendar.is_weekend {
            DeliveryEstimate::Weekend
        } else {
            DeliveryEstimate::Standard
        }
    }

    /// Delivery delay in minutes, when the estimate is a delay.
    pub fn minutes(&self) -> Option<u32> {
        match self {
            DeliveryEstimate::FridayMeeting => None,
            DeliveryEstimate::Night => Some(45),
            DeliveryEstimate::Weekend => Some(90),
            DeliveryEstimate::Standard => Some(30),
        }
    }

    /// Fixed delivery hour, when the estimate is a scheduled time.
    pub fn scheduled_hour(&self) -> Option<u32> {
        match self {
            DeliveryEstimate::FridayMeeting => Some(15),
            _ => None,
        }
    }
}

impl fmt::Display for DeliveryEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryEstimate::FridayMeeting => f.write_str("deferred until 15:00"),
            DeliveryEstimate::Night => f.write_str("45 minutes"),
            DeliveryEstimate::Weekend => f.write_str("90 minutes"),
            DeliveryEstimate::Standard => f.write_str("30 minutes"),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;
    use testresult::TestResult;

    use super::*;

    fn estimate(s: &str) -> Result<DeliveryEstimate, chrono::ParseError> {
        let timestamp = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")?;

        Ok(DeliveryEstimate::for_calendar(&Calendar::at(timestamp)))
    }

    #[test]
    fn standard_delivery_on_a_plain_weekday() -> TestResult {
        assert_eq!(estimate("2025-01-15 12:00")?, DeliveryEstimate::Standard);
        assert_eq!(DeliveryEstimate::Standard.minutes(), Some(30));

        Ok(())
    }

    #[test]
    fn friday_midday_beats_everything() -> TestResult {
        let friday_noon = estimate("2025-01-10 12:00")?;

        assert_eq!(friday_noon, DeliveryEstimate::FridayMeeting);
        assert_eq!(friday_noon.minutes(), None);
        assert_eq!(friday_noon.scheduled_hour(), Some(15));

        Ok(())
    }

    #[test]
    fn night_beats_weekend() -> TestResult {
        // Saturday 02:00 is both night and weekend.
        assert_eq!(estimate("2025-01-11 02:00")?, DeliveryEstimate::Night);
        assert_eq!(estimate("2025-01-11 12:00")?, DeliveryEstimate::Weekend);

        Ok(())
    }

    #[test]
    fn night_window_wraps_midnight() -> TestResult {
        assert_eq!(estimate("2025-01-15 23:30")?, DeliveryEstimate::Night);
        assert_eq!(estimate("2025-01-16 05:30")?, DeliveryEstimate::Night);
        assert_eq!(estimate("2025-01-16 06:30")?, DeliveryEstimate::Standard);

        Ok(())
    }
}
