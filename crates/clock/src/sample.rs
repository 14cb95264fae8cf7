use crate::eastern::eastern_offset;
use chrono::{DateTime, Utc};

/// One formatted reading of the wall clock.
///
/// Derived, never stored beyond the current tick. Both strings are evaluated
/// against America/New_York regardless of the host timezone: time as
/// zero-padded 24-hour `HH:MM:SS`, date as zero-padded `MM/DD/YYYY`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockSample {
    pub time_text: String,
    pub date_text: String,
}

impl ClockSample {
    /// Sample the current instant.
    pub fn now() -> Self {
        Self::at(Utc::now())
    }

    /// Format a specific instant. Deterministic and host-timezone independent.
    pub fn at(utc: DateTime<Utc>) -> Self {
        let local = utc.with_timezone(&eastern_offset(utc));
        Self {
            time_text: local.format("%H:%M:%S").to_string(),
            date_text: local.format("%m/%d/%Y").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn edt_afternoon() {
        let utc = Utc.with_ymd_and_hms(2024, 7, 15, 13, 53, 56).unwrap();
        let sample = ClockSample::at(utc);
        assert_eq!(sample.time_text, "09:53:56");
        assert_eq!(sample.date_text, "07/15/2024");
    }

    #[test]
    fn est_afternoon() {
        let utc = Utc.with_ymd_and_hms(2024, 1, 15, 13, 53, 56).unwrap();
        let sample = ClockSample::at(utc);
        assert_eq!(sample.time_text, "08:53:56");
        assert_eq!(sample.date_text, "01/15/2024");
    }

    #[test]
    fn date_rolls_over_at_eastern_midnight() {
        // 04:30 UTC in summer is still 00:30 the same day in New York;
        // 03:30 UTC is 23:30 the previous day.
        let late = Utc.with_ymd_and_hms(2024, 7, 16, 3, 30, 0).unwrap();
        let early = Utc.with_ymd_and_hms(2024, 7, 16, 4, 30, 0).unwrap();
        assert_eq!(ClockSample::at(late).date_text, "07/15/2024");
        assert_eq!(ClockSample::at(early).date_text, "07/16/2024");
    }

    #[test]
    fn zero_padding() {
        let utc = Utc.with_ymd_and_hms(2024, 3, 5, 12, 4, 7).unwrap();
        let sample = ClockSample::at(utc);
        assert_eq!(sample.time_text, "07:04:07");
        assert_eq!(sample.date_text, "03/05/2024");
    }

    #[test]
    fn deterministic_for_fixed_instant() {
        let utc = Utc.with_ymd_and_hms(2024, 7, 15, 13, 53, 56).unwrap();
        assert_eq!(ClockSample::at(utc), ClockSample::at(utc));
    }
}
