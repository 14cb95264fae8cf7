use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Utc};

const EST_SECS: i32 = -5 * 3600;
const EDT_SECS: i32 = -4 * 3600;

/// UTC offset for America/New_York at the given instant.
///
/// chrono carries no tzdata, so the offset is derived from the post-2007 US
/// rule: daylight time runs from 02:00 EST on the second Sunday of March
/// (07:00 UTC) until 02:00 EDT on the first Sunday of November (06:00 UTC).
pub fn eastern_offset(utc: DateTime<Utc>) -> FixedOffset {
    let secs = if in_dst(utc) { EDT_SECS } else { EST_SECS };
    FixedOffset::east_opt(secs).expect("offset within a day")
}

fn in_dst(utc: DateTime<Utc>) -> bool {
    let year = utc.year();
    let start = transition_instant(year, 3, 2, 7);
    let end = transition_instant(year, 11, 1, 6);
    utc >= start && utc < end
}

/// UTC instant of the DST transition on the nth Sunday of the given month.
fn transition_instant(year: i32, month: u32, nth: u32, utc_hour: u32) -> DateTime<Utc> {
    nth_sunday(year, month, nth)
        .and_hms_opt(utc_hour, 0, 0)
        .expect("valid transition time")
        .and_utc()
}

fn nth_sunday(year: i32, month: u32, nth: u32) -> NaiveDate {
    let first = NaiveDate::from_ymd_opt(year, month, 1).expect("valid first of month");
    let to_sunday = (7 - first.weekday().num_days_from_sunday()) % 7;
    first + Duration::days(i64::from(to_sunday + (nth - 1) * 7))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn nth_sunday_2024() {
        // March 2024: Sundays fall on 3, 10, 17, 24, 31.
        assert_eq!(nth_sunday(2024, 3, 2), NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        // November 2024: first Sunday is the 3rd.
        assert_eq!(nth_sunday(2024, 11, 1), NaiveDate::from_ymd_opt(2024, 11, 3).unwrap());
    }

    #[test]
    fn summer_is_edt() {
        let off = eastern_offset(utc(2024, 7, 15, 12, 0, 0));
        assert_eq!(off.local_minus_utc(), -4 * 3600);
    }

    #[test]
    fn winter_is_est() {
        let off = eastern_offset(utc(2024, 1, 15, 12, 0, 0));
        assert_eq!(off.local_minus_utc(), -5 * 3600);
    }

    #[test]
    fn spring_transition_boundary() {
        // 2024-03-10 07:00 UTC is the switch to EDT.
        let before = eastern_offset(utc(2024, 3, 10, 6, 59, 59));
        let after = eastern_offset(utc(2024, 3, 10, 7, 0, 0));
        assert_eq!(before.local_minus_utc(), -5 * 3600);
        assert_eq!(after.local_minus_utc(), -4 * 3600);
    }

    #[test]
    fn fall_transition_boundary() {
        // 2024-11-03 06:00 UTC is the switch back to EST.
        let before = eastern_offset(utc(2024, 11, 3, 5, 59, 59));
        let after = eastern_offset(utc(2024, 11, 3, 6, 0, 0));
        assert_eq!(before.local_minus_utc(), -4 * 3600);
        assert_eq!(after.local_minus_utc(), -5 * 3600);
    }
}
