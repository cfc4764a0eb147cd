//! Reading the value of an `<input type="datetime-local">`.

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, TimeZone, Utc};

/// Format produced by `<input type="datetime-local">`.
pub const DUE_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Reads `input` as wall-clock time in `tz`.
///
/// A time repeated by a backward clock shift resolves to its earlier
/// instant. A time skipped by a forward shift is read one hour later, which
/// is also what browsers do with such a value.
pub fn parse_due_input<Tz: TimeZone>(input: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(input.trim(), DUE_INPUT_FORMAT).ok()?;
    let local = match tz.from_local_datetime(&naive) {
        LocalResult::Single(time) => time,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => tz
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest()?,
    };
    Some(local.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDate};
    use rstest::rstest;

    /// UTC+0 until 2026-03-29 02:00 local, UTC+1 from then on.
    #[derive(Debug, Clone, Copy)]
    struct SpringForward;

    fn shift() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 29)
            .unwrap()
            .and_hms_opt(2, 0, 0)
            .unwrap()
    }

    fn winter() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn summer() -> FixedOffset {
        FixedOffset::east_opt(3600).unwrap()
    }

    impl TimeZone for SpringForward {
        type Offset = FixedOffset;

        fn from_offset(_offset: &FixedOffset) -> Self {
            SpringForward
        }

        fn offset_from_local_date(&self, _local: &NaiveDate) -> LocalResult<FixedOffset> {
            LocalResult::Single(winter())
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            if *local < shift() {
                LocalResult::Single(winter())
            } else if *local < shift() + Duration::hours(1) {
                LocalResult::None
            } else {
                LocalResult::Single(summer())
            }
        }

        fn offset_from_utc_date(&self, _utc: &NaiveDate) -> FixedOffset {
            winter()
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            if *utc < shift() {
                winter()
            } else {
                summer()
            }
        }
    }

    fn utc(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 29, hour, minute, 0).unwrap()
    }

    #[rstest]
    #[case::before_the_shift("2026-03-29T01:30", utc(1, 30))]
    #[case::inside_the_gap("2026-03-29T02:30", utc(2, 30))]
    #[case::after_the_shift("2026-03-29T04:00", utc(3, 0))]
    #[case::surrounding_whitespace(" 2026-03-29T01:00 ", utc(1, 0))]
    fn reads_wall_clock_time(#[case] input: &str, #[case] expected: DateTime<Utc>) {
        assert_eq!(parse_due_input(input, &SpringForward), Some(expected));
    }

    #[rstest]
    #[case::empty("")]
    #[case::date_only("2026-03-29")]
    #[case::words("next tuesday")]
    fn rejects_other_formats(#[case] input: &str) {
        assert_eq!(parse_due_input(input, &SpringForward), None);
    }

    #[test]
    fn utc_input_is_taken_as_is() {
        assert_eq!(
            parse_due_input("2026-11-01T09:00", &Utc),
            Some(Utc.with_ymd_and_hms(2026, 11, 1, 9, 0, 0).unwrap())
        );
    }
}
