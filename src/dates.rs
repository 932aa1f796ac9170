//! Day-count arithmetic shared by the scheduler and the aggregator.
//!
//! Both engines must agree on what "a day has passed" means, so the rounding
//! rule lives here and nowhere else.

use chrono::{DateTime, NaiveDate, Utc};

pub const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Whole days elapsed from `from` to `to`, rounding any partial day up.
///
/// Ceiling division of the millisecond delta: a checkpoint reviewed at any
/// instant yesterday counts one elapsed day for the whole of today, so a due
/// item stays due until the day ends. Negative deltas truncate toward zero.
pub fn whole_days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    let delta_ms = to.timestamp_millis() - from.timestamp_millis();
    if delta_ms >= 0 {
        (delta_ms + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
    } else {
        // Integer division already truncates toward zero here.
        delta_ms / MILLIS_PER_DAY
    }
}

/// Calendar date of a timestamp, used for distinct review-day counting.
pub fn calendar_date(ts: DateTime<Utc>) -> NaiveDate {
    ts.date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at_millis(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    #[test]
    fn same_instant_is_zero_days() {
        assert_eq!(whole_days_between(at_millis(0), at_millis(0)), 0);
    }

    #[test]
    fn partial_days_round_up() {
        assert_eq!(whole_days_between(at_millis(0), at_millis(1)), 1);
        assert_eq!(whole_days_between(at_millis(0), at_millis(MILLIS_PER_DAY - 1)), 1);
        assert_eq!(whole_days_between(at_millis(0), at_millis(MILLIS_PER_DAY)), 1);
        assert_eq!(whole_days_between(at_millis(0), at_millis(MILLIS_PER_DAY + 1)), 2);
    }

    #[test]
    fn negative_deltas_truncate_toward_zero() {
        assert_eq!(whole_days_between(at_millis(1), at_millis(0)), 0);
        assert_eq!(
            whole_days_between(at_millis(MILLIS_PER_DAY + MILLIS_PER_DAY / 2), at_millis(0)),
            -1
        );
    }

    #[test]
    fn calendar_date_ignores_time_of_day() {
        let morning = at_millis(MILLIS_PER_DAY + 1000);
        let evening = at_millis(2 * MILLIS_PER_DAY - 1000);
        assert_eq!(calendar_date(morning), calendar_date(evening));
        assert_ne!(calendar_date(morning), calendar_date(at_millis(0)));
    }
}
