use chrono::{DateTime, Utc};

/// Whole days since `modified_at`.
///
/// The elapsed time is truncated to whole hours first and only then divided
/// by 24. Both steps truncate toward zero, so an mtime slightly in the future
/// yields 0 rather than -1.
pub fn age_in_days(now: DateTime<Utc>, modified_at: DateTime<Utc>) -> i64 {
    let hours = (now - modified_at).num_hours();
    hours / 24
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_just_under_two_days_is_one_day() {
        let modified = now() - Duration::hours(47) - Duration::minutes(59);
        assert_eq!(age_in_days(now(), modified), 1);
    }

    #[test]
    fn test_exact_day_boundaries() {
        assert_eq!(age_in_days(now(), now()), 0);
        assert_eq!(age_in_days(now(), now() - Duration::hours(24)), 1);
        assert_eq!(age_in_days(now(), now() - Duration::days(7)), 7);
        assert_eq!(
            age_in_days(now(), now() - Duration::days(7) + Duration::seconds(1)),
            6
        );
    }

    #[test]
    fn test_future_mtime_truncates_toward_zero() {
        assert_eq!(age_in_days(now(), now() + Duration::minutes(30)), 0);
        assert_eq!(age_in_days(now(), now() + Duration::hours(23)), 0);
        assert_eq!(age_in_days(now(), now() + Duration::hours(48)), -2);
    }
}
