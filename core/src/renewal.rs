//! Renewal date arithmetic.
//!
//! A renewal extends the existing expiry when the lease is still current,
//! and restarts from today when it has already lapsed: a renewal bought
//! after expiry is never backdated onto the lapsed period.

use chrono::{Months, NaiveDate};

/// Computes the expiry after renewing for `months` calendar months.
///
/// `base` is the current expiry when it is today or later, otherwise
/// today. Month addition clamps to the last valid day of the target month
/// (31 Jan + 1 month = 28/29 Feb); the clamp is a deliberate policy choice
/// rather than inherited date-library rollover.
#[must_use]
pub fn renew(current_expiry: Option<NaiveDate>, months: u32, today: NaiveDate) -> NaiveDate {
    let base = match current_expiry {
        Some(expiry) if expiry >= today => expiry,
        _ => today,
    };
    base.checked_add_months(Months::new(months)).unwrap_or(base)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn lapsed_lease_renews_from_today() {
        let today = date(2025, 6, 10);
        let lapsed = date(2025, 6, 5);
        assert_eq!(renew(Some(lapsed), 1, today), date(2025, 7, 10));
    }

    #[test]
    fn current_lease_renews_from_expiry() {
        let today = date(2025, 6, 10);
        let expiry = date(2025, 6, 20);
        assert_eq!(renew(Some(expiry), 1, today), date(2025, 7, 20));
    }

    #[test]
    fn expiry_today_anchors_to_expiry() {
        let today = date(2025, 6, 10);
        assert_eq!(renew(Some(today), 2, today), date(2025, 8, 10));
    }

    #[test]
    fn missing_expiry_renews_from_today() {
        let today = date(2025, 6, 10);
        assert_eq!(renew(None, 3, today), date(2025, 9, 10));
    }

    #[test]
    fn month_end_clamps_to_target_month() {
        let today = date(2025, 1, 15);
        assert_eq!(renew(Some(date(2025, 1, 31)), 1, today), date(2025, 2, 28));
        // Leap year
        assert_eq!(
            renew(Some(date(2024, 1, 31)), 1, date(2024, 1, 15)),
            date(2024, 2, 29)
        );
        // Crossing a year boundary
        assert_eq!(
            renew(Some(date(2025, 12, 31)), 2, today),
            date(2026, 2, 28)
        );
    }

    proptest! {
        #[test]
        fn result_is_never_before_anchor(
            today_offset in 0i64..20_000,
            expiry_offset in -400i64..400,
            months in 0u32..36,
        ) {
            let today = date(2000, 1, 1) + chrono::Duration::days(today_offset);
            let expiry = today + chrono::Duration::days(expiry_offset);
            let renewed = renew(Some(expiry), months, today);
            let anchor = if expiry >= today { expiry } else { today };

            prop_assert!(renewed >= anchor);
            if months > 0 {
                prop_assert!(renewed > anchor);
            }
        }

        #[test]
        fn anchoring_policy(
            today_offset in 0i64..20_000,
            expiry_offset in -400i64..400,
        ) {
            let today = date(2000, 1, 1) + chrono::Duration::days(today_offset);
            let expiry = today + chrono::Duration::days(expiry_offset);
            let renewed = renew(Some(expiry), 1, today);
            let anchor = if expiry >= today { expiry } else { today };

            prop_assert_eq!(renewed, anchor.checked_add_months(Months::new(1)).unwrap());
        }
    }
}
