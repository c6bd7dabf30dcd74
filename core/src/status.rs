//! Derived-status computation for accounts and slots.
//!
//! Statuses are a pure function of expiry dates and "today". Callers
//! recompute them at every read checkpoint instead of trusting persisted
//! values. The cost is an O(accounts × slots) scan per read, fine at the
//! target scale of tens of accounts.

use chrono::{Days, NaiveDate};

use crate::types::{Account, AccountStatus, SlotStatus};

/// Inclusive lookahead window, in calendar days, for flagging imminent
/// expiry
pub const EXPIRY_WINDOW_DAYS: u64 = 3;

fn window_end(today: NaiveDate) -> NaiveDate {
    today
        .checked_add_days(Days::new(EXPIRY_WINDOW_DAYS))
        .unwrap_or(NaiveDate::MAX)
}

/// Status of a master account given its expiry date.
///
/// `expired` strictly before today; `expiring_soon` from today through the
/// inclusive 3-day mark; `active` beyond it. Day granularity.
#[must_use]
pub fn account_status(today: NaiveDate, expiry_date: NaiveDate) -> AccountStatus {
    if expiry_date < today {
        AccountStatus::Expired
    } else if expiry_date <= window_end(today) {
        AccountStatus::ExpiringSoon
    } else {
        AccountStatus::Active
    }
}

/// Status of an occupied slot given its expiry date.
///
/// Same three-way rule as [`account_status`]; callers must not invoke this
/// for empty slots.
#[must_use]
pub fn slot_status(today: NaiveDate, expiry_date: NaiveDate) -> SlotStatus {
    if expiry_date < today {
        SlotStatus::Expired
    } else if expiry_date <= window_end(today) {
        SlotStatus::ExpiringSoon
    } else {
        SlotStatus::Active
    }
}

/// Recomputes every derived status from expiry dates.
///
/// Pure: returns new records, never mutates the input. Unoccupied slots
/// (no client or no expiry) pass through unchanged. A slot's status is
/// independent of its master's; one can be `expiring_soon` while the
/// other is `active`, and nothing propagates across.
#[must_use]
pub fn derive_statuses(today: NaiveDate, accounts: &[Account]) -> Vec<Account> {
    accounts
        .iter()
        .map(|account| {
            let slots = account
                .slots
                .iter()
                .map(|slot| {
                    let (Some(_), Some(expiry)) = (&slot.client_id, slot.expiry_date) else {
                        return slot.clone();
                    };
                    let mut slot = slot.clone();
                    slot.status = slot_status(today, expiry);
                    slot
                })
                .collect();

            let mut account = account.clone();
            account.status = account_status(today, account.expiry_date);
            account.slots = slots;
            account
        })
        .collect()
}
