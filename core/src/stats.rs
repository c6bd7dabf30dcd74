//! Overview counters for the dashboard.

use std::collections::HashSet;

use crate::types::{Account, AccountStatus, DashboardStats, SlotStatus};

/// Computes the dashboard counters over status-derived accounts.
///
/// Callers must run [`crate::status::derive_statuses`] first; the counters
/// trust the derived `status` fields.
#[must_use]
pub fn dashboard_stats(accounts: &[Account]) -> DashboardStats {
    let active_clients: HashSet<_> = accounts
        .iter()
        .flat_map(|a| a.slots.iter().filter_map(|s| s.client_id.as_ref()))
        .collect();

    DashboardStats {
        total_accounts: accounts.len(),
        total_slots: accounts.iter().map(|a| a.total_slots).sum(),
        used_slots: accounts
            .iter()
            .flat_map(|a| &a.slots)
            .filter(|s| s.status != SlotStatus::Empty)
            .count(),
        active_clients: active_clients.len(),
        expiring_slots: accounts
            .iter()
            .flat_map(|a| &a.slots)
            .filter(|s| s.status == SlotStatus::ExpiringSoon)
            .count(),
        expiring_masters: accounts
            .iter()
            .filter(|a| {
                matches!(
                    a.status,
                    AccountStatus::ExpiringSoon | AccountStatus::Expired
                )
            })
            .count(),
    }
}
