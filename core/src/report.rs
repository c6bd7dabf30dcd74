//! Expiry-report aggregation.
//!
//! Scans status-derived records and collects everything inside the expiry
//! window into a ranked item list plus a Markdown summary for the outbound
//! sender. Pure with respect to its inputs and `today`; no network call
//! happens here.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::status::EXPIRY_WINDOW_DAYS;
use crate::types::{Account, Client};

/// Fallback label when a slot's client id no longer resolves
pub const UNKNOWN_CLIENT: &str = "Unknown Client";

/// One item needing attention
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportItem {
    /// A master account expired or expiring inside the window
    Master {
        /// Service label
        service: String,
        /// Login identifier
        login: String,
        /// Master expiry date
        date: NaiveDate,
        /// Already past expiry
        urgent: bool,
    },
    /// An occupied slot expired or expiring inside the window
    Slot {
        /// Client display name, or [`UNKNOWN_CLIENT`]
        client: String,
        /// Service label of the owning account
        service: String,
        /// Slot expiry date
        date: NaiveDate,
        /// Already past expiry
        urgent: bool,
    },
}

impl ReportItem {
    /// Expiry date this item ranks by
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        match self {
            ReportItem::Master { date, .. } | ReportItem::Slot { date, .. } => *date,
        }
    }

    /// Whether the expiry is already past
    #[must_use]
    pub const fn urgent(&self) -> bool {
        match self {
            ReportItem::Master { urgent, .. } | ReportItem::Slot { urgent, .. } => *urgent,
        }
    }
}

/// Aggregated expiry report: ranked items for display plus the formatted
/// message for the outbound sender
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// All items inside the window, ascending by date (stable)
    pub items: Vec<ReportItem>,
    /// Markdown summary; a single healthy sentence when `items` is empty
    pub message: String,
}

impl Report {
    /// Whether nothing needs attention
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.items.is_empty()
    }
}

/// Builds the expiry report over status-derived records.
///
/// Masters are collected first, then slots, each in record order; the
/// combined list is stable-sorted ascending by expiry date so ties keep
/// that insertion order.
#[must_use]
pub fn build_report(today: NaiveDate, accounts: &[Account], clients: &[Client]) -> Report {
    let window_end = today
        .checked_add_days(Days::new(EXPIRY_WINDOW_DAYS))
        .unwrap_or(NaiveDate::MAX);

    let mut items = Vec::new();

    for account in accounts {
        if account.expiry_date <= window_end {
            items.push(ReportItem::Master {
                service: account.service_name.clone(),
                login: account.email.clone(),
                date: account.expiry_date,
                urgent: account.expiry_date < today,
            });
        }
    }

    for account in accounts {
        for slot in &account.slots {
            let (Some(client_id), Some(expiry)) = (&slot.client_id, slot.expiry_date) else {
                continue;
            };
            if expiry > window_end {
                continue;
            }
            let client = clients
                .iter()
                .find(|c| &c.id == client_id)
                .map_or(UNKNOWN_CLIENT, |c| c.name.as_str());
            items.push(ReportItem::Slot {
                client: client.to_string(),
                service: account.service_name.clone(),
                date: expiry,
                urgent: expiry < today,
            });
        }
    }

    items.sort_by_key(ReportItem::date);

    Report {
        message: render_message(&items),
        items,
    }
}

fn render_message(items: &[ReportItem]) -> String {
    if items.is_empty() {
        return "✅ SubManager: Everything is healthy.".to_string();
    }

    let mut msg = String::from("⚠️ *Subscription Alerts*\n\n");

    let masters: Vec<_> = items
        .iter()
        .filter_map(|item| match item {
            ReportItem::Master {
                service,
                login,
                date,
                ..
            } => Some((service, login, date)),
            ReportItem::Slot { .. } => None,
        })
        .collect();
    if !masters.is_empty() {
        msg.push_str("*🔥 CRITICAL: Master Accounts*\n");
        for (service, login, date) in masters {
            msg.push_str(&format!("• {service} ({login}) - {date}\n"));
        }
        msg.push('\n');
    }

    let slots: Vec<_> = items
        .iter()
        .filter_map(|item| match item {
            ReportItem::Slot {
                client,
                service,
                date,
                ..
            } => Some((client, service, date)),
            ReportItem::Master { .. } => None,
        })
        .collect();
    if !slots.is_empty() {
        msg.push_str("*⏳ Client Renewals Needed*\n");
        for (client, service, date) in slots {
            msg.push_str(&format!("• {client} ({service}) - {date}\n"));
        }
    }

    msg
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::status::derive_statuses;
    use crate::types::ClientId;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn occupy(account: &mut Account, idx: usize, client_id: ClientId, expiry: NaiveDate) {
        account.slots[idx].client_id = Some(client_id);
        account.slots[idx].expiry_date = Some(expiry);
    }

    #[test]
    fn healthy_report_when_nothing_qualifies() {
        let today = date(2025, 6, 10);
        let account = Account::new("Netflix", "o@m.com", None, date(2025, 7, 1), 2, None);

        let report = build_report(today, &derive_statuses(today, &[account]), &[]);
        assert!(report.is_healthy());
        assert!(report.items.is_empty());
        assert_eq!(report.message, "✅ SubManager: Everything is healthy.");
    }

    #[test]
    fn expiring_slot_yields_single_item() {
        let today = date(2025, 6, 10);
        let alice = Client::new("Alice", None, None);
        let mut account = Account::new("Netflix", "o@m.com", None, date(2025, 6, 20), 2, None);
        occupy(&mut account, 0, alice.id.clone(), date(2025, 6, 11));

        let derived = derive_statuses(today, &[account]);
        let report = build_report(today, &derived, &[alice]);

        assert_eq!(report.items.len(), 1);
        assert_eq!(
            report.items[0],
            ReportItem::Slot {
                client: "Alice".into(),
                service: "Netflix".into(),
                date: date(2025, 6, 11),
                urgent: false,
            }
        );
        assert!(report.message.contains("*⏳ Client Renewals Needed*"));
        assert!(report.message.contains("• Alice (Netflix) - 2025-06-11"));
        assert!(!report.message.contains("CRITICAL"));
    }

    #[test]
    fn expired_master_is_urgent() {
        let today = date(2025, 6, 10);
        let account = Account::new("Netflix", "o@m.com", None, date(2025, 6, 9), 2, None);

        let report = build_report(today, &derive_statuses(today, &[account]), &[]);
        assert_eq!(report.items.len(), 1);
        assert!(report.items[0].urgent());
        assert!(report.message.contains("*🔥 CRITICAL: Master Accounts*"));
        assert!(report.message.contains("• Netflix (o@m.com) - 2025-06-09"));
    }

    #[test]
    fn master_on_window_boundary_is_included() {
        let today = date(2025, 6, 10);
        let on_boundary = Account::new("Spotify", "s@m.com", None, date(2025, 6, 13), 1, None);
        let past_boundary = Account::new("Disney", "d@m.com", None, date(2025, 6, 14), 1, None);

        let derived = derive_statuses(today, &[on_boundary, past_boundary]);
        let report = build_report(today, &derived, &[]);
        assert_eq!(report.items.len(), 1);
        assert_eq!(report.items[0].date(), date(2025, 6, 13));
    }

    #[test]
    fn expired_slot_is_included_and_urgent() {
        let today = date(2025, 6, 10);
        let bob = Client::new("Bob", None, None);
        let mut account = Account::new("Netflix", "o@m.com", None, date(2025, 7, 1), 2, None);
        occupy(&mut account, 0, bob.id.clone(), date(2025, 6, 8));

        let derived = derive_statuses(today, &[account]);
        let report = build_report(today, &derived, &[bob]);
        assert_eq!(report.items.len(), 1);
        assert!(report.items[0].urgent());
    }

    #[test]
    fn unresolved_client_gets_fallback_label() {
        let today = date(2025, 6, 10);
        let mut account = Account::new("Netflix", "o@m.com", None, date(2025, 7, 1), 1, None);
        occupy(&mut account, 0, ClientId::new(), date(2025, 6, 11));

        let derived = derive_statuses(today, &[account]);
        let report = build_report(today, &derived, &[]);
        assert!(matches!(
            &report.items[0],
            ReportItem::Slot { client, .. } if client == UNKNOWN_CLIENT
        ));
    }

    #[test]
    fn items_sorted_ascending_by_date_with_stable_ties() {
        let today = date(2025, 6, 10);
        let alice = Client::new("Alice", None, None);
        let bob = Client::new("Bob", None, None);

        // Master expiring after the slots, slots out of date order.
        let mut account = Account::new("Netflix", "o@m.com", None, date(2025, 6, 13), 3, None);
        occupy(&mut account, 0, alice.id.clone(), date(2025, 6, 12));
        occupy(&mut account, 1, bob.id.clone(), date(2025, 6, 11));
        // Tie with the master date; master was inserted first.
        let carol = Client::new("Carol", None, None);
        occupy(&mut account, 2, carol.id.clone(), date(2025, 6, 13));

        let derived = derive_statuses(today, &[account]);
        let clients = vec![alice, bob, carol];
        let report = build_report(today, &derived, &clients);

        let dates: Vec<_> = report.items.iter().map(ReportItem::date).collect();
        assert_eq!(
            dates,
            vec![
                date(2025, 6, 11),
                date(2025, 6, 12),
                date(2025, 6, 13),
                date(2025, 6, 13),
            ]
        );
        // Stable: the master item precedes the tied slot item.
        assert!(matches!(report.items[2], ReportItem::Master { .. }));
        assert!(matches!(report.items[3], ReportItem::Slot { .. }));
    }

    #[test]
    fn message_renders_both_sections_in_order() {
        let today = date(2025, 6, 10);
        let alice = Client::new("Alice", None, None);
        let mut account = Account::new("Netflix", "o@m.com", None, date(2025, 6, 9), 2, None);
        occupy(&mut account, 0, alice.id.clone(), date(2025, 6, 11));

        let derived = derive_statuses(today, &[account]);
        let report = build_report(today, &derived, &[alice]);

        let masters_at = report.message.find("CRITICAL").unwrap();
        let slots_at = report.message.find("Renewals Needed").unwrap();
        assert!(masters_at < slots_at);
    }
}
