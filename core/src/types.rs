//! Domain types for the subscription tracker.
//!
//! An [`Account`] is a single family-plan purchase (one master expiry, a
//! fixed slot capacity). Each [`Slot`] is a sub-lease inside that account,
//! optionally assigned to a [`Client`] with an independent expiry.
//!
//! Status fields on accounts and slots are derived data: persisted values
//! are advisory only and must be recomputed via
//! [`crate::status::derive_statuses`] before every read.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a master account
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Creates a new random `AccountId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an `AccountId` from a UUID
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a slot within an account
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotId(Uuid);

impl SlotId {
    /// Creates a new random `SlotId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a `SlotId` from a UUID
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }
}

impl Default for SlotId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a client
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientId(Uuid);

impl ClientId {
    /// Creates a new random `ClientId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a `ClientId` from a UUID
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A person leasing one or more slots.
///
/// Identity is immutable; attributes are edited in place by the caller.
/// Nothing prevents one client from occupying several slots across
/// accounts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Unique identifier
    pub id: ClientId,
    /// Display name
    pub name: String,
    /// Optional contact handle (phone / messenger)
    pub phone: Option<String>,
    /// Free-text note
    pub notes: Option<String>,
}

impl Client {
    /// Creates a new client with a fresh id
    #[must_use]
    pub fn new(name: impl Into<String>, phone: Option<String>, notes: Option<String>) -> Self {
        Self {
            id: ClientId::new(),
            name: name.into(),
            phone,
            notes,
        }
    }
}

/// Derived lifecycle status of an occupied slot
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    /// Lease is current, expiry more than the lookahead window away
    Active,
    /// Expiry falls inside the inclusive 3-day lookahead window
    ExpiringSoon,
    /// Expiry date is in the past
    Expired,
    /// No client assigned
    Empty,
}

/// Derived lifecycle status of a master account
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    /// Master expiry more than the lookahead window away
    Active,
    /// Master expiry inside the inclusive 3-day lookahead window
    ExpiringSoon,
    /// Master expiry in the past
    Expired,
}

/// One sub-lease within a master account.
///
/// Invariant: `status == Empty ⇔ client_id == None ⇔ expiry_date == None`.
/// Slots are created and destroyed together with their account; the slot
/// array is never resized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// Unique identifier
    pub id: SlotId,
    /// Occupying client, `None` while the slot is empty
    pub client_id: Option<ClientId>,
    /// Lease expiry, `None` while the slot is empty
    pub expiry_date: Option<NaiveDate>,
    /// Derived status (recomputed on read, advisory when persisted)
    pub status: SlotStatus,
}

impl Slot {
    /// Creates an unassigned slot
    #[must_use]
    pub fn empty() -> Self {
        Self {
            id: SlotId::new(),
            client_id: None,
            expiry_date: None,
            status: SlotStatus::Empty,
        }
    }

    /// Whether a client currently occupies this slot
    #[must_use]
    pub const fn is_occupied(&self) -> bool {
        self.client_id.is_some()
    }
}

/// A master account: one subscription purchase with a single billing
/// expiry and a fixed number of client slots.
///
/// Invariant: `slots.len() == total_slots` at all times.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier
    pub id: AccountId,
    /// Service label (Netflix, Spotify, ...)
    pub service_name: String,
    /// Login identifier, opaque to the core
    pub email: String,
    /// Login credential, opaque to the core
    pub password: Option<String>,
    /// Master billing expiry
    pub expiry_date: NaiveDate,
    /// Fixed slot capacity, set at creation
    pub total_slots: usize,
    /// Exactly `total_slots` slots, in position order
    pub slots: Vec<Slot>,
    /// Free-text note
    pub notes: Option<String>,
    /// Derived status (recomputed on read, advisory when persisted)
    pub status: AccountStatus,
}

impl Account {
    /// Creates a new account with `total_slots` empty slots
    #[must_use]
    pub fn new(
        service_name: impl Into<String>,
        email: impl Into<String>,
        password: Option<String>,
        expiry_date: NaiveDate,
        total_slots: usize,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: AccountId::new(),
            service_name: service_name.into(),
            email: email.into(),
            password,
            expiry_date,
            total_slots,
            slots: (0..total_slots).map(|_| Slot::empty()).collect(),
            notes,
            status: AccountStatus::Active,
        }
    }

    /// Finds a slot by id
    #[must_use]
    pub fn slot(&self, slot_id: &SlotId) -> Option<&Slot> {
        self.slots.iter().find(|s| &s.id == slot_id)
    }

    /// Number of occupied slots
    #[must_use]
    pub fn used_slots(&self) -> usize {
        self.slots.iter().filter(|s| s.is_occupied()).count()
    }
}

/// Credentials for the outbound chat-bot channel.
///
/// Both fields must be non-empty before a delivery is attempted; the core
/// enforces nothing else about them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot credential, opaque
    pub bot_token: String,
    /// Destination chat id, opaque
    pub chat_id: String,
}

impl TelegramConfig {
    /// Whether both credentials are present
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.bot_token.is_empty() && !self.chat_id.is_empty()
    }
}

/// Service catalog entry with a default slot capacity
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDef {
    /// Unique identifier
    pub id: Uuid,
    /// Service label
    pub name: String,
    /// Default slot capacity for new accounts of this service
    pub default_slots: usize,
}

impl ServiceDef {
    /// Creates a catalog entry with a fresh id
    #[must_use]
    pub fn new(name: impl Into<String>, default_slots: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            default_slots,
        }
    }
}

/// Overview counters over the status-derived account list
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Number of master accounts
    pub total_accounts: usize,
    /// Sum of slot capacities
    pub total_slots: usize,
    /// Slots with a client assigned
    pub used_slots: usize,
    /// Distinct clients occupying at least one slot
    pub active_clients: usize,
    /// Slots currently `expiring_soon`
    pub expiring_slots: usize,
    /// Accounts currently `expiring_soon` or `expired`
    pub expiring_masters: usize,
}

/// Partial account descriptor produced by the free-text extractor.
///
/// Untrusted input: a real [`Account`] is constructed only when both
/// `service_name` and `expiry_date` are present; everything else is
/// silently dropped.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedAccount {
    /// Service label, required for acceptance
    #[serde(default)]
    pub service_name: Option<String>,
    /// Login identifier
    #[serde(default)]
    pub email: Option<String>,
    /// Login credential
    #[serde(default)]
    pub password: Option<String>,
    /// Master billing expiry, required for acceptance
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    /// Slot capacity, defaults to 1 when absent
    #[serde(default)]
    pub total_slots: Option<usize>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn account_new_builds_empty_slots() {
        let expiry = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let account = Account::new("Netflix", "owner@mail.com", None, expiry, 5, None);

        assert_eq!(account.slots.len(), 5);
        assert_eq!(account.total_slots, 5);
        assert!(account.slots.iter().all(|s| {
            s.status == SlotStatus::Empty && s.client_id.is_none() && s.expiry_date.is_none()
        }));
        assert_eq!(account.used_slots(), 0);
    }

    #[test]
    fn slot_ids_are_distinct() {
        let expiry = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let account = Account::new("Spotify", "owner@mail.com", None, expiry, 6, None);

        let ids: std::collections::HashSet<_> =
            account.slots.iter().map(|s| s.id.clone()).collect();
        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn telegram_config_requires_both_fields() {
        assert!(!TelegramConfig::default().is_configured());
        assert!(!TelegramConfig {
            bot_token: "token".into(),
            chat_id: String::new(),
        }
        .is_configured());
        assert!(TelegramConfig {
            bot_token: "token".into(),
            chat_id: "42".into(),
        }
        .is_configured());
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&SlotStatus::ExpiringSoon).unwrap();
        assert_eq!(json, "\"expiring_soon\"");
        let json = serde_json::to_string(&AccountStatus::Expired).unwrap();
        assert_eq!(json, "\"expired\"");
    }

    #[test]
    fn extracted_account_accepts_partial_json() {
        let descriptor: ExtractedAccount =
            serde_json::from_str(r#"{"serviceName": "Netflix"}"#).unwrap();
        assert_eq!(descriptor.service_name.as_deref(), Some("Netflix"));
        assert_eq!(descriptor.expiry_date, None);
        assert_eq!(descriptor.total_slots, None);
    }

    #[test]
    fn dates_round_trip_as_iso_calendar_dates() {
        let expiry = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        let account = Account::new("Netflix", "owner@mail.com", None, expiry, 2, None);

        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json["expiry_date"], "2025-12-31");
        assert_eq!(json["slots"][0]["expiry_date"], serde_json::Value::Null);

        let back: Account = serde_json::from_value(json).unwrap();
        assert_eq!(back, account);
    }
}
