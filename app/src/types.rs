//! Application state and actions.
//!
//! The whole record collection lives in one [`AppState`] value that the
//! runtime replaces wholesale on every mutation; readers always observe a
//! consistent snapshot. Derived statuses inside the state are only as
//! fresh as the last [`AppAction::RefreshStatuses`] checkpoint, so read
//! paths dispatch one before consuming them.

use chrono::NaiveDate;
use submanager_core::report::Report;
use submanager_core::types::{
    Account, AccountId, Client, ClientId, ExtractedAccount, ServiceDef, SlotId, TelegramConfig,
};

/// Application state: the authoritative record collection plus the
/// outcomes of the latest collaborator calls.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppState {
    /// All master accounts
    pub accounts: Vec<Account>,
    /// All clients
    pub clients: Vec<Client>,
    /// Known-service catalog; supplies slot-capacity defaults on import
    pub services: Vec<ServiceDef>,
    /// Outbound notification credentials
    pub telegram: TelegramConfig,
    /// Last validation error (if any)
    pub last_error: Option<String>,
    /// Last drafted renewal message
    pub last_draft: Option<String>,
    /// Last business-insight summary
    pub last_insight: Option<String>,
    /// Last built expiry report
    pub last_report: Option<Report>,
    /// Outcome of the last delivery attempt; `None` while in flight
    pub report_delivered: Option<bool>,
}

impl AppState {
    /// Creates an empty state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds an account by id
    #[must_use]
    pub fn account(&self, id: &AccountId) -> Option<&Account> {
        self.accounts.iter().find(|a| &a.id == id)
    }

    /// Finds a client by id
    #[must_use]
    pub fn client(&self, id: &ClientId) -> Option<&Client> {
        self.clients.iter().find(|c| &c.id == id)
    }

    /// Default slot capacity for `service_name` from the catalog, if known
    #[must_use]
    pub fn default_slots_for(&self, service_name: &str) -> Option<usize> {
        self.services
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(service_name))
            .map(|s| s.default_slots)
    }
}

/// Commands and effect-feedback events for the application reducer.
///
/// Commands are validated by the reducer; invalid ones record
/// `last_error` and change nothing else. Slot commands targeting a slot
/// in the wrong state are silent no-ops by design.
#[derive(Clone, Debug)]
pub enum AppAction {
    // ========== Account commands ==========
    /// Create a master account with empty slots
    AddAccount {
        /// Service label, required
        service_name: String,
        /// Login identifier
        email: String,
        /// Login credential
        password: Option<String>,
        /// Master billing expiry
        expiry_date: NaiveDate,
        /// Fixed slot capacity, at least 1
        total_slots: usize,
        /// Free-text note
        notes: Option<String>,
    },
    /// Replace an account wholesale (field edits)
    UpdateAccount(Account),
    /// Remove an account and all its slots
    DeleteAccount(AccountId),

    // ========== Client commands ==========
    /// Create a client
    AddClient {
        /// Display name, required
        name: String,
        /// Contact handle
        phone: Option<String>,
        /// Free-text note
        notes: Option<String>,
    },
    /// Replace a client wholesale
    UpdateClient(Client),
    /// Remove a client; slots keep their dangling reference
    DeleteClient(ClientId),

    // ========== Slot commands ==========
    /// Assign a client to an empty slot, lease starting today
    AssignSlot {
        /// Owning account
        account_id: AccountId,
        /// Target slot
        slot_id: SlotId,
        /// Client to assign
        client_id: ClientId,
    },
    /// Clear an occupied slot
    ReleaseSlot {
        /// Owning account
        account_id: AccountId,
        /// Target slot
        slot_id: SlotId,
    },
    /// Move an occupied slot's expiry date
    SetSlotExpiry {
        /// Owning account
        account_id: AccountId,
        /// Target slot
        slot_id: SlotId,
        /// New expiry
        expiry_date: NaiveDate,
    },
    /// Extend an occupied slot's lease by whole months
    RenewSlot {
        /// Owning account
        account_id: AccountId,
        /// Target slot
        slot_id: SlotId,
        /// Renewal length in calendar months
        months: u32,
    },
    /// Extend the master billing expiry by whole months
    RenewMaster {
        /// Target account
        account_id: AccountId,
        /// Renewal length in calendar months
        months: u32,
    },

    // ========== Read checkpoints and settings ==========
    /// Recompute all derived statuses from expiry dates
    RefreshStatuses,
    /// Store the outbound notification credentials
    SetTelegramConfig(TelegramConfig),

    // ========== Collaborator commands ==========
    /// Run the free-text extractor over pasted text
    ImportAccounts {
        /// Raw text to parse
        text: String,
    },
    /// Draft a renewal reminder for one occupied slot
    DraftRenewalMessage {
        /// Owning account
        account_id: AccountId,
        /// Target slot
        slot_id: SlotId,
    },
    /// Request an advisory business-insight summary
    RequestInsight,
    /// Build the expiry report and attempt one delivery
    SendExpiryReport,

    // ========== Effect feedback events ==========
    /// Extractor finished; descriptors are untrusted
    AccountsExtracted {
        /// Partial descriptors, possibly empty
        descriptors: Vec<ExtractedAccount>,
    },
    /// Drafter finished
    DraftReady {
        /// Drafted message, verbatim
        text: String,
    },
    /// Summarizer finished
    InsightReady {
        /// Advisory summary, verbatim
        text: String,
    },
    /// Sender finished its single attempt
    ReportDelivered {
        /// Whether the message was accepted
        delivered: bool,
    },
}
