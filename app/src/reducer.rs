//! Reducer logic for the application.
//!
//! All mutations funnel through here: validate the command, apply the
//! pure engine functions to produce new record values, replace them in
//! state, and describe persistence or collaborator calls as effects.
//! Collaborator outcomes come back as feedback events and never fail.

use std::sync::Arc;

use serde::Serialize;
use submanager_core::allocator::{assign_client, release_client, set_slot_expiry};
use submanager_core::environment::{keys, RecordStore};
use submanager_core::reducer::{Effect, Reducer};
use submanager_core::renewal::renew;
use submanager_core::report::build_report;
use submanager_core::status::{account_status, derive_statuses};
use submanager_core::types::{Account, AccountId, Client};
use submanager_core::{smallvec, Effects};

use crate::environment::AppEnvironment;
use crate::types::{AppAction, AppState};

/// Reducer for the application state
#[derive(Clone, Debug)]
pub struct AppReducer;

impl AppReducer {
    /// Creates a new `AppReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Records a validation failure; no other state changes
    fn fail(state: &mut AppState, message: impl Into<String>) -> Effects<AppAction> {
        state.last_error = Some(message.into());
        smallvec![]
    }

    /// Describes a fire-and-forget save of one partition.
    ///
    /// Encoding and storage both happen inside the effect; a failure is
    /// logged and otherwise dropped, since the next mutation saves again.
    fn persist<T>(
        records: &Arc<dyn RecordStore>,
        key: &'static str,
        snapshot: T,
    ) -> Effect<AppAction>
    where
        T: Serialize + Send + 'static,
    {
        let records = Arc::clone(records);
        Effect::future(async move {
            match serde_json::to_value(&snapshot) {
                Ok(value) => {
                    if let Err(e) = records.save(key, &value) {
                        tracing::warn!(key, error = %e, "failed to persist partition");
                    }
                }
                Err(e) => tracing::warn!(key, error = %e, "failed to encode partition"),
            }
            None
        })
    }

    /// Replaces the account produced by `f`, then persists accounts.
    ///
    /// An unknown account id is a silent no-op, mirroring the slot-level
    /// no-op policy.
    fn with_account(
        state: &mut AppState,
        env: &AppEnvironment,
        account_id: &AccountId,
        f: impl FnOnce(&Account) -> Account,
    ) -> Effects<AppAction> {
        let Some(idx) = state.accounts.iter().position(|a| &a.id == account_id) else {
            return smallvec![];
        };
        state.accounts[idx] = f(&state.accounts[idx]);
        state.last_error = None;
        smallvec![Self::persist(
            &env.records,
            keys::ACCOUNTS,
            state.accounts.clone()
        )]
    }
}

impl Default for AppReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for AppReducer {
    type State = AppState;
    type Action = AppAction;
    type Environment = AppEnvironment;

    #[allow(clippy::too_many_lines)]
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Effects<Self::Action> {
        match action {
            // ========== Account commands ==========
            AppAction::AddAccount {
                service_name,
                email,
                password,
                expiry_date,
                total_slots,
                notes,
            } => {
                if service_name.trim().is_empty() {
                    return Self::fail(state, "Service name is required");
                }
                if total_slots == 0 {
                    return Self::fail(state, "An account needs at least one slot");
                }
                let mut account =
                    Account::new(service_name, email, password, expiry_date, total_slots, notes);
                account.status = account_status(env.clock.today(), account.expiry_date);
                state.accounts.push(account);
                state.last_error = None;
                smallvec![Self::persist(
                    &env.records,
                    keys::ACCOUNTS,
                    state.accounts.clone()
                )]
            }

            AppAction::UpdateAccount(account) => {
                if account.slots.len() != account.total_slots {
                    return Self::fail(state, "Slot count does not match account capacity");
                }
                let id = account.id.clone();
                Self::with_account(state, env, &id, move |_| account)
            }

            AppAction::DeleteAccount(account_id) => {
                state.accounts.retain(|a| a.id != account_id);
                state.last_error = None;
                smallvec![Self::persist(
                    &env.records,
                    keys::ACCOUNTS,
                    state.accounts.clone()
                )]
            }

            // ========== Client commands ==========
            AppAction::AddClient { name, phone, notes } => {
                if name.trim().is_empty() {
                    return Self::fail(state, "Client name is required");
                }
                state.clients.push(Client::new(name, phone, notes));
                state.last_error = None;
                smallvec![Self::persist(
                    &env.records,
                    keys::CLIENTS,
                    state.clients.clone()
                )]
            }

            AppAction::UpdateClient(client) => {
                if let Some(existing) = state.clients.iter_mut().find(|c| c.id == client.id) {
                    *existing = client;
                }
                state.last_error = None;
                smallvec![Self::persist(
                    &env.records,
                    keys::CLIENTS,
                    state.clients.clone()
                )]
            }

            AppAction::DeleteClient(client_id) => {
                state.clients.retain(|c| c.id != client_id);
                state.last_error = None;
                smallvec![Self::persist(
                    &env.records,
                    keys::CLIENTS,
                    state.clients.clone()
                )]
            }

            // ========== Slot commands ==========
            AppAction::AssignSlot {
                account_id,
                slot_id,
                client_id,
            } => {
                let today = env.clock.today();
                Self::with_account(state, env, &account_id, |account| {
                    assign_client(account, &slot_id, client_id, today)
                })
            }

            AppAction::ReleaseSlot {
                account_id,
                slot_id,
            } => Self::with_account(state, env, &account_id, |account| {
                release_client(account, &slot_id)
            }),

            AppAction::SetSlotExpiry {
                account_id,
                slot_id,
                expiry_date,
            } => {
                let today = env.clock.today();
                Self::with_account(state, env, &account_id, |account| {
                    set_slot_expiry(account, &slot_id, expiry_date, today)
                })
            }

            AppAction::RenewSlot {
                account_id,
                slot_id,
                months,
            } => {
                let today = env.clock.today();
                Self::with_account(state, env, &account_id, |account| {
                    let Some(slot) = account.slot(&slot_id) else {
                        return account.clone();
                    };
                    let renewed = renew(slot.expiry_date, months, today);
                    set_slot_expiry(account, &slot_id, renewed, today)
                })
            }

            AppAction::RenewMaster { account_id, months } => {
                let today = env.clock.today();
                Self::with_account(state, env, &account_id, |account| {
                    let mut account = account.clone();
                    account.expiry_date = renew(Some(account.expiry_date), months, today);
                    account.status = account_status(today, account.expiry_date);
                    account
                })
            }

            // ========== Read checkpoints and settings ==========
            AppAction::RefreshStatuses => {
                state.accounts = derive_statuses(env.clock.today(), &state.accounts);
                smallvec![]
            }

            AppAction::SetTelegramConfig(config) => {
                state.telegram = config;
                state.last_error = None;
                smallvec![Self::persist(
                    &env.records,
                    keys::SETTINGS,
                    state.telegram.clone()
                )]
            }

            // ========== Collaborator commands ==========
            AppAction::ImportAccounts { text } => {
                let extractor = Arc::clone(&env.extractor);
                let today = env.clock.today();
                smallvec![Effect::future(async move {
                    let descriptors = extractor.extract(text, today).await;
                    Some(AppAction::AccountsExtracted { descriptors })
                })]
            }

            AppAction::DraftRenewalMessage {
                account_id,
                slot_id,
            } => {
                let Some(account) = state.account(&account_id) else {
                    return Self::fail(state, "Account not found");
                };
                let Some(slot) = account.slot(&slot_id) else {
                    return Self::fail(state, "Slot not found");
                };
                let (Some(client_id), Some(expiry)) = (&slot.client_id, slot.expiry_date) else {
                    return Self::fail(state, "Slot has no client to message");
                };
                let Some(client) = state.client(client_id) else {
                    return Self::fail(state, "Client no longer exists");
                };

                let drafter = Arc::clone(&env.drafter);
                let client = client.clone();
                let service_name = account.service_name.clone();
                state.last_draft = None;
                state.last_error = None;
                smallvec![Effect::future(async move {
                    let text = drafter.draft(client, service_name, expiry).await;
                    Some(AppAction::DraftReady { text })
                })]
            }

            AppAction::RequestInsight => {
                let summarizer = Arc::clone(&env.summarizer);
                let accounts = state.accounts.clone();
                let clients = state.clients.clone();
                smallvec![Effect::future(async move {
                    let text = summarizer.summarize(accounts, clients).await;
                    Some(AppAction::InsightReady { text })
                })]
            }

            AppAction::SendExpiryReport => {
                if !state.telegram.is_configured() {
                    return Self::fail(state, "Telegram is not configured");
                }
                let today = env.clock.today();
                state.accounts = derive_statuses(today, &state.accounts);
                let report = build_report(today, &state.accounts, &state.clients);
                let message = report.message.clone();
                state.last_report = Some(report);
                state.report_delivered = None;
                state.last_error = None;

                let sender = Arc::clone(&env.sender);
                let config = state.telegram.clone();
                smallvec![Effect::future(async move {
                    let delivered = sender.send(config, message).await;
                    Some(AppAction::ReportDelivered { delivered })
                })]
            }

            // ========== Effect feedback events ==========
            AppAction::AccountsExtracted { descriptors } => {
                let today = env.clock.today();
                let mut accepted = 0usize;
                for descriptor in descriptors {
                    // Untrusted input: require the two load-bearing fields,
                    // silently drop everything else.
                    let (Some(service_name), Some(expiry_date)) =
                        (descriptor.service_name, descriptor.expiry_date)
                    else {
                        continue;
                    };
                    let total_slots = descriptor
                        .total_slots
                        .or_else(|| state.default_slots_for(&service_name))
                        .unwrap_or(1)
                        .max(1);
                    let mut account = Account::new(
                        service_name,
                        descriptor.email.unwrap_or_default(),
                        descriptor.password,
                        expiry_date,
                        total_slots,
                        None,
                    );
                    account.status = account_status(today, account.expiry_date);
                    state.accounts.push(account);
                    accepted += 1;
                }
                if accepted == 0 {
                    return smallvec![];
                }
                state.last_error = None;
                smallvec![Self::persist(
                    &env.records,
                    keys::ACCOUNTS,
                    state.accounts.clone()
                )]
            }

            AppAction::DraftReady { text } => {
                state.last_draft = Some(text);
                smallvec![]
            }

            AppAction::InsightReady { text } => {
                state.last_insight = Some(text);
                smallvec![]
            }

            AppAction::ReportDelivered { delivered } => {
                state.report_delivered = Some(delivered);
                smallvec![]
            }
        }
    }
}
