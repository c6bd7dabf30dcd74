//! Startup hydration of [`AppState`] from the record store.
//!
//! Each partition loads independently; a missing partition becomes its
//! default value, so the first run starts from an empty state without any
//! setup step. Saving happens per mutation inside the reducer, never here.

use submanager_core::environment::{keys, RecordError, RecordStore};
use submanager_core::status::derive_statuses;

use crate::types::AppState;

/// Loads the full application state from `store`.
///
/// Persisted statuses are advisory; they are re-derived against `today`
/// before the state is handed to the runtime.
///
/// # Errors
///
/// Returns a [`RecordError`] when a partition exists but cannot be read
/// or decoded. Corrupt data is surfaced rather than silently replaced.
pub fn load_app_state(
    store: &dyn RecordStore,
    today: chrono::NaiveDate,
) -> Result<AppState, RecordError> {
    let accounts: Vec<submanager_core::types::Account> =
        submanager_store::load_or_default(store, keys::ACCOUNTS)?;
    let clients = submanager_store::load_or_default(store, keys::CLIENTS)?;
    let services = submanager_store::load_or_default(store, keys::SERVICES)?;
    let telegram = submanager_store::load_or_default(store, keys::SETTINGS)?;

    Ok(AppState {
        accounts: derive_statuses(today, &accounts),
        clients,
        services,
        telegram,
        ..AppState::default()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use submanager_core::types::{Account, AccountStatus, TelegramConfig};
    use submanager_store::MemoryStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_store_yields_empty_state() {
        let store = MemoryStore::new();
        let state = load_app_state(&store, date(2025, 6, 10)).unwrap();

        assert!(state.accounts.is_empty());
        assert!(state.clients.is_empty());
        assert!(!state.telegram.is_configured());
    }

    #[test]
    fn persisted_statuses_are_rederived_on_load() {
        let store = MemoryStore::new();
        let mut account = Account::new("Netflix", "o@m.com", None, date(2025, 1, 1), 2, None);
        account.status = AccountStatus::Active; // stale
        store
            .save(keys::ACCOUNTS, &serde_json::to_value(vec![account]).unwrap())
            .unwrap();

        let state = load_app_state(&store, date(2025, 6, 10)).unwrap();
        assert_eq!(state.accounts[0].status, AccountStatus::Expired);
    }

    #[test]
    fn settings_partition_round_trips() {
        let store = MemoryStore::new();
        let config = TelegramConfig {
            bot_token: "t".into(),
            chat_id: "c".into(),
        };
        store
            .save(keys::SETTINGS, &serde_json::to_value(&config).unwrap())
            .unwrap();

        let state = load_app_state(&store, date(2025, 6, 10)).unwrap();
        assert_eq!(state.telegram, config);
    }

    #[test]
    fn corrupt_partition_is_an_error() {
        let store = MemoryStore::new();
        store
            .save(keys::CLIENTS, &serde_json::json!({"not": "a list"}))
            .unwrap();

        assert!(load_app_state(&store, date(2025, 6, 10)).is_err());
    }
}
