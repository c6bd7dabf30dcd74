//! # SubManager Core
//!
//! Domain model and pure derived-state engine for tracking shared
//! family-plan subscriptions: master accounts subdivided into a fixed
//! number of client slots, each with its own expiry date.
//!
//! ## Architecture
//!
//! Functional core, imperative shell:
//!
//! - **State**: owned domain data (accounts, clients), replaced
//!   copy-on-write on every mutation
//! - **Action**: commands and effect-feedback events processed by a reducer
//! - **Reducer**: pure function `(State, Action, Environment) → Effects`
//! - **Effect**: side effect descriptions (not execution)
//! - **Environment**: injected dependencies via traits
//!
//! Statuses on accounts and slots are *derived* data: they are recomputed
//! from expiry dates by [`status::derive_statuses`] at every read
//! checkpoint, never trusted from persistence.
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use submanager_core::status::derive_statuses;
//! use submanager_core::types::{Account, AccountStatus};
//!
//! let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
//! let expiry = NaiveDate::from_ymd_opt(2025, 6, 3).unwrap();
//! let account = Account::new("Netflix", "owner@mail.com", None, expiry, 5, None);
//!
//! let derived = derive_statuses(today, &[account]);
//! assert_eq!(derived[0].status, AccountStatus::ExpiringSoon);
//! ```

pub mod allocator;
pub mod environment;
pub mod reducer;
pub mod renewal;
pub mod report;
pub mod stats;
pub mod status;
pub mod types;

// Re-export commonly used types
pub use chrono::NaiveDate;
pub use smallvec::{smallvec, SmallVec};

/// Effect list returned by reducers.
///
/// Most actions produce at most a persistence effect plus one collaborator
/// call, so effects are kept inline.
pub type Effects<A> = SmallVec<[reducer::Effect<A>; 4]>;
