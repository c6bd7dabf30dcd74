//! # SubManager Application
//!
//! Wires the pure engines into a single reducer over one [`AppState`]
//! value, with storage, extraction, drafting, summarizing, and delivery
//! injected through [`AppEnvironment`].
//!
//! ```ignore
//! let state = persist::load_app_state(&*records, clock.today())?;
//! let store = Store::new(state, AppReducer::new(), environment);
//! store.send(AppAction::RefreshStatuses).await;
//! ```

pub mod environment;
pub mod persist;
pub mod reducer;
pub mod types;

pub use environment::AppEnvironment;
pub use reducer::AppReducer;
pub use types::{AppAction, AppState};
