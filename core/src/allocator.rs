//! Slot assignment, release, and expiry updates.
//!
//! All operations are pure transformations returning a new [`Account`].
//! Operating on a missing slot or a slot in the wrong state is a silent
//! no-op, not an error: the UI only ever offers an operation on slots in
//! the right state, so a mismatch means a stale view, and ignoring it is
//! safe.

use chrono::NaiveDate;

use crate::status::slot_status;
use crate::types::{Account, ClientId, SlotId, SlotStatus};

fn map_slot(
    account: &Account,
    slot_id: &SlotId,
    f: impl FnOnce(&mut crate::types::Slot),
) -> Account {
    let mut account = account.clone();
    if let Some(slot) = account.slots.iter_mut().find(|s| &s.id == slot_id) {
        f(slot);
    }
    account
}

/// Assigns `client_id` to an empty slot, starting the lease today.
///
/// No-op unless the target slot exists and is currently empty. Emptiness
/// is judged by occupancy, not the advisory status field, so a stale
/// persisted status cannot clobber an existing lease. The new lease
/// expires today until the caller sets a real expiry or renews.
#[must_use]
pub fn assign_client(
    account: &Account,
    slot_id: &SlotId,
    client_id: ClientId,
    today: NaiveDate,
) -> Account {
    map_slot(account, slot_id, |slot| {
        if !slot.is_occupied() {
            slot.client_id = Some(client_id);
            slot.expiry_date = Some(today);
            slot.status = SlotStatus::Active;
        }
    })
}

/// Clears an occupied slot back to empty.
///
/// No-op unless the target slot exists and has a client. Restores the
/// empty-slot invariant: no client, no expiry, status `empty`.
#[must_use]
pub fn release_client(account: &Account, slot_id: &SlotId) -> Account {
    map_slot(account, slot_id, |slot| {
        if slot.is_occupied() {
            slot.client_id = None;
            slot.expiry_date = None;
            slot.status = SlotStatus::Empty;
        }
    })
}

/// Moves an occupied slot's expiry and recomputes its derived status.
///
/// No-op unless the target slot exists and has a client.
#[must_use]
pub fn set_slot_expiry(
    account: &Account,
    slot_id: &SlotId,
    new_date: NaiveDate,
    today: NaiveDate,
) -> Account {
    map_slot(account, slot_id, |slot| {
        if slot.is_occupied() {
            slot.expiry_date = Some(new_date);
            slot.status = slot_status(today, new_date);
        }
    })
}
