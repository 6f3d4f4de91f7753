//! RoomManager - room table ownership and persistence
//!
//! This module handles:
//! - Loading rooms, menu and session history from the store
//! - Startup reconciliation of half-finished checkouts
//! - Applying lifecycle transitions to the in-memory room table
//! - Persisting every transition before returning
//! - Checkout (atomic history + room write)
//!
//! # Mutation Flow
//!
//! ```text
//! start_session / pause / add_order / ...
//!     ├─ 1. Read clock
//!     ├─ 2. Look up room (missing → Ok(None))
//!     ├─ 3. Pure transition on a clone (not applicable → Ok(None))
//!     ├─ 4. Swap new value into the room table
//!     ├─ 5. Persist `room:<id>` (failure → logged, Err, memory kept)
//!     └─ 6. Return the new room
//! ```

mod catalog;
mod error;
pub use error::*;

use super::billing::BillingPolicy;
use super::checkout::{self, Tender};
use super::duration::elapsed;
use super::lifecycle::{self, StartSession};
use crate::store::{KvStore, StoreOp, keys, list_records, list_records_strict, put_record};
use crate::utils::Clock;
use parking_lot::RwLock;
use shared::Timestamp;
use shared::models::{
    BillSummary, MenuItem, OrderStatus, PaymentMethod, Room, RoomStatus, SessionRecord,
};
use shared::util::generate_id;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

/// RoomManager for session lifecycle and checkout
///
/// Single writer: every mutation takes the room table write lock for the
/// duration of the transition and its persistence.
pub struct RoomManager {
    store: Arc<dyn KvStore>,
    clock: Arc<dyn Clock>,
    policy: BillingPolicy,
    rooms: RwLock<BTreeMap<String, Room>>,
    menu: RwLock<BTreeMap<String, MenuItem>>,
    history: RwLock<Vec<SessionRecord>>,
}

impl std::fmt::Debug for RoomManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoomManager")
            .field("store", &"<dyn KvStore>")
            .field("policy", &self.policy)
            .field("rooms", &self.rooms.read().len())
            .field("history", &self.history.read().len())
            .finish()
    }
}

impl RoomManager {
    /// Load all state from `store` and reconcile it.
    ///
    /// Unreadable rooms and menu items are skipped; an unreadable history
    /// record fails the load.
    pub fn open(
        store: Arc<dyn KvStore>,
        clock: Arc<dyn Clock>,
        policy: BillingPolicy,
    ) -> ManagerResult<Self> {
        let rooms: Vec<Room> = list_records(store.as_ref(), keys::ROOM_PREFIX)?;
        let menu: Vec<MenuItem> = list_records(store.as_ref(), keys::MENU_PREFIX)?;
        // 历史记录不可读时拒绝启动，否则对账会漏掉已结账的会话
        let history: Vec<SessionRecord> =
            list_records_strict(store.as_ref(), keys::SESSION_HISTORY_PREFIX)?;

        let sealed: HashSet<&str> = history.iter().map(|r| r.id()).collect();
        let mut table = BTreeMap::new();
        for room in rooms {
            let room = match reconcile(&room, &sealed) {
                Some(fixed) => {
                    tracing::warn!(
                        room_id = %room.id,
                        from = %room.status,
                        to = %fixed.status,
                        "Reconciled inconsistent room on startup"
                    );
                    if let Err(e) = put_record(store.as_ref(), &keys::room(&fixed.id), &fixed) {
                        tracing::error!(room_id = %fixed.id, error = %e, "Failed to persist reconciled room");
                    }
                    fixed
                }
                None => room,
            };
            table.insert(room.id.clone(), room);
        }

        tracing::info!(
            rooms = table.len(),
            menu_items = menu.len(),
            history = history.len(),
            "RoomManager loaded"
        );

        Ok(Self {
            store,
            clock,
            policy,
            rooms: RwLock::new(table),
            menu: RwLock::new(menu.into_iter().map(|m| (m.id.clone(), m)).collect()),
            history: RwLock::new(history),
        })
    }

    pub fn policy(&self) -> &BillingPolicy {
        &self.policy
    }

    pub fn store(&self) -> &Arc<dyn KvStore> {
        &self.store
    }

    /// Current instant according to the injected clock
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    // ========== Queries ==========

    /// All rooms, ordered by id
    pub fn rooms(&self) -> Vec<Room> {
        self.rooms.read().values().cloned().collect()
    }

    pub fn room(&self, room_id: &str) -> Option<Room> {
        self.rooms.read().get(room_id).cloned()
    }

    /// Sealed sessions, newest start first
    pub fn history(&self) -> Vec<SessionRecord> {
        let mut records = self.history.read().clone();
        records.sort_by(|a, b| b.session.start_time.cmp(&a.session.start_time));
        records
    }

    /// Live bill of an occupied room at the current instant
    pub fn current_bill(&self, room_id: &str) -> Option<BillSummary> {
        let now = self.clock.now();
        let rooms = self.rooms.read();
        let room = rooms.get(room_id)?;
        let session = room.session.as_ref()?;
        Some(self.policy.compute(session, room, now))
    }

    /// Active (unpaused) milliseconds of an occupied room's session
    pub fn current_duration(&self, room_id: &str) -> Option<u64> {
        let now = self.clock.now();
        let rooms = self.rooms.read();
        let session = rooms.get(room_id)?.session.as_ref()?;
        Some(elapsed(session, now))
    }

    // ========== Lifecycle ==========

    pub fn start_session(
        &self,
        room_id: &str,
        request: StartSession,
    ) -> ManagerResult<Option<Room>> {
        let default_minimum = self.policy.default_minimum_hours;
        self.mutate_room(room_id, "start_session", |room, now| {
            lifecycle::start_session(room, &request, generate_id("SES"), now, default_minimum)
        })
    }

    pub fn pause_session(&self, room_id: &str) -> ManagerResult<Option<Room>> {
        self.mutate_room(room_id, "pause_session", lifecycle::pause)
    }

    pub fn resume_session(&self, room_id: &str) -> ManagerResult<Option<Room>> {
        self.mutate_room(room_id, "resume_session", lifecycle::resume)
    }

    pub fn edit_start_time(
        &self,
        room_id: &str,
        new_start_time: Timestamp,
    ) -> ManagerResult<Option<Room>> {
        self.mutate_room(room_id, "edit_start_time", |room, _| {
            lifecycle::edit_start_time(room, new_start_time)
        })
    }

    pub fn call_staff(&self, room_id: &str) -> ManagerResult<Option<Room>> {
        self.mutate_room(room_id, "call_staff", |room, _| lifecycle::call_staff(room))
    }

    pub fn add_order(
        &self,
        room_id: &str,
        item: &MenuItem,
        quantity: u32,
        special_request: Option<String>,
    ) -> ManagerResult<Option<Room>> {
        self.mutate_room(room_id, "add_order", |room, now| {
            lifecycle::add_order(
                room,
                item,
                quantity,
                special_request,
                generate_id("ORD"),
                now,
            )
        })
    }

    pub fn update_order_quantity(
        &self,
        room_id: &str,
        order_id: &str,
        delta: i32,
    ) -> ManagerResult<Option<Room>> {
        self.mutate_room(room_id, "update_order_quantity", |room, _| {
            lifecycle::update_order_quantity(room, order_id, delta)
        })
    }

    pub fn remove_order(&self, room_id: &str, order_id: &str) -> ManagerResult<Option<Room>> {
        self.mutate_room(room_id, "remove_order", |room, _| {
            lifecycle::remove_order(room, order_id)
        })
    }

    pub fn update_order_note(
        &self,
        room_id: &str,
        order_id: &str,
        text: &str,
    ) -> ManagerResult<Option<Room>> {
        self.mutate_room(room_id, "update_order_note", |room, _| {
            lifecycle::update_order_note(room, order_id, text)
        })
    }

    pub fn update_order_status(
        &self,
        room_id: &str,
        order_id: &str,
        status: OrderStatus,
    ) -> ManagerResult<Option<Room>> {
        self.mutate_room(room_id, "update_order_status", |room, _| {
            lifecycle::update_order_status(room, order_id, status)
        })
    }

    /// Manual status edit; never into or out of `Occupied`
    pub fn update_room_status(
        &self,
        room_id: &str,
        status: RoomStatus,
    ) -> ManagerResult<Option<Room>> {
        self.mutate_room(room_id, "update_room_status", |room, _| {
            lifecycle::set_status(room, status)
        })
    }

    pub fn toggle_room_active(&self, room_id: &str) -> ManagerResult<Option<Room>> {
        self.mutate_room(room_id, "toggle_room_active", |room, _| {
            lifecycle::toggle_active(room)
        })
    }

    // ========== Checkout ==========

    /// Seal the room's session and move the room to cleaning.
    ///
    /// The history record and the cleared room go to the store in one batch;
    /// nothing changes in memory unless that batch succeeds.
    pub fn checkout(
        &self,
        room_id: &str,
        payment_method: PaymentMethod,
        tender: Tender,
    ) -> ManagerResult<Option<SessionRecord>> {
        let now = self.clock.now();
        let mut rooms = self.rooms.write();

        let Some(current) = rooms.get(room_id) else {
            tracing::debug!(room_id = %room_id, "checkout: room not found");
            return Ok(None);
        };
        let Some(settled) = checkout::settle(current, &self.policy, payment_method, tender, now)
        else {
            tracing::debug!(room_id = %room_id, status = %current.status, "checkout: no live session");
            return Ok(None);
        };

        let ops = vec![
            StoreOp::set(keys::session_history(settled.record.id()), &settled.record)?,
            StoreOp::set(keys::room(room_id), &settled.room)?,
        ];
        if let Err(e) = self.store.write_batch(ops) {
            let err = ManagerError::from(e);
            tracing::error!(
                room_id = %room_id,
                session_id = %settled.record.id(),
                error = %err,
                error_code = ?err.code(),
                "Checkout not persisted, session left open"
            );
            return Err(err);
        }

        rooms.insert(room_id.to_string(), settled.room);
        drop(rooms);
        self.history.write().push(settled.record.clone());

        tracing::info!(
            room_id = %room_id,
            session_id = %settled.record.id(),
            total = %settled.bill.total_amount,
            payment_method = ?payment_method,
            "Session checked out"
        );
        Ok(Some(settled.record))
    }

    /// Cash checkout for the exact bill total
    pub fn quick_end(&self, room_id: &str) -> ManagerResult<Option<SessionRecord>> {
        self.checkout(room_id, PaymentMethod::Cash, Tender::Exact)
    }

    // ========== Internal ==========

    /// Apply `transition` to one room and persist the result
    fn mutate_room<F>(&self, room_id: &str, op: &'static str, transition: F) -> ManagerResult<Option<Room>>
    where
        F: FnOnce(&Room, Timestamp) -> Option<Room>,
    {
        let now = self.clock.now();
        let mut rooms = self.rooms.write();

        let Some(current) = rooms.get(room_id) else {
            tracing::debug!(room_id = %room_id, op, "Room not found, ignored");
            return Ok(None);
        };
        let Some(next) = transition(current, now) else {
            tracing::debug!(room_id = %room_id, op, status = %current.status, "Transition not applicable, ignored");
            return Ok(None);
        };

        rooms.insert(room_id.to_string(), next.clone());

        if let Err(e) = put_record(self.store.as_ref(), &keys::room(room_id), &next) {
            let err = ManagerError::from(e);
            tracing::error!(
                room_id = %room_id,
                op,
                error = %err,
                error_code = ?err.code(),
                "Failed to persist room, in-memory state kept"
            );
            return Err(err);
        }

        tracing::debug!(room_id = %room_id, op, status = %next.status, "Room updated");
        Ok(Some(next))
    }
}

/// Repair a room loaded from the store.
///
/// - open session already in history (crash mid-checkout) → cleaning
/// - occupied without a session → cleaning
/// - session on a non-occupied room → occupied
fn reconcile(room: &Room, sealed: &HashSet<&str>) -> Option<Room> {
    let mut fixed = room.clone();
    match &room.session {
        Some(session) if sealed.contains(session.id.as_str()) => {
            fixed.session = None;
            fixed.status = RoomStatus::Cleaning;
        }
        Some(_) if !room.is_occupied() => fixed.status = RoomStatus::Occupied,
        None if room.is_occupied() => fixed.status = RoomStatus::Cleaning,
        _ => return None,
    }
    Some(fixed)
}

#[cfg(test)]
mod tests;
