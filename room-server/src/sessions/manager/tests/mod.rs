use super::*;
use crate::store::{MemoryStore, StoreError, StoreEntry, StoreResult};
use crate::utils::ManualClock;
use rust_decimal::Decimal;
use serde_json::Value;
use shared::LocalizedText;
use shared::models::RoomType;
use std::sync::atomic::{AtomicBool, Ordering};

const MINUTE: i64 = 60_000;
const HOUR: i64 = 60 * MINUTE;
/// 2024-03-01T12:00:00Z
const T0: i64 = 1_709_294_400_000;

// ========================================================================
// Store double: MemoryStore whose writes can be switched off
// ========================================================================

#[derive(Default)]
struct FlakyStore {
    inner: MemoryStore,
    failing: AtomicBool,
}

impl FlakyStore {
    fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> StoreResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("disk unplugged".to_string()));
        }
        Ok(())
    }
}

impl KvStore for FlakyStore {
    fn set(&self, key: &str, value: &Value) -> StoreResult<()> {
        self.check()?;
        self.inner.set(key, value)
    }

    fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        self.inner.get(key)
    }

    fn list(&self, prefix: &str) -> StoreResult<Vec<StoreEntry>> {
        self.inner.list(prefix)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.check()?;
        self.inner.remove(key)
    }

    fn write_batch(&self, ops: Vec<StoreOp>) -> StoreResult<()> {
        self.check()?;
        self.inner.write_batch(ops)
    }
}

// ========================================================================
// Fixtures
// ========================================================================

fn standard_room(id: &str) -> Room {
    Room::new(
        id,
        LocalizedText::new(format!("Room {id}"), ""),
        RoomType::Standard,
        6,
        Decimal::from(8000),
        Decimal::TWO,
    )
}

fn vip_room(id: &str) -> Room {
    Room::new(
        id,
        LocalizedText::new(format!("VIP {id}"), ""),
        RoomType::Vip,
        10,
        Decimal::from(15000),
        Decimal::from(3),
    )
}

fn fries() -> MenuItem {
    MenuItem::new(
        "MENU-fries",
        LocalizedText::new("French Fries", ""),
        "Food",
        Decimal::from(3000),
    )
}

fn beer() -> MenuItem {
    MenuItem::new(
        "MENU-beer",
        LocalizedText::new("Beer", ""),
        "Drinks",
        Decimal::from(2500),
    )
}

fn open_manager(store: Arc<dyn KvStore>, clock: Arc<ManualClock>) -> RoomManager {
    RoomManager::open(store, clock, BillingPolicy::default()).unwrap()
}

/// Manager over a MemoryStore with R01 (standard), R02 (VIP) and two menu
/// items, clock at `T0`
fn create_test_manager() -> (RoomManager, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(T0));
    let manager = open_manager(Arc::new(MemoryStore::new()), clock.clone());
    manager
        .seed_if_empty(
            vec![standard_room("R01"), vip_room("R02")],
            vec![fries(), beer()],
        )
        .unwrap();
    (manager, clock)
}

fn create_flaky_manager() -> (RoomManager, Arc<FlakyStore>, Arc<ManualClock>) {
    let store = Arc::new(FlakyStore::default());
    let clock = Arc::new(ManualClock::new(T0));
    let manager = open_manager(store.clone(), clock.clone());
    manager
        .seed_if_empty(vec![standard_room("R01")], vec![fries()])
        .unwrap();
    (manager, store, clock)
}

/// Start a four-guest session in `room_id`
fn start(manager: &RoomManager, room_id: &str) -> Room {
    manager
        .start_session(room_id, StartSession::new(4))
        .unwrap()
        .expect("room should be available")
}

fn only_order_id(room: &Room) -> String {
    let session = room.session.as_ref().unwrap();
    assert_eq!(session.orders.len(), 1);
    session.orders[0].id.clone()
}

mod test_boundary;
