use super::*;

#[test]
fn test_persist_failure_keeps_memory_and_errors() {
    let (manager, store, _clock) = create_flaky_manager();
    store.set_failing(true);

    let err = manager.start_session("R01", StartSession::new(2)).unwrap_err();
    assert_eq!(err.code(), ErrorCode::StorageUnavailable);

    // availability over durability
    let room = manager.room("R01").unwrap();
    assert_eq!(room.status, RoomStatus::Occupied);

    // store still has the old value
    let stored: Room = crate::store::get_record(store.as_ref(), &keys::room("R01"))
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, RoomStatus::Available);

    // next successful write catches up
    store.set_failing(false);
    manager.call_staff("R01").unwrap().unwrap();
    let stored: Room = crate::store::get_record(store.as_ref(), &keys::room("R01"))
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, RoomStatus::Occupied);
}

#[test]
fn test_failed_checkout_leaves_session_open() {
    let (manager, store, clock) = create_flaky_manager();
    start(&manager, "R01");
    clock.advance(HOUR);

    store.set_failing(true);
    assert!(manager.quick_end("R01").is_err());

    let room = manager.room("R01").unwrap();
    assert_eq!(room.status, RoomStatus::Occupied);
    assert!(room.session.is_some());
    assert!(manager.history().is_empty());

    store.set_failing(false);
    assert!(manager.quick_end("R01").unwrap().is_some());
    assert_eq!(manager.history().len(), 1);
}

#[test]
fn test_precondition_noop_does_not_touch_store() {
    let (manager, store, _clock) = create_flaky_manager();
    store.set_failing(true);

    // nothing to write, so no error
    assert!(manager.pause_session("R01").unwrap().is_none());
    assert!(manager.quick_end("R01").unwrap().is_none());
}

#[test]
fn test_reconcile_half_finished_checkout() {
    let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::new(T0));
    {
        let manager = open_manager(store.clone(), clock.clone());
        manager.save_room(standard_room("R01")).unwrap();
        start(&manager, "R01");
    }

    // history written but room left occupied, as after a crash between two
    // separate writes
    let room: Room = crate::store::get_record(store.as_ref(), &keys::room("R01"))
        .unwrap()
        .unwrap();
    let settled = crate::sessions::checkout::settle(
        &room,
        &BillingPolicy::default(),
        PaymentMethod::Cash,
        Tender::Exact,
        T0 + HOUR,
    )
    .unwrap();
    put_record(store.as_ref(), &keys::session_history(settled.record.id()), &settled.record)
        .unwrap();

    let manager = open_manager(store.clone(), clock);
    let room = manager.room("R01").unwrap();
    assert_eq!(room.status, RoomStatus::Cleaning);
    assert!(room.session.is_none());
    assert_eq!(manager.history().len(), 1);

    // repair persisted
    let stored: Room = crate::store::get_record(store.as_ref(), &keys::room("R01"))
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, RoomStatus::Cleaning);
}

#[test]
fn test_reconcile_status_session_mismatch() {
    let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());

    let mut orphan_status = standard_room("R01");
    orphan_status.status = RoomStatus::Occupied;
    put_record(store.as_ref(), &keys::room("R01"), &orphan_status).unwrap();

    let template = lifecycle::start_session(
        &standard_room("R02"),
        &StartSession::new(3),
        "SES-live".to_string(),
        T0,
        Decimal::TWO,
    )
    .unwrap();
    let mut orphan_session = template.clone();
    orphan_session.status = RoomStatus::Available;
    put_record(store.as_ref(), &keys::room("R02"), &orphan_session).unwrap();

    let manager = open_manager(store, Arc::new(ManualClock::new(T0)));
    assert_eq!(manager.room("R01").unwrap().status, RoomStatus::Cleaning);
    assert_eq!(manager.room("R02").unwrap(), template);
    assert!(manager.rooms().iter().all(Room::is_consistent));
}

#[test]
fn test_unreadable_room_record_is_skipped() {
    let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
    store
        .set(&keys::room("R77"), &serde_json::json!({ "id": "R77" }))
        .unwrap();
    put_record(store.as_ref(), &keys::room("R01"), &standard_room("R01")).unwrap();

    let manager = open_manager(store, Arc::new(ManualClock::new(T0)));
    assert_eq!(manager.rooms().len(), 1);
}

#[test]
fn test_custom_policy_flows_into_checkout() {
    let policy = BillingPolicy {
        tax_rate: Decimal::ZERO,
        service_charge_rate: Decimal::ZERO,
        ..BillingPolicy::default()
    };
    let clock = Arc::new(ManualClock::new(T0));
    let manager = RoomManager::open(Arc::new(MemoryStore::new()), clock, policy).unwrap();
    manager.save_room(standard_room("R01")).unwrap();
    start(&manager, "R01");

    let record = manager.quick_end("R01").unwrap().unwrap();
    assert_eq!(record.settlement.total_bill, Decimal::from(16000));
}

#[test]
fn test_failed_checkout_reports_error_code() {
    let (manager, store, _clock) = create_flaky_manager();
    start(&manager, "R01");

    store.set_failing(true);
    let err = manager.quick_end("R01").unwrap_err();
    assert_eq!(err.code(), ErrorCode::StorageUnavailable);
}

#[test]
fn test_unreadable_history_record_fails_open() {
    let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::new(T0));
    {
        let manager = open_manager(store.clone(), clock.clone());
        manager.save_room(standard_room("R01")).unwrap();
        start(&manager, "R01");
    }
    store
        .set(
            &keys::session_history("SES-broken"),
            &serde_json::json!({ "id": "SES-broken" }),
        )
        .unwrap();

    // a skipped record could hide a session that was already billed
    let err = RoomManager::open(store, clock, BillingPolicy::default()).unwrap_err();
    assert_eq!(err.code(), ErrorCode::InternalError);
}
