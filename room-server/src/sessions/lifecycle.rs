//! Room/session transitions
//!
//! Every function takes the current room by reference and returns the next
//! room value, or `None` when the transition does not apply (wrong status,
//! no session, unknown order line, nothing would change). The input is never
//! modified; the manager swaps the returned value into its room table.

use rust_decimal::Decimal;
use shared::Timestamp;
use shared::models::{MenuItem, OrderItem, OrderStatus, Room, RoomStatus, Session};

/// Parameters for opening a room
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StartSession {
    pub guest_count: u32,
    pub guest_name: Option<String>,
    pub notes: Option<String>,
    pub waiter: Option<String>,
    pub member_card: Option<String>,
}

impl StartSession {
    pub fn new(guest_count: u32) -> Self {
        Self {
            guest_count,
            ..Default::default()
        }
    }

    pub fn with_member_card(mut self, card: impl Into<String>) -> Self {
        self.member_card = Some(card.into());
        self
    }

    pub fn with_waiter(mut self, waiter: impl Into<String>) -> Self {
        self.waiter = Some(waiter.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_guest_name(mut self, name: impl Into<String>) -> Self {
        self.guest_name = Some(name.into());
        self
    }
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Apply `f` to a copy of the room's live session.
///
/// `f` returns `false` when it changed nothing.
fn update_session(room: &Room, f: impl FnOnce(&mut Session) -> bool) -> Option<Room> {
    if !room.is_occupied() {
        return None;
    }
    let mut next = room.clone();
    let session = next.session.as_mut()?;
    f(session).then_some(next)
}

fn update_order(
    room: &Room,
    order_id: &str,
    f: impl FnOnce(&mut OrderItem) -> bool,
) -> Option<Room> {
    update_session(room, |session| {
        session
            .orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .is_some_and(f)
    })
}

/// Occupy an available, active room with a fresh session.
///
/// The room's minimum hours are snapshotted into the session
/// (`default_minimum_hours` when the room has none).
pub fn start_session(
    room: &Room,
    request: &StartSession,
    session_id: String,
    now: Timestamp,
    default_minimum_hours: Decimal,
) -> Option<Room> {
    if !room.is_available() || !room.is_active {
        return None;
    }

    let minimum_hours = if room.minimum_hours > Decimal::ZERO {
        room.minimum_hours
    } else {
        default_minimum_hours
    };

    let session = Session {
        id: session_id,
        room_id: room.id.clone(),
        start_time: now,
        end_time: None,
        paused_at: None,
        total_paused_duration: 0,
        is_paused: false,
        guest_count: request.guest_count,
        guest_name: non_blank(request.guest_name.as_ref()),
        member_card: non_blank(request.member_card.as_ref()),
        assigned_waiter: non_blank(request.waiter.as_ref()),
        service_call_count: 0,
        orders: Vec::new(),
        notes: non_blank(request.notes.as_ref()),
        minimum_hours: Some(minimum_hours),
    };

    let mut next = room.clone();
    next.status = RoomStatus::Occupied;
    next.session = Some(session);
    Some(next)
}

/// Freeze the session clock at `now`
pub fn pause(room: &Room, now: Timestamp) -> Option<Room> {
    update_session(room, |session| {
        if session.is_paused {
            return false;
        }
        session.is_paused = true;
        session.paused_at = Some(now);
        true
    })
}

/// Fold the pause interval into `total_paused_duration` and restart the clock.
///
/// An interval that would be negative (clock moved backwards) counts as zero,
/// so the accumulator never decreases.
pub fn resume(room: &Room, now: Timestamp) -> Option<Room> {
    update_session(room, |session| {
        if !session.is_paused {
            return false;
        }
        if let Some(paused_at) = session.paused_at {
            let interval = now.saturating_sub(paused_at).max(0);
            session.total_paused_duration = session.total_paused_duration.saturating_add(interval);
        }
        session.paused_at = None;
        session.is_paused = false;
        true
    })
}

/// Overwrite the start time, no bounds check (`elapsed` clamps a future
/// start to zero)
pub fn edit_start_time(room: &Room, new_start_time: Timestamp) -> Option<Room> {
    update_session(room, |session| {
        session.start_time = new_start_time;
        true
    })
}

pub fn call_staff(room: &Room) -> Option<Room> {
    update_session(room, |session| {
        session.service_call_count = session.service_call_count.saturating_add(1);
        true
    })
}

/// Add `quantity` of `item` to the session.
///
/// A line for the same menu item absorbs the quantity (its price stays the
/// one captured when it was first ordered); otherwise a new line copies the
/// item's current name and price.
pub fn add_order(
    room: &Room,
    item: &MenuItem,
    quantity: u32,
    special_request: Option<String>,
    order_id: String,
    now: Timestamp,
) -> Option<Room> {
    if quantity == 0 {
        return None;
    }

    update_session(room, |session| {
        if let Some(existing) = session
            .orders
            .iter_mut()
            .find(|o| o.menu_item_id == item.id)
        {
            existing.set_quantity(existing.quantity.saturating_add(quantity));
            return true;
        }

        session.orders.push(OrderItem {
            id: order_id,
            menu_item_id: item.id.clone(),
            name: item.name.clone(),
            quantity,
            unit_price: item.price,
            subtotal: item.price * Decimal::from(quantity),
            timestamp: now,
            special_request: non_blank(special_request.as_ref()),
            status: OrderStatus::Pending,
        });
        true
    })
}

/// Shift a line's quantity by `delta`, never below 1 (use [`remove_order`]
/// to drop a line)
pub fn update_order_quantity(room: &Room, order_id: &str, delta: i32) -> Option<Room> {
    update_order(room, order_id, |order| {
        let target = (i64::from(order.quantity) + i64::from(delta)).clamp(1, i64::from(u32::MAX));
        let target = target as u32;
        if target == order.quantity {
            return false;
        }
        order.set_quantity(target);
        true
    })
}

pub fn remove_order(room: &Room, order_id: &str) -> Option<Room> {
    update_session(room, |session| {
        let before = session.orders.len();
        session.orders.retain(|o| o.id != order_id);
        session.orders.len() != before
    })
}

/// Replace a line's special request; blank text clears it
pub fn update_order_note(room: &Room, order_id: &str, text: &str) -> Option<Room> {
    let note = non_blank(Some(&text.to_string()));
    update_order(room, order_id, |order| {
        if order.special_request == note {
            return false;
        }
        order.special_request = note;
        true
    })
}

pub fn update_order_status(room: &Room, order_id: &str, status: OrderStatus) -> Option<Room> {
    update_order(room, order_id, |order| {
        if order.status == status {
            return false;
        }
        order.status = status;
        true
    })
}

/// Manual status edit (cleaning → available, reserved, maintenance).
///
/// Never enters or leaves `Occupied`: only a session start occupies a room
/// and only checkout releases it.
pub fn set_status(room: &Room, status: RoomStatus) -> Option<Room> {
    if status == RoomStatus::Occupied || room.is_occupied() || room.status == status {
        return None;
    }
    let mut next = room.clone();
    next.status = status;
    Some(next)
}

pub fn toggle_active(room: &Room) -> Option<Room> {
    let mut next = room.clone();
    next.is_active = !room.is_active;
    Some(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::LocalizedText;
    use shared::models::RoomType;

    const MINUTE: i64 = 60_000;

    fn available_room() -> Room {
        Room::new(
            "R01",
            LocalizedText::new("Room 1", ""),
            RoomType::Standard,
            6,
            Decimal::from(8000),
            Decimal::TWO,
        )
    }

    fn occupied_room(now: Timestamp) -> Room {
        start_session(
            &available_room(),
            &StartSession::new(4),
            "SES-1".to_string(),
            now,
            Decimal::TWO,
        )
        .unwrap()
    }

    fn beer() -> MenuItem {
        MenuItem::new("MENU-beer", LocalizedText::new("Beer", ""), "Drinks", Decimal::from(3000))
    }

    fn session(room: &Room) -> &Session {
        room.session.as_ref().unwrap()
    }

    #[test]
    fn test_start_session_initial_state() {
        let room = available_room();
        let request = StartSession::new(5)
            .with_waiter("Aung")
            .with_member_card("M123")
            .with_notes("birthday");
        let next = start_session(&room, &request, "SES-9".to_string(), 1_000, Decimal::TWO).unwrap();

        assert_eq!(next.status, RoomStatus::Occupied);
        assert!(next.is_consistent());
        let s = session(&next);
        assert_eq!(s.id, "SES-9");
        assert_eq!(s.room_id, "R01");
        assert_eq!(s.start_time, 1_000);
        assert_eq!(s.paused_at, None);
        assert_eq!(s.total_paused_duration, 0);
        assert!(!s.is_paused);
        assert!(s.orders.is_empty());
        assert_eq!(s.service_call_count, 0);
        assert_eq!(s.minimum_hours, Some(Decimal::TWO));
        assert_eq!(s.assigned_waiter.as_deref(), Some("Aung"));
        assert_eq!(s.member_card.as_deref(), Some("M123"));

        // input untouched
        assert_eq!(room.status, RoomStatus::Available);
        assert!(room.session.is_none());
    }

    #[test]
    fn test_start_requires_available_room() {
        let room = occupied_room(0);
        assert!(start_session(&room, &StartSession::new(2), "SES-2".to_string(), 0, Decimal::TWO).is_none());

        for status in [RoomStatus::Cleaning, RoomStatus::Reserved, RoomStatus::Maintenance] {
            let mut room = available_room();
            room.status = status;
            assert!(
                start_session(&room, &StartSession::new(2), "SES-3".to_string(), 0, Decimal::TWO)
                    .is_none()
            );
        }
    }

    #[test]
    fn test_start_refused_on_inactive_room() {
        let room = toggle_active(&available_room()).unwrap();
        assert!(!room.is_active);
        assert!(start_session(&room, &StartSession::new(2), "S".to_string(), 0, Decimal::TWO).is_none());

        let reactivated = toggle_active(&room).unwrap();
        assert!(start_session(&reactivated, &StartSession::new(2), "S".to_string(), 0, Decimal::TWO).is_some());
    }

    #[test]
    fn test_start_uses_default_minimum_when_room_has_none() {
        let mut room = available_room();
        room.minimum_hours = Decimal::ZERO;
        let next = start_session(&room, &StartSession::new(2), "S".to_string(), 0, Decimal::from(3)).unwrap();
        assert_eq!(session(&next).minimum_hours, Some(Decimal::from(3)));
    }

    #[test]
    fn test_blank_member_card_is_dropped() {
        let room = available_room();
        let next = start_session(
            &room,
            &StartSession::new(2).with_member_card("   "),
            "S".to_string(),
            0,
            Decimal::TWO,
        )
        .unwrap();
        assert_eq!(session(&next).member_card, None);
    }

    #[test]
    fn test_pause_resume_round_trip() {
        let room = occupied_room(0);

        let paused = pause(&room, 10 * MINUTE).unwrap();
        assert!(session(&paused).is_paused);
        assert_eq!(session(&paused).paused_at, Some(10 * MINUTE));

        // second pause is a no-op
        assert!(pause(&paused, 12 * MINUTE).is_none());

        let resumed = resume(&paused, 25 * MINUTE).unwrap();
        let s = session(&resumed);
        assert!(!s.is_paused);
        assert_eq!(s.paused_at, None);
        assert_eq!(s.total_paused_duration, 15 * MINUTE);

        // resume without pause is a no-op
        assert!(resume(&resumed, 30 * MINUTE).is_none());
    }

    #[test]
    fn test_resume_with_clock_skew_never_decreases_total() {
        let room = occupied_room(0);
        let paused = pause(&room, 10 * MINUTE).unwrap();
        let resumed = resume(&paused, 5 * MINUTE).unwrap();
        assert_eq!(session(&resumed).total_paused_duration, 0);
    }

    #[test]
    fn test_session_ops_need_a_session() {
        let room = available_room();
        assert!(pause(&room, 0).is_none());
        assert!(resume(&room, 0).is_none());
        assert!(edit_start_time(&room, 0).is_none());
        assert!(call_staff(&room).is_none());
        assert!(add_order(&room, &beer(), 1, None, "ORD-1".to_string(), 0).is_none());
        assert!(remove_order(&room, "ORD-1").is_none());
    }

    #[test]
    fn test_edit_start_time_is_unchecked() {
        let room = occupied_room(10 * MINUTE);
        let edited = edit_start_time(&room, 99 * MINUTE).unwrap();
        assert_eq!(session(&edited).start_time, 99 * MINUTE);
    }

    #[test]
    fn test_call_staff_counts() {
        let room = occupied_room(0);
        let once = call_staff(&room).unwrap();
        let twice = call_staff(&once).unwrap();
        assert_eq!(session(&twice).service_call_count, 2);
    }

    #[test]
    fn test_add_order_aggregates_same_menu_item() {
        let room = occupied_room(0);
        let once = add_order(&room, &beer(), 1, None, "ORD-1".to_string(), MINUTE).unwrap();
        let twice = add_order(&once, &beer(), 2, None, "ORD-2".to_string(), 2 * MINUTE).unwrap();

        let orders = &session(&twice).orders;
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].id, "ORD-1");
        assert_eq!(orders[0].quantity, 3);
        assert_eq!(orders[0].subtotal, Decimal::from(9000));
        assert_eq!(orders[0].timestamp, MINUTE);
    }

    #[test]
    fn test_add_order_copies_price_at_order_time() {
        let room = occupied_room(0);
        let mut item = beer();
        let with_line = add_order(&room, &item, 1, Some("no ice".to_string()), "ORD-1".to_string(), 0).unwrap();

        // later price change doesn't touch the existing line
        item.price = Decimal::from(5000);
        item.name = LocalizedText::new("Craft Beer", "");
        let again = add_order(&with_line, &item, 1, None, "ORD-2".to_string(), 0).unwrap();

        let line = &session(&again).orders[0];
        assert_eq!(line.unit_price, Decimal::from(3000));
        assert_eq!(line.name.en, "Beer");
        assert_eq!(line.subtotal, Decimal::from(6000));
        assert_eq!(line.special_request.as_deref(), Some("no ice"));
        assert_eq!(line.status, OrderStatus::Pending);
    }

    #[test]
    fn test_add_zero_quantity_is_ignored() {
        let room = occupied_room(0);
        assert!(add_order(&room, &beer(), 0, None, "ORD-1".to_string(), 0).is_none());
    }

    #[test]
    fn test_update_order_quantity_floors_at_one() {
        let room = occupied_room(0);
        let room = add_order(&room, &beer(), 3, None, "ORD-1".to_string(), 0).unwrap();

        let up = update_order_quantity(&room, "ORD-1", 2).unwrap();
        assert_eq!(session(&up).orders[0].quantity, 5);
        assert_eq!(session(&up).orders[0].subtotal, Decimal::from(15000));

        let down = update_order_quantity(&up, "ORD-1", -100).unwrap();
        assert_eq!(session(&down).orders[0].quantity, 1);
        assert_eq!(session(&down).orders[0].subtotal, Decimal::from(3000));

        // already at the floor
        assert!(update_order_quantity(&down, "ORD-1", -1).is_none());
        assert!(update_order_quantity(&down, "ORD-404", 1).is_none());
    }

    #[test]
    fn test_remove_and_annotate_orders() {
        let room = occupied_room(0);
        let room = add_order(&room, &beer(), 1, None, "ORD-1".to_string(), 0).unwrap();

        let noted = update_order_note(&room, "ORD-1", "extra cold").unwrap();
        assert_eq!(session(&noted).orders[0].special_request.as_deref(), Some("extra cold"));
        let cleared = update_order_note(&noted, "ORD-1", "").unwrap();
        assert_eq!(session(&cleared).orders[0].special_request, None);

        let served = update_order_status(&cleared, "ORD-1", OrderStatus::Served).unwrap();
        assert_eq!(session(&served).orders[0].status, OrderStatus::Served);
        assert!(update_order_status(&served, "ORD-1", OrderStatus::Served).is_none());

        let removed = remove_order(&served, "ORD-1").unwrap();
        assert!(session(&removed).orders.is_empty());
        assert!(remove_order(&removed, "ORD-1").is_none());
    }

    #[test]
    fn test_set_status_guards_occupied() {
        let mut room = available_room();
        assert!(set_status(&room, RoomStatus::Occupied).is_none());
        assert!(set_status(&room, RoomStatus::Available).is_none());

        room.status = RoomStatus::Cleaning;
        let cleaned = set_status(&room, RoomStatus::Available).unwrap();
        assert_eq!(cleaned.status, RoomStatus::Available);

        let reserved = set_status(&cleaned, RoomStatus::Reserved).unwrap();
        assert_eq!(reserved.status, RoomStatus::Reserved);

        let busy = occupied_room(0);
        assert!(set_status(&busy, RoomStatus::Maintenance).is_none());
    }
}
