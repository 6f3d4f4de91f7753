//! Checkout: seal a live session into an immutable history record

use super::billing::BillingPolicy;
use rust_decimal::Decimal;
use shared::Timestamp;
use shared::models::{BillSummary, PaymentMethod, Room, RoomStatus, SessionRecord, Settlement};

/// Amount handed over at checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tender {
    /// Exactly the bill total; change is zero
    Exact,
    /// Explicit amount, may be less than the total (negative change)
    Amount(Decimal),
}

impl Tender {
    pub fn resolve(self, total: Decimal) -> Decimal {
        match self {
            Tender::Exact => total,
            Tender::Amount(amount) => amount,
        }
    }
}

/// Result of a successful checkout
#[derive(Debug, Clone, PartialEq)]
pub struct Settled {
    /// Sealed session for `session-history:<id>`
    pub record: SessionRecord,
    /// Room after checkout: cleaning, no session
    pub room: Room,
    /// Final bill the record was built from
    pub bill: BillSummary,
}

/// Seal the room's session at `now`.
///
/// `None` when the room has no live session.
pub fn settle(
    room: &Room,
    policy: &BillingPolicy,
    payment_method: PaymentMethod,
    tender: Tender,
    now: Timestamp,
) -> Option<Settled> {
    if !room.is_occupied() {
        return None;
    }
    let live = room.session.as_ref()?;

    let bill = policy.compute(live, room, now);
    let paid_amount = tender.resolve(bill.total_amount);

    let mut session = live.clone();
    session.end_time = Some(now);

    let record = SessionRecord {
        session,
        settlement: Settlement {
            billable_hours: bill.billable_hours,
            room_charges: bill.room_charges,
            order_charges: bill.order_total,
            discount: bill.discount,
            tax: bill.tax,
            service_charge: bill.service_charge,
            total_bill: bill.total_amount,
            payment_method,
            paid_amount,
            change_amount: paid_amount - bill.total_amount,
        },
    };

    let mut next = room.clone();
    next.session = None;
    next.status = RoomStatus::Cleaning;

    Some(Settled {
        record,
        room: next,
        bill,
    })
}
