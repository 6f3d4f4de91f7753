//! Bill calculation using rust_decimal for precision
//!
//! All arithmetic is exact `Decimal`; no intermediate value is rounded. The
//! venue currency has no subunit, so rounding only happens for display
//! (see `shared::format`).
//!
//! # Algorithm
//!
//! ```text
//! active hours ── minimum floor ── ceil to 0.5h ──▶ billable hours
//! room charges  = billable hours × hourly rate
//! subtotal      = room charges + Σ order subtotals
//! discount      = room charges × member rate      (member card only)
//! after         = subtotal − discount
//! tax, service  = after × rate                    (independent)
//! total         = after + tax + service
//! ```

use super::duration::{MILLIS_PER_HOUR, elapsed};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::Timestamp;
use shared::models::{BillSummary, Room, Session};

/// Rates applied by the bill calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingPolicy {
    /// Fraction of room charges waived for members (orders excluded)
    pub member_discount_rate: Decimal,
    /// Fraction of the post-discount amount
    pub tax_rate: Decimal,
    /// Fraction of the post-discount amount
    pub service_charge_rate: Decimal,
    /// Minimum billable hours when neither session nor room carries one
    pub default_minimum_hours: Decimal,
}

impl Default for BillingPolicy {
    fn default() -> Self {
        Self {
            member_discount_rate: Decimal::new(10, 2),
            tax_rate: Decimal::new(5, 2),
            service_charge_rate: Decimal::new(10, 2),
            default_minimum_hours: Decimal::TWO,
        }
    }
}

impl BillingPolicy {
    /// Minimum hours for a session: its start-time snapshot, else the room's
    /// current rule, else the policy default. Zero counts as unset.
    pub fn minimum_hours_for(&self, session: &Session, room: &Room) -> Decimal {
        session
            .minimum_hours
            .filter(|h| *h > Decimal::ZERO)
            .or_else(|| Some(room.minimum_hours).filter(|h| *h > Decimal::ZERO))
            .unwrap_or(self.default_minimum_hours)
    }

    /// Full bill for `session` in `room` at instant `now`.
    ///
    /// Pure: the same inputs always give the same summary.
    pub fn compute(&self, session: &Session, room: &Room, now: Timestamp) -> BillSummary {
        let active_duration = elapsed(session, now);
        let active_hours = Decimal::from(active_duration) / Decimal::from(MILLIS_PER_HOUR);

        let min_hours = self.minimum_hours_for(session, room);
        let is_minimum_charge_applied = active_hours < min_hours;
        let floored = if is_minimum_charge_applied {
            min_hours
        } else {
            active_hours
        };
        let billable_hours = round_up_to_half_hour(floored);

        let room_charges = billable_hours * room.hourly_rate;
        let order_total: Decimal = session.orders.iter().map(|o| o.subtotal).sum();
        let subtotal = room_charges + order_total;

        let discount = if session.has_member_card() {
            room_charges * self.member_discount_rate
        } else {
            Decimal::ZERO
        };
        let after_discount = subtotal - discount;

        let tax = after_discount * self.tax_rate;
        let service_charge = after_discount * self.service_charge_rate;
        let total_amount = after_discount + tax + service_charge;

        BillSummary {
            active_duration,
            billable_hours,
            room_charges,
            order_total,
            subtotal,
            discount,
            after_discount,
            tax,
            service_charge,
            total_amount,
            is_minimum_charge_applied,
        }
    }
}

/// Bill with the default venue rates (10% member discount, 5% tax, 10%
/// service, 2h default minimum)
pub fn compute_bill(session: &Session, room: &Room, now: Timestamp) -> BillSummary {
    BillingPolicy::default().compute(session, room, now)
}

/// Ceil to 0.5 granularity: one minute into a half-hour block bills the block
pub fn round_up_to_half_hour(hours: Decimal) -> Decimal {
    (hours * Decimal::TWO).ceil() / Decimal::TWO
}
