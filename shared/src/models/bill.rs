//! Bill summary (derived, never stored)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Charges of a session at one instant
///
/// Produced by the bill calculator on every display tick and once more at
/// checkout. Values are exact; only display formatting rounds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BillSummary {
    /// Active (unpaused) milliseconds
    pub active_duration: u64,
    /// Minimum-floored, half-hour rounded hours
    pub billable_hours: Decimal,
    pub room_charges: Decimal,
    pub order_total: Decimal,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub after_discount: Decimal,
    pub tax: Decimal,
    pub service_charge: Decimal,
    pub total_amount: Decimal,
    pub is_minimum_charge_applied: bool,
}
