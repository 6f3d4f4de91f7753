//! Session Model
//!
//! A [`Session`] is one paid occupancy of a room. While the room is occupied
//! it lives inside the room record; checkout seals it into a
//! [`SessionRecord`] (session + [`Settlement`]) that is written to history
//! and never touched again.

use crate::types::{LocalizedText, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kitchen fulfillment status of an order line
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Served,
}

/// Accepted payment methods
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    #[serde(rename = "KBZ Pay")]
    KbzPay,
    #[serde(rename = "Wave Money")]
    WaveMoney,
}

/// Food/drink line on a session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: String,
    pub menu_item_id: String,
    /// Copied from the menu at order time
    pub name: LocalizedText,
    /// Always >= 1
    pub quantity: u32,
    /// Copied from the menu at order time
    pub unit_price: Decimal,
    /// `quantity * unit_price`, rewritten on every quantity change
    pub subtotal: Decimal,
    pub timestamp: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_request: Option<String>,
    pub status: OrderStatus,
}

impl OrderItem {
    /// Set the quantity and recompute the subtotal
    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity.max(1);
        self.subtotal = self.unit_price * Decimal::from(self.quantity);
    }
}

/// Live or sealed room session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub room_id: String,
    pub start_time: Timestamp,
    /// Set exactly once, at checkout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<Timestamp>,
    pub paused_at: Option<Timestamp>,
    /// Accumulated paused milliseconds, never decreases
    pub total_paused_duration: i64,
    #[serde(default)]
    pub is_paused: bool,
    pub guest_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_card: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_waiter: Option<String>,
    pub service_call_count: u32,
    pub orders: Vec<OrderItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// 开台时定格的最低消费时长，之后修改房间配置不影响本场
    #[serde(default)]
    pub minimum_hours: Option<Decimal>,
}

impl Session {
    /// Whether a usable member card is attached (blank strings don't count)
    pub fn has_member_card(&self) -> bool {
        self.member_card
            .as_deref()
            .is_some_and(|card| !card.trim().is_empty())
    }
}

/// Financial snapshot attached at checkout
///
/// Copies the bill figures so later rate or tax changes never alter a closed
/// session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    pub billable_hours: Decimal,
    pub room_charges: Decimal,
    pub order_charges: Decimal,
    pub discount: Decimal,
    pub tax: Decimal,
    pub service_charge: Decimal,
    pub total_bill: Decimal,
    pub payment_method: PaymentMethod,
    pub paid_amount: Decimal,
    /// `paid_amount - total_bill`; negative when under-tendered
    pub change_amount: Decimal,
}

/// Sealed session as stored under `session-history:<id>`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionRecord {
    #[serde(flatten)]
    pub session: Session,
    #[serde(flatten)]
    pub settlement: Settlement,
}

impl SessionRecord {
    pub fn id(&self) -> &str {
        &self.session.id
    }

    pub fn end_time(&self) -> Timestamp {
        self.session.end_time.unwrap_or(self.session.start_time)
    }
}
