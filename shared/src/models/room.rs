//! Room Model

use super::session::Session;
use crate::types::LocalizedText;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Room category (包厢等级)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum RoomType {
    #[default]
    Standard,
    #[serde(rename = "VIP")]
    Vip,
    #[serde(rename = "VVIP")]
    Vvip,
}

/// Room status
///
/// `Available → Occupied → Cleaning → Available` is the session cycle.
/// `Reserved` and `Maintenance` are only reached through manual status edits.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    #[default]
    Available,
    Occupied,
    Cleaning,
    Reserved,
    Maintenance,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::Available => "available",
            RoomStatus::Occupied => "occupied",
            RoomStatus::Cleaning => "cleaning",
            RoomStatus::Reserved => "reserved",
            RoomStatus::Maintenance => "maintenance",
        }
    }
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Karaoke room entity
///
/// Invariant: `session.is_some()` iff `status == RoomStatus::Occupied`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    pub name: LocalizedText,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    pub capacity: u32,
    /// Price per billable hour, whole currency units
    pub hourly_rate: Decimal,
    pub status: RoomStatus,
    pub floor: i32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
    #[serde(default)]
    pub smoking: bool,
    /// Minimum billable hours; copied into each new session
    pub minimum_hours: Decimal,
    pub is_active: bool,
    #[serde(default)]
    pub session: Option<Session>,
}

impl Room {
    /// Create an available room with no session
    pub fn new(
        id: impl Into<String>,
        name: LocalizedText,
        room_type: RoomType,
        capacity: u32,
        hourly_rate: Decimal,
        minimum_hours: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            name,
            room_type,
            capacity,
            hourly_rate,
            status: RoomStatus::Available,
            floor: 1,
            features: Vec::new(),
            smoking: false,
            minimum_hours,
            is_active: true,
            session: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == RoomStatus::Available
    }

    pub fn is_occupied(&self) -> bool {
        self.status == RoomStatus::Occupied
    }

    /// Whether the status/session pairing holds
    pub fn is_consistent(&self) -> bool {
        self.is_occupied() == self.session.is_some()
    }
}
