//! Shared types for the karaoke room POS
//!
//! Domain records (rooms, sessions, menu items, users), the derived bill
//! summary, id/time helpers and display formatting. Everything here is
//! plain data; billing and lifecycle logic live in `room-server`.

pub mod format;
pub mod models;
pub mod types;
pub mod util;

// Re-exports
pub use rust_decimal::Decimal;
pub use serde::{Deserialize, Serialize};

pub use types::{Language, LocalizedText, Timestamp};
