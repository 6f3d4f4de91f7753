//! Data models
//!
//! Records persisted in the key-value store (camelCase JSON) and the
//! derived [`BillSummary`] handed to the presentation layer.

pub mod bill;
pub mod menu;
pub mod room;
pub mod session;
pub mod user;

// Re-exports
pub use bill::*;
pub use menu::*;
pub use room::*;
pub use session::*;
pub use user::*;
