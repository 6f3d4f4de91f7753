//! Room sessions
//!
//! - [`duration`] / [`billing`]: pure calculators
//! - [`lifecycle`] / [`checkout`]: pure room transitions
//! - [`manager`]: owns the room table and persists every transition

pub mod billing;
pub mod checkout;
pub mod duration;
pub mod lifecycle;
pub mod manager;

pub use billing::{BillingPolicy, compute_bill};
pub use checkout::{Settled, Tender};
pub use duration::elapsed;
pub use lifecycle::StartSession;
pub use manager::{ErrorCode, ManagerError, ManagerResult, RoomManager};
