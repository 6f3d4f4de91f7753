//! 工具模块
//!
//! - [`clock`]: injectable time source
//! - [`logger`]: tracing setup
//! - [`time`]: venue time-zone helpers

pub mod clock;
pub mod logger;
pub mod time;

pub use clock::{Clock, ManualClock, SystemClock};
