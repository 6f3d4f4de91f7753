//! Room Server - 卡拉OK包厢计费与开台引擎
//!
//! # 架构概述
//!
//! - **存储** (`store`): `KvStore` trait, redb and in-memory backends
//! - **包厢会话** (`sessions`): duration/bill calculators, lifecycle
//!   transitions, checkout and the `RoomManager`
//! - **认证** (`auth`): argon2 staff login
//! - **报表** (`reports`): dashboard statistics
//!
//! # 模块结构
//!
//! ```text
//! room-server/src/
//! ├── core/          # 配置
//! ├── sessions/      # 计费、状态机、结账
//! ├── store/         # KV 持久化
//! ├── utils/         # 时钟、日志、时区
//! ├── auth.rs
//! ├── reports.rs
//! └── seed.rs
//! ```

pub mod auth;
pub mod core;
pub mod reports;
pub mod seed;
pub mod sessions;
pub mod store;
pub mod utils;

// Re-export 公共类型
pub use auth::AuthService;
pub use core::{Config, StoreBackend};
pub use reports::{DashboardStats, DateRange, dashboard_stats, hourly_revenue};
pub use sessions::{
    BillingPolicy, ManagerError, ManagerResult, RoomManager, Settled, StartSession, Tender,
    compute_bill,
};
pub use store::{KvStore, MemoryStore, RedbStore, StoreError, StoreResult};
pub use utils::logger::{init_logger, init_logger_with_file};
pub use utils::{Clock, ManualClock, SystemClock};

pub fn print_banner() {
    println!(
        r#"
 ____                         ____
|  _ \ ___   ___  _ __ ___   / ___|  ___ _ ____   _____ _ __
| |_) / _ \ / _ \| '_ ` _ \  \___ \ / _ \ '__\ \ / / _ \ '__|
|  _ < (_) | (_) | | | | | |  ___) |  __/ |   \ V /  __/ |
|_| \_\___/ \___/|_| |_| |_| |____/ \___|_|    \_/ \___|_|
    "#
    );
}
