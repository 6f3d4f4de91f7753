//! 核心模块 - 配置与组装

pub mod config;

pub use config::{Config, StoreBackend};
