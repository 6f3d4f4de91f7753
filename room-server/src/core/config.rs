use crate::sessions::BillingPolicy;
use crate::store::{KvStore, MemoryStore, RedbStore, StoreResult};
use crate::utils::time::parse_timezone;
use chrono_tz::Tz;
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::sync::Arc;

/// Store backend, chosen once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    /// redb file under the work directory
    #[default]
    Redb,
    /// In-process only, lost on exit
    Memory,
}

impl StoreBackend {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "redb" => Some(StoreBackend::Redb),
            "memory" => Some(StoreBackend::Memory),
            _ => None,
        }
    }
}

/// 服务配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 (rooms.redb) |
/// | STORE_BACKEND | redb | `redb` or `memory` |
/// | TIMEZONE | Asia/Yangon | 营业时区 |
/// | LOG_LEVEL | info | tracing filter |
/// | LOG_DIR | (none) | daily rolling log files |
/// | LOG_JSON | false | JSON log lines |
/// | DEFAULT_MINIMUM_HOURS | 2 | fallback minimum billable hours |
/// | MEMBER_DISCOUNT_PERCENT | 10 | on room charges |
/// | TAX_PERCENT | 5 | |
/// | SERVICE_CHARGE_PERCENT | 10 | |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/var/lib/karaoke TAX_PERCENT=7 cargo run -p room-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: String,
    pub store_backend: StoreBackend,
    pub timezone: Tz,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub log_json: bool,
    pub billing: BillingPolicy,
}

impl Config {
    /// 从环境变量加载配置
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or unparsable values use defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = BillingPolicy::default();
        let percent = |key: &str, default: Decimal| {
            lookup(key)
                .and_then(|v| v.trim().parse::<Decimal>().ok())
                .filter(|p| *p >= Decimal::ZERO)
                .map(|p| p / Decimal::ONE_HUNDRED)
                .unwrap_or(default)
        };

        let billing = BillingPolicy {
            member_discount_rate: percent("MEMBER_DISCOUNT_PERCENT", defaults.member_discount_rate),
            tax_rate: percent("TAX_PERCENT", defaults.tax_rate),
            service_charge_rate: percent("SERVICE_CHARGE_PERCENT", defaults.service_charge_rate),
            default_minimum_hours: lookup("DEFAULT_MINIMUM_HOURS")
                .and_then(|v| v.trim().parse::<Decimal>().ok())
                .filter(|h| *h > Decimal::ZERO)
                .unwrap_or(defaults.default_minimum_hours),
        };

        let store_backend = match lookup("STORE_BACKEND") {
            Some(value) => StoreBackend::parse(&value).unwrap_or_else(|| {
                tracing::warn!("Unknown STORE_BACKEND '{}', using redb", value);
                StoreBackend::Redb
            }),
            None => StoreBackend::default(),
        };

        Self {
            work_dir: lookup("WORK_DIR").unwrap_or_else(|| "./data".into()),
            store_backend,
            timezone: parse_timezone(
                &lookup("TIMEZONE").unwrap_or_else(|| "Asia/Yangon".into()),
            ),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: lookup("LOG_DIR").filter(|d| !d.trim().is_empty()),
            log_json: lookup("LOG_JSON")
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            billing,
        }
    }

    /// redb file location
    pub fn store_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("rooms.redb")
    }

    /// Open the configured backend
    pub fn open_store(&self) -> StoreResult<Arc<dyn KvStore>> {
        match self.store_backend {
            StoreBackend::Redb => {
                std::fs::create_dir_all(&self.work_dir)?;
                let path = self.store_path();
                tracing::info!(path = %path.display(), "Opening redb store");
                Ok(Arc::new(RedbStore::open(path)?))
            }
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory store, nothing will survive a restart");
                Ok(Arc::new(MemoryStore::new()))
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
