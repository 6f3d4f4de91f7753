/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a prefixed record id, e.g. `SES-5f0c…`.
///
/// Prefixes in use: `SES` (sessions), `ORD` (order lines), `ROOM`, `MENU`.
pub fn generate_id(prefix: &str) -> String {
    format!("{}-{}", prefix, uuid::Uuid::new_v4().simple())
}
