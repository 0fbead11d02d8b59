/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a prefixed resource ID, e.g. `task-3f2a…`.
///
/// The prefix keeps ids readable in logs and inbox views; the suffix is a
/// v4 UUID in simple (hyphen-less) form.
pub fn new_id(prefix: &str) -> String {
    format!("{}-{}", prefix, uuid::Uuid::new_v4().simple())
}
