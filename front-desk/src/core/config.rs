use std::time::Duration;

/// 前台引擎配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HOTEL_NAME | Grand Hotel | 酒店名称 (模板文本使用) |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (未设置) | 日志目录，设置后按天滚动写文件 |
/// | LOG_JSON | false | JSON 格式日志 |
/// | TEXTGEN_URL | (未设置) | 文本生成服务地址，未设置时只用模板 |
/// | TEXTGEN_API_KEY | (未设置) | 文本生成服务 Bearer token |
/// | TEXTGEN_TIMEOUT_MS | 8000 | 文本生成超时(毫秒) |
/// | EVENT_CHANNEL_CAPACITY | 1024 | 变更通知广播容量 |
/// | SERVICE_DESK_STAFF_ID | (未设置) | 客房服务通知接收人，未设置时通知整个前台 |
/// | PROCESSED_COMMAND_CAPACITY | 10000 | 幂等去重保留的命令 ID 数量，超出后淘汰最早的 |
///
/// # 示例
///
/// ```ignore
/// HOTEL_NAME="Harbor View" TEXTGEN_TIMEOUT_MS=3000 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Hotel name used in templated guest and staff texts
    pub hotel_name: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub log_json: bool,
    /// Text-generation endpoint; `None` means templates only
    pub textgen_url: Option<String>,
    pub textgen_api_key: Option<String>,
    /// Upper bound for a single text-generation call (毫秒)
    pub textgen_timeout_ms: u64,
    pub event_channel_capacity: usize,
    /// Recipient of service/food request notifications
    pub service_desk_staff_id: Option<String>,
    /// How many applied command ids are remembered for de-duplication
    pub processed_command_capacity: usize,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            hotel_name: std::env::var("HOTEL_NAME").unwrap_or(defaults.hotel_name),
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_dir: non_empty_var("LOG_DIR"),
            log_json: std::env::var("LOG_JSON")
                .map(|v| matches!(v.as_str(), "1" | "true"))
                .unwrap_or(defaults.log_json),
            textgen_url: non_empty_var("TEXTGEN_URL"),
            textgen_api_key: non_empty_var("TEXTGEN_API_KEY"),
            textgen_timeout_ms: std::env::var("TEXTGEN_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.textgen_timeout_ms),
            event_channel_capacity: std::env::var("EVENT_CHANNEL_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.event_channel_capacity),
            service_desk_staff_id: non_empty_var("SERVICE_DESK_STAFF_ID"),
            processed_command_capacity: std::env::var("PROCESSED_COMMAND_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.processed_command_capacity),
        }
    }

    pub fn generator_timeout(&self) -> Duration {
        Duration::from_millis(self.textgen_timeout_ms)
    }

    /// 测试场景使用：固定默认值并覆盖超时
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.textgen_timeout_ms = timeout_ms;
        self
    }
}

/// Fixed defaults, independent of the process environment
impl Default for Config {
    fn default() -> Self {
        Self {
            hotel_name: "Grand Hotel".to_string(),
            log_level: "info".to_string(),
            log_dir: None,
            log_json: false,
            textgen_url: None,
            textgen_api_key: None,
            textgen_timeout_ms: 8000,
            event_channel_capacity: 1024,
            service_desk_staff_id: None,
            processed_command_capacity: 10_000,
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
