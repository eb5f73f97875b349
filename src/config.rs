use travel_admin_shared::API_PREFIX;

/// 未配置时使用的后端地址
pub const DEFAULT_API_ORIGIN: &str = "http://localhost:8000";

/// 编译期可通过 `ADMIN_API_ORIGIN` 覆盖默认地址
const BUILD_API_ORIGIN: Option<&str> = option_env!("ADMIN_API_ORIGIN");

/// 控制台配置
///
/// 后端地址的来源优先级：登录页填写并保存的地址 > 编译期环境变量 > 默认值。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    api_origin: String,
}

impl ConsoleConfig {
    pub fn new(api_origin: &str) -> Self {
        let origin = api_origin.trim().trim_end_matches('/');
        if origin.is_empty() {
            return Self::default();
        }
        Self {
            api_origin: origin.to_string(),
        }
    }

    /// 按优先级解析配置，`stored` 为用户保存的地址
    pub fn resolve(stored: Option<&str>) -> Self {
        match stored.map(str::trim).filter(|s| !s.is_empty()) {
            Some(origin) => Self::new(origin),
            None => Self::new(BUILD_API_ORIGIN.unwrap_or(DEFAULT_API_ORIGIN)),
        }
    }

    pub fn api_origin(&self) -> &str {
        &self.api_origin
    }

    /// `<origin>/api/v1`
    pub fn base_url(&self) -> String {
        format!("{}{}", self.api_origin, API_PREFIX)
    }

    pub fn endpoint(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url(), path)
        } else {
            format!("{}/{}", self.base_url(), path)
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_origin: DEFAULT_API_ORIGIN.to_string(),
        }
    }
}
