use serde::{Deserialize, Serialize};

pub mod date;
pub mod protocol;
pub mod text;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 所有接口共用的路径前缀
pub const API_PREFIX: &str = "/api/v1";
/// 列表接口每次读取的固定条数（无分页 UI）
pub const PAGE_SIZE: u32 = 100;
/// 社区名称必须携带的前缀
pub const COMMUNITY_NAME_PREFIX: &str = "q/";
/// 社区描述的最大单词数
pub const MAX_DESCRIPTION_WORDS: usize = 35;

// 浏览器持久化存储使用的键
pub const KEY_LOGGED_IN: &str = "adminLoggedIn";
pub const KEY_TOKEN: &str = "adminToken";
pub const KEY_USER: &str = "adminUser";
pub const KEY_BYPASS: &str = "adminBypass";
pub const KEY_API_ORIGIN: &str = "adminApiOrigin";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 登录成功后返回的管理员资料
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AdminUser {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
}

impl AdminUser {
    /// 顶栏展示的名称：优先昵称，其次用户名
    pub fn display_name(&self) -> Option<&str> {
        self.nickname
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.username.as_deref().filter(|s| !s.is_empty()))
    }

    /// 头像中显示的大写首字母
    pub fn initial(&self) -> Option<String> {
        self.display_name()
            .and_then(|name| name.chars().next())
            .map(|c| c.to_uppercase().collect())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub user: Option<AdminUser>,
}

/// 仪表盘统计，缺失的字段按 0 处理
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardStats {
    pub total_users: u64,
    pub total_posts: u64,
    pub total_trips: u64,
    pub total_likes: u64,
    pub total_communities: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Community {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_admin_created: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// 反馈处理状态
///
/// 后端可能返回未知的状态值，原样保存在 `Other` 中用于展示。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FeedbackStatus {
    #[default]
    Pending,
    Resolved,
    Rejected,
    Other(String),
}

impl FeedbackStatus {
    /// 切换按钮的目标状态：已解决 -> 待处理，其余 -> 已解决
    pub fn toggled(&self) -> Self {
        match self {
            FeedbackStatus::Resolved => FeedbackStatus::Pending,
            _ => FeedbackStatus::Resolved,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FeedbackStatus::Pending => "pending",
            FeedbackStatus::Resolved => "resolved",
            FeedbackStatus::Rejected => "rejected",
            FeedbackStatus::Other(raw) => raw,
        }
    }

    /// 行内切换按钮的文案
    pub fn action_label(&self) -> &'static str {
        match self {
            FeedbackStatus::Resolved => "Reopen",
            FeedbackStatus::Pending => "Resolve",
            _ => "Update",
        }
    }
}

impl From<String> for FeedbackStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "pending" => FeedbackStatus::Pending,
            "resolved" => FeedbackStatus::Resolved,
            "rejected" => FeedbackStatus::Rejected,
            _ => FeedbackStatus::Other(raw),
        }
    }
}

impl From<FeedbackStatus> for String {
    fn from(status: FeedbackStatus) -> Self {
        match status {
            FeedbackStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// 反馈列表的两种子列表
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    #[default]
    Feedback,
    FeatureRequest,
}

impl FeedbackKind {
    /// `feedback_type` 查询参数的取值
    pub fn query_value(&self) -> &'static str {
        match self {
            FeedbackKind::Feedback => "feedback",
            FeedbackKind::FeatureRequest => "feature_request",
        }
    }

    /// 用于提示文案的复数名词
    pub fn plural_label(&self) -> &'static str {
        match self {
            FeedbackKind::Feedback => "feedback",
            FeedbackKind::FeatureRequest => "feature requests",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackItem {
    pub id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<FeedbackStatus>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub feedback_type: Option<FeedbackKind>,
}

impl FeedbackItem {
    pub fn current_status(&self) -> FeedbackStatus {
        self.status.clone().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: FeedbackStatus,
}

// =========================================================
// 错误响应 (Error Bodies)
// =========================================================

/// 非 2xx 响应体：`{"detail": ...}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<ErrorDetail>,
}

/// `detail` 可能是一条消息，也可能是字段校验错误列表
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message(String),
    Fields(Vec<FieldError>),
    Other(serde_json::Value),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldError {
    WithMsg { msg: String },
    Other(serde_json::Value),
}

impl FieldError {
    fn message(&self) -> String {
        match self {
            FieldError::WithMsg { msg } => msg.clone(),
            FieldError::Other(serde_json::Value::String(s)) => s.clone(),
            FieldError::Other(v) => v.to_string(),
        }
    }
}

impl ErrorDetail {
    /// 合并为一条可展示的消息，字段错误之间以 ", " 连接
    pub fn to_message(&self) -> String {
        match self {
            ErrorDetail::Message(msg) => msg.clone(),
            ErrorDetail::Fields(fields) => fields
                .iter()
                .map(FieldError::message)
                .collect::<Vec<_>>()
                .join(", "),
            ErrorDetail::Other(v) => v.to_string(),
        }
    }
}

impl ErrorBody {
    /// 从响应文本中提取 detail，解析失败或为空时返回 None
    pub fn detail_from(body: &str) -> Option<String> {
        serde_json::from_str::<ErrorBody>(body)
            .ok()?
            .detail
            .map(|d| d.to_message())
            .filter(|msg| !msg.is_empty())
    }
}
