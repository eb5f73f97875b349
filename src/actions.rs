//! 变更操作：客户端校验、失败文案与占位操作

use travel_admin_shared::text::word_count;
use travel_admin_shared::{COMMUNITY_NAME_PREFIX, MAX_DESCRIPTION_WORDS};

use crate::error::{ActionError, ApiError, ValidationError};

/// 界面提示（toast）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub is_error: bool,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: true,
        }
    }
}

impl From<ActionError> for Notice {
    fn from(e: ActionError) -> Self {
        Notice::error(e.to_string())
    }
}

pub const COMMUNITY_CREATED: &str = "Community created successfully!";
pub const DELETE_COMMUNITY_CONFIRM: &str = "Are you sure you want to delete this community?";

/// 各操作的失败文案
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    ToggleUserStatus,
    CreateCommunity,
    UpdateFeedbackStatus,
    ViewFeedback,
}

impl Action {
    fn fallback(&self) -> &'static str {
        match self {
            Action::ToggleUserStatus => "Failed to update user status",
            Action::CreateCommunity => "Failed to create community",
            Action::UpdateFeedbackStatus => "Failed to update status",
            Action::ViewFeedback => "Failed to load feedback details",
        }
    }

    fn connectivity(&self) -> &'static str {
        match self {
            Action::ToggleUserStatus => "Error updating user status. Please try again.",
            Action::CreateCommunity => "Error creating community. Please try again.",
            Action::UpdateFeedbackStatus => "Error updating status. Please try again.",
            Action::ViewFeedback => "Error loading feedback details",
        }
    }

    /// 把后端调用错误转换为面向用户的错误
    pub(crate) fn fail(&self, err: ApiError) -> ActionError {
        match err {
            ApiError::MissingToken => return ActionError::NotAuthenticated,
            ApiError::Unauthorized { .. } => return ActionError::SessionExpired,
            _ => {}
        }
        if err.is_connectivity() {
            log::error!("{:?} failed: {}", self, err);
            return ActionError::Network(self.connectivity().to_string());
        }
        ActionError::Failed(err.detail().unwrap_or(self.fallback()).to_string())
    }
}

/// 通过校验的社区创建输入
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommunityDraft {
    pub name: String,
    pub description: String,
}

/// 社区创建的客户端校验
///
/// 名称必须以 `q/` 开头；描述为 1 到 35 个以空白分隔的单词。两者均先去除首尾空白。
pub fn validate_community(name: &str, description: &str) -> Result<CommunityDraft, ValidationError> {
    let name = name.trim();
    let description = description.trim();

    if !name.starts_with(COMMUNITY_NAME_PREFIX) {
        return Err(ValidationError::CommunityNamePrefix);
    }
    let words = word_count(description);
    if words > MAX_DESCRIPTION_WORDS {
        return Err(ValidationError::DescriptionTooLong { words });
    }
    if words == 0 {
        return Err(ValidationError::DescriptionRequired);
    }

    Ok(CommunityDraft {
        name: name.to_string(),
        description: description.to_string(),
    })
}

/// 描述输入框旁的实时计数是否超限
pub fn description_over_limit(description: &str) -> bool {
    word_count(description) > MAX_DESCRIPTION_WORDS
}

// =========================================================
// 占位操作：后端尚未提供对应接口
// =========================================================

pub fn delete_community(community_id: i64) -> Notice {
    log::info!("delete community requested: {}", community_id);
    Notice::info("Delete functionality will be implemented")
}

pub fn view_user(user_id: i64) {
    log::info!("View user: {}", user_id);
}

pub fn view_community(community_id: i64) {
    log::info!("View community: {}", community_id);
}

pub fn open_settings() -> Notice {
    Notice::info("Settings panel coming soon")
}
