//! 错误分类
//!
//! - `ValidationError`: 请求发出前的客户端校验失败
//! - `ApiError`: 一次后端调用的结果分类（未授权 / 后端报错 / 网络 / 解析）
//! - `LoginError` / `ActionError`: 面向用户的最终消息

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter both email and password")]
    MissingCredentials,
    #[error("Community name must start with \"q/\"")]
    CommunityNamePrefix,
    #[error("Description must not exceed 35 words. Current: {words} words")]
    DescriptionTooLong { words: usize },
    #[error("Description is required")]
    DescriptionRequired,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// 401 / 403，任何调用收到都会强制登出
    #[error("unauthorized (HTTP {status})")]
    Unauthorized { status: u16, detail: Option<String> },
    /// 需要认证的请求在本地没有 token，请求不会发出
    #[error("no bearer token stored")]
    MissingToken,
    /// 其它非 2xx 响应，`detail` 取自响应体
    #[error("backend returned HTTP {status}")]
    Backend { status: u16, detail: Option<String> },
    #[error("network error: {0}")]
    Network(String),
    /// 2xx 响应体无法解析
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. } | ApiError::MissingToken)
    }

    /// 后端给出的 detail（如果有）
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { detail, .. } | ApiError::Backend { detail, .. } => {
                detail.as_deref()
            }
            _ => None,
        }
    }

    /// 网络不可达或响应无法解析，统一按连接问题提示
    pub fn is_connectivity(&self) -> bool {
        matches!(self, ApiError::Network(_) | ApiError::Decode(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// 后端拒绝登录，携带后端消息或通用提示
    #[error("{0}")]
    Rejected(String),
    #[error("Login failed. Please check your connection and try again.")]
    Network,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// 会话已被清除，界面会跳回登录页
    #[error("Session expired. Please login again.")]
    SessionExpired,
    /// 本地没有 token，请求未发出，会话同样被清除
    #[error("Not authenticated. Please login again.")]
    NotAuthenticated,
    #[error("{0}")]
    Failed(String),
    #[error("{0}")]
    Network(String),
}
