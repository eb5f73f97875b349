//! 视图数据加载器的显式状态
//!
//! 每个列表视图都在这四种状态之间切换；占位文案由资源类型决定。

use travel_admin_shared::FeedbackKind;

use crate::error::ApiError;

/// 列表视图的渲染状态
#[derive(Debug, Clone, PartialEq)]
pub enum ListState<T> {
    Loading,
    /// 请求成功但没有记录
    Empty(String),
    Loaded(Vec<T>),
    /// 行内错误消息
    Failed(String),
}

impl<T> ListState<T> {
    /// 非数据状态下表格中显示的单行消息
    pub fn message(&self) -> Option<&str> {
        match self {
            ListState::Loading => Some("Loading..."),
            ListState::Empty(msg) | ListState::Failed(msg) => Some(msg.as_str()),
            ListState::Loaded(_) => None,
        }
    }

    pub fn rows(&self) -> &[T] {
        match self {
            ListState::Loaded(rows) => rows,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ListState::Loading)
    }
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        ListState::Loading
    }
}

/// 加载结果：要么得到可渲染的状态，要么会话已被清除
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome<T> {
    Ready(T),
    SignedOut,
}

impl<T> LoadOutcome<T> {
    pub fn ready(self) -> Option<T> {
        match self {
            LoadOutcome::Ready(value) => Some(value),
            LoadOutcome::SignedOut => None,
        }
    }
}

/// 列表资源，决定各种占位与错误文案
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListResource {
    Users,
    Communities,
    Feedback(FeedbackKind),
}

impl ListResource {
    pub fn empty_message(&self) -> String {
        match self {
            ListResource::Users => "No users found".to_string(),
            ListResource::Communities => "No communities found".to_string(),
            ListResource::Feedback(kind) => format!("No {} found", kind.plural_label()),
        }
    }

    pub fn failure_message(&self, detail: Option<&str>) -> String {
        let detail = detail.unwrap_or("Unknown error");
        match self {
            ListResource::Users => format!("Failed to load users: {}", detail),
            _ => format!("Failed to load: {}", detail),
        }
    }

    pub fn connectivity_message(&self) -> &'static str {
        match self {
            ListResource::Users => "Error loading users. Please check your connection.",
            ListResource::Communities => {
                "Error loading communities. Please check your connection."
            }
            ListResource::Feedback(_) => "Error loading data. Please check your connection.",
        }
    }

    /// 把一次列表请求的结果折叠成视图状态
    ///
    /// 未授权的结果由调用方在此之前处理。
    pub fn settle<T>(&self, result: Result<Vec<T>, ApiError>) -> ListState<T> {
        match result {
            Ok(rows) if rows.is_empty() => ListState::Empty(self.empty_message()),
            Ok(rows) => ListState::Loaded(rows),
            Err(e) if e.is_connectivity() => {
                log::error!("error loading {:?}: {}", self, e);
                ListState::Failed(self.connectivity_message().to_string())
            }
            Err(e) => ListState::Failed(self.failure_message(e.detail())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_per_resource() {
        let feature = ListResource::Feedback(FeedbackKind::FeatureRequest);
        assert_eq!(feature.empty_message(), "No feature requests found");
        assert_eq!(
            ListResource::Feedback(FeedbackKind::Feedback).empty_message(),
            "No feedback found"
        );
        assert_eq!(
            ListResource::Users.failure_message(None),
            "Failed to load users: Unknown error"
        );
        assert_eq!(
            ListResource::Communities.failure_message(Some("boom")),
            "Failed to load: boom"
        );
    }

    #[test]
    fn settle_maps_each_outcome() {
        let users = ListResource::Users;
        assert_eq!(
            users.settle::<u8>(Ok(vec![])),
            ListState::Empty("No users found".into())
        );
        assert_eq!(users.settle(Ok(vec![1u8])), ListState::Loaded(vec![1]));
        assert_eq!(
            users.settle::<u8>(Err(ApiError::Network("dns".into()))),
            ListState::Failed("Error loading users. Please check your connection.".into())
        );
        assert_eq!(
            users.settle::<u8>(Err(ApiError::Backend {
                status: 500,
                detail: Some("db down".into())
            })),
            ListState::Failed("Failed to load users: db down".into())
        );
    }

    #[test]
    fn loading_state_has_placeholder_text() {
        let state: ListState<u8> = ListState::default();
        assert!(state.is_loading());
        assert_eq!(state.message(), Some("Loading..."));
        assert!(state.rows().is_empty());
    }
}
