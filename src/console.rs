//! 控制台门面
//!
//! 把 API 客户端与会话门禁组合在一起。所有后端调用都经过 `call`，
//! 因此 401/403 的强制登出策略只在这一处实现。

use serde::de::DeserializeOwned;
use travel_admin_shared::protocol::{
    ApiRequest, CreateCommunityRequest, DashboardStatsRequest, GetFeedbackRequest,
    ListCommunitiesRequest, ListFeedbackRequest, ListUsersRequest, SetUserActiveRequest,
    UpdateFeedbackStatusRequest, Upload,
};
use travel_admin_shared::{
    Community, DashboardStats, FeedbackItem, FeedbackKind, FeedbackStatus, User,
};

use crate::actions::{Action, validate_community};
use crate::api::AdminApi;
use crate::error::{ActionError, ApiError, LoginError};
use crate::loaders::{ListResource, ListState, LoadOutcome};
use crate::request::HttpClient;
use crate::session::{KeyValueStore, Session, SessionGate};

pub struct AdminConsole<C, S> {
    api: AdminApi<C>,
    session: SessionGate<S>,
}

impl<C: HttpClient, S: KeyValueStore> AdminConsole<C, S> {
    pub fn new(api: AdminApi<C>, session: SessionGate<S>) -> Self {
        Self { api, session }
    }

    pub fn api(&self) -> &AdminApi<C> {
        &self.api
    }

    pub fn session(&self) -> &SessionGate<S> {
        &self.session
    }

    // =========================================================
    // 会话
    // =========================================================

    pub async fn login(&self, email: &str, password: &str) -> Result<Session, LoginError> {
        self.session.login(&self.api, email, password).await
    }

    pub fn logout(&self) {
        self.session.logout();
    }

    /// 带 token 发送请求；未授权时强制登出
    async fn call<R: ApiRequest>(&self, req: &R) -> Result<R::Response, ApiError> {
        let token = self.session.token();
        let result = self.api.send(req, token.as_deref()).await;
        self.settle(result)
    }

    /// 视图加载使用的调用
    ///
    /// bypass 会话没有 token，加载请求照常发出但不带 `Authorization` 头；
    /// 其余情况与 `call` 相同。
    async fn read<R: ApiRequest>(&self, req: &R) -> Result<R::Response, ApiError> {
        let token = self.session.token();
        let result = if token.is_none() && self.session.is_bypass() {
            self.api.send_without_token_check(req, None).await
        } else {
            self.api.send(req, token.as_deref()).await
        };
        self.settle(result)
    }

    fn settle<T>(&self, result: Result<T, ApiError>) -> Result<T, ApiError> {
        if let Err(e) = &result {
            self.session.on_api_error(e);
        }
        result
    }

    // =========================================================
    // 视图加载器
    // =========================================================

    /// 仪表盘统计；非授权类失败时返回全零快照
    pub async fn load_dashboard(&self) -> LoadOutcome<DashboardStats> {
        match self.read(&DashboardStatsRequest).await {
            Ok(stats) => LoadOutcome::Ready(stats),
            Err(e) if e.is_unauthorized() => LoadOutcome::SignedOut,
            Err(e) => {
                log::error!("Failed to load dashboard stats: {}", e);
                LoadOutcome::Ready(DashboardStats::default())
            }
        }
    }

    pub async fn load_users(&self) -> LoadOutcome<ListState<User>> {
        self.load_list(&ListUsersRequest::default(), ListResource::Users)
            .await
    }

    pub async fn load_communities(&self) -> LoadOutcome<ListState<Community>> {
        self.load_list(&ListCommunitiesRequest::default(), ListResource::Communities)
            .await
    }

    pub async fn load_feedback(&self, kind: FeedbackKind) -> LoadOutcome<ListState<FeedbackItem>> {
        self.load_list(&ListFeedbackRequest::new(kind), ListResource::Feedback(kind))
            .await
    }

    async fn load_list<R, T>(&self, req: &R, resource: ListResource) -> LoadOutcome<ListState<T>>
    where
        R: ApiRequest<Response = Vec<T>>,
        T: DeserializeOwned,
    {
        match self.read(req).await {
            Err(e) if e.is_unauthorized() => LoadOutcome::SignedOut,
            result => LoadOutcome::Ready(resource.settle(result)),
        }
    }

    // =========================================================
    // 变更操作
    // =========================================================

    /// 激活或停用用户，成功后重新加载用户列表
    pub async fn toggle_user_status(
        &self,
        user_id: i64,
        make_active: bool,
    ) -> Result<ListState<User>, ActionError> {
        let req = SetUserActiveRequest {
            user_id,
            active: make_active,
        };
        self.call(&req)
            .await
            .map_err(|e| Action::ToggleUserStatus.fail(e))?;
        log::info!("user {} active={}", user_id, make_active);
        reloaded(self.load_users().await)
    }

    /// 校验并创建社区，成功后重新加载社区列表
    ///
    /// 校验失败时不会发出任何请求。
    pub async fn create_community(
        &self,
        name: &str,
        description: &str,
        photo: Option<Upload>,
    ) -> Result<ListState<Community>, ActionError> {
        let draft = validate_community(name, description)?;
        let req = CreateCommunityRequest {
            name: draft.name,
            description: draft.description,
            photo,
        };
        let created = self
            .call(&req)
            .await
            .map_err(|e| Action::CreateCommunity.fail(e))?;
        log::info!("community created: {} ({})", created.name, created.id);
        reloaded(self.load_communities().await)
    }

    /// 在 resolved 与 pending 之间切换，成功后重新加载当前可见的子列表
    ///
    /// `visible` 在更新完成之后才读取：等待期间用户可能已经切换了子列表。
    /// 返回实际重新加载的子列表及其状态。
    pub async fn update_feedback_status(
        &self,
        feedback_id: i64,
        current: &FeedbackStatus,
        visible: impl FnOnce() -> FeedbackKind,
    ) -> Result<(FeedbackKind, ListState<FeedbackItem>), ActionError> {
        let req = UpdateFeedbackStatusRequest {
            id: feedback_id,
            status: current.toggled(),
        };
        self.call(&req)
            .await
            .map_err(|e| Action::UpdateFeedbackStatus.fail(e))?;
        log::info!("feedback {} -> {}", feedback_id, req.status.as_str());
        let kind = visible();
        reloaded(self.load_feedback(kind).await).map(|state| (kind, state))
    }

    /// 读取单条反馈的完整记录
    pub async fn view_feedback(&self, feedback_id: i64) -> Result<FeedbackItem, ActionError> {
        self.call(&GetFeedbackRequest { id: feedback_id })
            .await
            .map_err(|e| Action::ViewFeedback.fail(e))
    }
}

fn reloaded<T>(outcome: LoadOutcome<ListState<T>>) -> Result<ListState<T>, ActionError> {
    outcome.ready().ok_or(ActionError::SessionExpired)
}

#[cfg(test)]
mod tests;
