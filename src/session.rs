//! 会话门禁
//!
//! `SessionGate` 是会话状态的唯一写入者：登录、登出、强制登出都经过这里，
//! 并同步写入持久化存储。界面层通过 `subscribe` 注册观察者来镜像状态。

use std::cell::RefCell;
use std::collections::HashMap;

use thiserror::Error;
use travel_admin_shared::{
    AdminUser, KEY_BYPASS, KEY_LOGGED_IN, KEY_TOKEN, KEY_USER, LoginRequest, LoginResponse,
};

use crate::api::AdminApi;
use crate::error::{ApiError, LoginError, ValidationError};
use crate::request::HttpClient;

const FLAG_TRUE: &str = "true";
const INVALID_CREDENTIALS: &str = "Invalid credentials. Please try again.";

/// 持久化键值存储
///
/// 浏览器中对应 `localStorage`，测试中使用 `MemoryStore`。
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    /// 返回操作是否成功
    fn set(&self, key: &str, value: &str) -> bool;
    /// 返回操作是否成功
    fn remove(&self, key: &str) -> bool;
}

/// 内存存储
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn remove(&self, key: &str) -> bool {
        self.entries.borrow_mut().remove(key);
        true
    }
}

/// 已认证的会话
///
/// 未认证状态用 `Option<Session>` 的 `None` 表示。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    /// bypass 会话没有 token
    pub token: Option<String>,
    pub user: Option<AdminUser>,
    /// 未经后端校验进入的会话
    pub bypass: bool,
}

/// 访问需要会话的页面但当前未登录
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("an authenticated session is required")]
pub struct SessionRequired;

type Observer = Box<dyn Fn(Option<&Session>)>;

pub struct SessionGate<S> {
    store: S,
    current: RefCell<Option<Session>>,
    observers: RefCell<Vec<Observer>>,
}

impl<S: KeyValueStore> SessionGate<S> {
    /// 创建门禁并从存储中恢复上一次的会话
    pub fn new(store: S) -> Self {
        let current = restore(&store);
        if current.is_some() {
            log::info!("restored session from storage");
        }
        Self {
            store,
            current: RefCell::new(current),
            observers: RefCell::new(Vec::new()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn current(&self) -> Option<Session> {
        self.current.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.borrow().is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.current
            .borrow()
            .as_ref()
            .and_then(|s| s.token.clone())
    }

    /// 当前会话是否为未经后端校验的 bypass 会话
    pub fn is_bypass(&self) -> bool {
        self.current.borrow().as_ref().is_some_and(|s| s.bypass)
    }

    /// 注册状态观察者，每次会话变化时调用
    pub fn subscribe(&self, observer: impl Fn(Option<&Session>) + 'static) {
        self.observers.borrow_mut().push(Box::new(observer));
    }

    /// 需要认证的页面在任何初始化之前调用
    pub fn require_session(&self) -> Result<Session, SessionRequired> {
        self.current().ok_or(SessionRequired)
    }

    /// 登录握手
    ///
    /// 成功后写入 token、登录标记和用户资料；失败时返回后端消息或通用提示。
    pub async fn login<C: HttpClient>(
        &self,
        api: &AdminApi<C>,
        email: &str,
        password: &str,
    ) -> Result<Session, LoginError> {
        if email.is_empty() || password.is_empty() {
            return Err(ValidationError::MissingCredentials.into());
        }

        let req = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        match api.send(&req, None).await {
            Ok(resp) => {
                log::info!("login succeeded for {}", email);
                Ok(self.establish(resp))
            }
            Err(e) if e.is_connectivity() => {
                log::error!("login error: {}", e);
                Err(LoginError::Network)
            }
            Err(e) => {
                log::warn!("login rejected: {}", e);
                Err(LoginError::Rejected(
                    e.detail().unwrap_or(INVALID_CREDENTIALS).to_string(),
                ))
            }
        }
    }

    fn establish(&self, resp: LoginResponse) -> Session {
        self.store.set(KEY_TOKEN, &resp.access_token);
        self.store.set(KEY_LOGGED_IN, FLAG_TRUE);
        self.store.remove(KEY_BYPASS);
        if let Some(user) = &resp.user {
            match serde_json::to_string(user) {
                Ok(json) => {
                    self.store.set(KEY_USER, &json);
                }
                Err(e) => log::error!("failed to persist user profile: {}", e),
            }
        }

        let session = Session {
            token: Some(resp.access_token),
            user: resp.user,
            bypass: false,
        };
        self.replace(Some(session.clone()));
        session
    }

    /// 跳过后端校验直接进入控制台
    #[cfg(feature = "dev-bypass")]
    pub fn bypass(&self) -> Session {
        log::warn!("entering bypass session without backend validation");
        self.store.set(KEY_LOGGED_IN, FLAG_TRUE);
        self.store.set(KEY_BYPASS, FLAG_TRUE);
        let session = Session {
            token: None,
            user: None,
            bypass: true,
        };
        self.replace(Some(session.clone()));
        session
    }

    /// 清除全部会话状态
    pub fn logout(&self) {
        for key in [KEY_LOGGED_IN, KEY_TOKEN, KEY_BYPASS, KEY_USER] {
            self.store.remove(key);
        }
        if self.is_authenticated() {
            log::info!("session cleared");
        }
        self.replace(None);
    }

    /// 收到未授权响应时调用
    pub(crate) fn on_api_error(&self, err: &ApiError) {
        if err.is_unauthorized() {
            log::warn!("forcing logout: {}", err);
            self.logout();
        }
    }

    fn replace(&self, next: Option<Session>) {
        *self.current.borrow_mut() = next;
        let snapshot = self.current();
        for observer in self.observers.borrow().iter() {
            observer(snapshot.as_ref());
        }
    }
}

fn restore<S: KeyValueStore>(store: &S) -> Option<Session> {
    if store.get(KEY_LOGGED_IN).as_deref() != Some(FLAG_TRUE) {
        return None;
    }
    let user = store
        .get(KEY_USER)
        .and_then(|raw| match serde_json::from_str::<AdminUser>(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                log::error!("ignoring unreadable stored user profile: {}", e);
                None
            }
        });
    Some(Session {
        token: store.get(KEY_TOKEN),
        user,
        bypass: store.get(KEY_BYPASS).as_deref() == Some(FLAG_TRUE),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConsoleConfig;
    use crate::request::MockHttpClient;
    use serde_json::json;
    use std::rc::Rc;

    const LOGIN_URL: &str = "http://localhost:8000/api/v1/admin/login";

    fn api() -> AdminApi<MockHttpClient> {
        AdminApi::new(MockHttpClient::new(), ConsoleConfig::default())
    }

    #[test]
    fn anonymous_without_logged_in_flag() {
        let store = MemoryStore::new();
        store.set(KEY_TOKEN, "stale");
        let gate = SessionGate::new(store);
        assert!(!gate.is_authenticated());
        assert_eq!(gate.require_session(), Err(SessionRequired));
    }

    #[test]
    fn restores_persisted_session() {
        let store = MemoryStore::new();
        store.set(KEY_LOGGED_IN, "true");
        store.set(KEY_TOKEN, "tok");
        store.set(KEY_USER, r#"{"username":"root","nickname":"Ops"}"#);
        let gate = SessionGate::new(store);

        let session = gate.require_session().unwrap();
        assert_eq!(session.token.as_deref(), Some("tok"));
        assert_eq!(session.user.unwrap().display_name(), Some("Ops"));
        assert!(!session.bypass);
    }

    #[test]
    fn unreadable_profile_does_not_void_session() {
        let store = MemoryStore::new();
        store.set(KEY_LOGGED_IN, "true");
        store.set(KEY_USER, "{not json");
        let gate = SessionGate::new(store);
        let session = gate.current().unwrap();
        assert!(session.user.is_none());
    }

    #[tokio::test]
    async fn login_stores_returned_token_and_profile() {
        let api = api();
        api.client().mock_response(
            LOGIN_URL,
            200,
            json!({ "access_token": "jwt-1", "user": { "username": "admin" } }),
        );
        let gate = SessionGate::new(MemoryStore::new());

        let session = gate.login(&api, "a@b.c", "secret").await.unwrap();
        assert_eq!(session.token.as_deref(), Some("jwt-1"));
        assert_eq!(gate.store().get(KEY_TOKEN).as_deref(), Some("jwt-1"));
        assert_eq!(gate.store().get(KEY_LOGGED_IN).as_deref(), Some("true"));
        assert!(gate.store().get(KEY_USER).unwrap().contains("admin"));

        let sent = api.client().sent_to(LOGIN_URL);
        assert_eq!(
            sent[0].body,
            crate::request::RequestBody::Json(json!({ "email": "a@b.c", "password": "secret" }))
        );
    }

    #[tokio::test]
    async fn login_requires_both_fields() {
        let api = api();
        let gate = SessionGate::new(MemoryStore::new());
        let err = gate.login(&api, "a@b.c", "").await.unwrap_err();
        assert_eq!(err, LoginError::Validation(ValidationError::MissingCredentials));
        assert!(api.client().requests.borrow().is_empty());
    }

    #[tokio::test]
    async fn login_surfaces_backend_detail_or_generic_message() {
        let api = api();
        let gate = SessionGate::new(MemoryStore::new());

        api.client().mock_response(
            LOGIN_URL,
            401,
            json!({ "detail": "Incorrect email or password" }),
        );
        let err = gate.login(&api, "a@b.c", "bad").await.unwrap_err();
        assert_eq!(err.to_string(), "Incorrect email or password");

        api.client().mock_response(LOGIN_URL, 500, json!({}));
        let err = gate.login(&api, "a@b.c", "bad").await.unwrap_err();
        assert_eq!(err.to_string(), INVALID_CREDENTIALS);

        api.client().mock_network_failure(LOGIN_URL);
        let err = gate.login(&api, "a@b.c", "bad").await.unwrap_err();
        assert_eq!(err, LoginError::Network);
        assert!(!gate.is_authenticated());
    }

    #[tokio::test]
    async fn logout_clears_everything_and_notifies() {
        let api = api();
        api.client()
            .mock_response(LOGIN_URL, 200, json!({ "access_token": "jwt-1", "user": {} }));
        let gate = SessionGate::new(MemoryStore::new());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        gate.subscribe(move |s| sink.borrow_mut().push(s.is_some()));

        gate.login(&api, "a@b.c", "pw").await.unwrap();
        gate.logout();

        assert_eq!(*seen.borrow(), vec![true, false]);
        for key in [KEY_LOGGED_IN, KEY_TOKEN, KEY_BYPASS, KEY_USER] {
            assert_eq!(gate.store().get(key), None, "{} should be cleared", key);
        }
    }

    #[cfg(feature = "dev-bypass")]
    #[test]
    fn bypass_marks_session_without_token() {
        let gate = SessionGate::new(MemoryStore::new());
        let session = gate.bypass();
        assert!(session.bypass);
        assert!(session.token.is_none());
        assert_eq!(gate.store().get(KEY_BYPASS).as_deref(), Some("true"));
    }
}
