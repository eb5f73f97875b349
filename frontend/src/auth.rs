//! 认证模块
//!
//! 持有控制台门面，并把会话门禁的状态镜像到 Leptos 信号中。
//! 路由服务通过注入的认证信号检查认证状态，与本模块解耦。

use std::rc::Rc;

use crate::web::BrowserStorage;
use crate::web::FetchClient;
use leptos::prelude::*;
use travel_admin::{AdminApi, AdminConsole, ConsoleConfig, KeyValueStore, LoginError, Session, SessionGate};
use travel_admin_shared::{AdminUser, KEY_API_ORIGIN};

/// 浏览器中的控制台门面
pub type Console = AdminConsole<FetchClient, BrowserStorage>;

/// 认证上下文
///
/// 会话信号只由门禁的观察者写入，组件只读。
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 当前会话（只读）
    pub session: ReadSignal<Option<Session>>,
    set_session: WriteSignal<Option<Session>>,
    /// 当前使用的后端地址（用于 UI 显示和自动填充）
    pub api_origin: RwSignal<String>,
    console: StoredValue<Rc<Console>, LocalStorage>,
}

impl AuthContext {
    /// 创建认证上下文，并从 localStorage 恢复会话与后端地址
    pub fn new() -> Self {
        let stored = BrowserStorage.get(KEY_API_ORIGIN);
        let config = ConsoleConfig::resolve(stored.as_deref());
        let (session, set_session) = signal(None);

        Self {
            session,
            set_session,
            api_origin: RwSignal::new(config.api_origin().to_string()),
            console: StoredValue::new_local(build_console(config, set_session)),
        }
    }

    pub fn console(&self) -> Rc<Console> {
        self.console.get_value()
    }

    /// 认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let session = self.session;
        Signal::derive(move || session.with(|s| s.is_some()))
    }

    pub fn user(&self) -> Option<AdminUser> {
        self.session.with(|s| s.as_ref().and_then(|s| s.user.clone()))
    }

    /// 切换后端地址
    ///
    /// 地址会被记住以便下次自动填充；变化时重建门面。
    pub fn set_api_origin(&self, origin: &str) {
        let config = ConsoleConfig::new(origin);
        if config.api_origin() == self.api_origin.get_untracked() {
            return;
        }
        BrowserStorage.set(KEY_API_ORIGIN, config.api_origin());
        log::info!("API origin set to {}", config.api_origin());
        self.api_origin.set(config.api_origin().to_string());
        self.console
            .set_value(build_console(config, self.set_session));
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<(), LoginError> {
        self.console().login(email, password).await.map(|_| ())
    }

    #[cfg(feature = "dev-bypass")]
    pub fn bypass(&self) {
        self.console().session().bypass();
    }

    /// 注销
    ///
    /// 不需要手动导航，路由服务会监听认证状态变化并自动重定向。
    pub fn logout(&self) {
        self.console().logout();
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

fn build_console(config: ConsoleConfig, set_session: WriteSignal<Option<Session>>) -> Rc<Console> {
    let gate = SessionGate::new(BrowserStorage);
    set_session.set(gate.current());
    gate.subscribe(move |s| set_session.set(s.cloned()));
    Rc::new(AdminConsole::new(AdminApi::new(FetchClient, config), gate))
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}
