//! 管理控制台前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 页面路由定义（领域模型）
//! - `web::router`: 页面路由服务（核心引擎）
//! - `web::view_router`: 控制台内的片段导航
//! - `auth`: 认证状态管理
//! - `components`: UI 组件层
//!
//! 业务逻辑都在 `travel-admin` 核心库中，这里只负责浏览器绑定与渲染。

mod auth;
mod components {
    pub mod communities;
    mod community_dialog;
    pub mod console;
    pub mod dashboard;
    pub mod feedback;
    pub mod login;
    pub mod table;
    pub mod toast;
    pub mod users;
}

use crate::auth::AuthContext;
use crate::components::console::ConsolePage;
use crate::components::login::LoginPage;
use crate::components::toast::{Toast, provide_toast};

use leptos::prelude::*;

// 原生 Web API 封装模块
pub(crate) mod web {
    mod http;
    pub mod route;
    pub mod router;
    mod storage;
    pub mod view_router;

    pub use http::{FetchClient, read_selected_file};
    pub use storage::BrowserStorage;
}

use web::route::AppRoute;
use web::router::{Router, RouterOutlet, use_router};

/// 路由匹配函数
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Console => view! { <ConsolePage /> }.into_any(),
        AppRoute::NotFound => view! { <NotFound /> }.into_any(),
    }
}

#[component]
fn NotFound() -> impl IntoView {
    let router = use_router();
    view! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-error">"404"</h1>
                <p class="text-xl mt-4">"Page not found"</p>
                <button class="btn btn-primary mt-6" on:click=move |_| router.navigate(AppRoute::Console.to_path())>
                    "Go to console"
                </button>
            </div>
        </div>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建认证上下文（从 localStorage 恢复会话）
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);

    // 2. 全局提示，跨页面存活
    provide_toast();

    // 3. 认证状态信号注入路由服务
    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        <Toast />
        <Router is_authenticated=is_authenticated>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
