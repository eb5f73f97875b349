use crate::auth::use_auth;
use crate::components::communities::CommunitiesView;
use crate::components::dashboard::DashboardView;
use crate::components::feedback::FeedbackView;
use crate::components::table::PlaceholderTable;
use crate::components::toast::use_toast;
use crate::components::users::UsersView;
use crate::web::view_router::provide_view_navigator;
use leptos::prelude::*;
use travel_admin::View;
use travel_admin::actions::open_settings;

/// 视图出口
///
/// 读取 `visit` 使重复点击同一导航项时整个视图重建并重新加载。
fn render_view(view: View) -> AnyView {
    match view {
        View::Dashboard => view! { <DashboardView /> }.into_any(),
        View::Users => view! { <UsersView /> }.into_any(),
        View::Communities => view! { <CommunitiesView /> }.into_any(),
        View::Feedback => view! { <FeedbackView /> }.into_any(),
        View::Posts => view! {
            <PlaceholderTable
                headers=vec!["ID", "Author", "Content", "Likes", "Created", "Actions"]
                message=view.placeholder().unwrap_or_default()
            />
        }
        .into_any(),
        View::Trips => view! {
            <PlaceholderTable
                headers=vec!["ID", "Owner", "Destination", "Dates", "Created", "Actions"]
                message=view.placeholder().unwrap_or_default()
            />
        }
        .into_any(),
        View::Analytics => view! {
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body items-center text-base-content/50">
                    {view.placeholder().unwrap_or_default()}
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn ConsolePage() -> impl IntoView {
    let auth = use_auth();
    // 没有会话时不初始化任何视图，由路由守卫跳转到登录页
    if let Err(e) = auth.console().session().require_session() {
        log::warn!("[Console] {}", e);
        return ().into_any();
    }
    let toast = use_toast();
    let nav = provide_view_navigator();

    let user_name = move || {
        auth.user()
            .and_then(|u| u.display_name().map(str::to_string))
            .unwrap_or_else(|| "Admin".to_string())
    };
    let user_initial = move || {
        auth.user()
            .and_then(|u| u.initial())
            .unwrap_or_else(|| "A".to_string())
    };

    view! {
        <div class="drawer lg:drawer-open min-h-screen bg-base-200">
            <input id="console-drawer" type="checkbox" class="drawer-toggle" />
            <div class="drawer-content flex flex-col">
                <div class="navbar bg-base-100 shadow">
                    <div class="flex-1 gap-2">
                        <label for="console-drawer" class="btn btn-ghost btn-square lg:hidden">"☰"</label>
                        <h2 class="text-xl font-bold px-2">{move || nav.active().title()}</h2>
                    </div>
                    <div class="flex-none gap-2">
                        <button class="btn btn-ghost btn-sm" on:click=move |_| toast.show(open_settings())>
                            "Settings"
                        </button>
                        <div class="flex items-center gap-2">
                            <div class="avatar placeholder">
                                <div class="bg-neutral text-neutral-content w-8 rounded-full">
                                    <span>{user_initial}</span>
                                </div>
                            </div>
                            <span class="hidden md:inline">{user_name}</span>
                        </div>
                        <button on:click=move |_| auth.logout() class="btn btn-outline btn-error btn-sm">
                            "Logout"
                        </button>
                    </div>
                </div>

                <main class="p-4 md:p-8">
                    {move || {
                        nav.visit();
                        render_view(nav.active())
                    }}
                </main>
            </div>

            <div class="drawer-side">
                <label for="console-drawer" class="drawer-overlay"></label>
                <ul class="menu bg-base-100 min-h-full w-60 p-4">
                    <li class="menu-title">"Admin Console"</li>
                    {View::ALL
                        .into_iter()
                        .map(|v| {
                            view! {
                                <li>
                                    <a
                                        href=format!("#{}", v.name())
                                        class=move || if nav.is_active(v) { "active" } else { "" }
                                        on:click=move |ev| {
                                            ev.prevent_default();
                                            nav.select(v);
                                        }
                                    >
                                        {v.title()}
                                    </a>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
            </div>
        </div>
    }
    .into_any()
}
