use crate::auth::use_auth;
use leptos::prelude::*;
use leptos::task::spawn_local;
use travel_admin_shared::DashboardStats;

#[component]
pub fn DashboardView() -> impl IntoView {
    let auth = use_auth();
    let stats = RwSignal::new(DashboardStats::default());

    let console = auth.console();
    spawn_local(async move {
        // 未授权时由路由跳转回登录页，这里无需处理
        if let Some(snapshot) = console.load_dashboard().await.ready() {
            stats.set(snapshot);
        }
    });

    let counters: [(&'static str, fn(&DashboardStats) -> u64); 5] = [
        ("Total Users", |s| s.total_users),
        ("Total Posts", |s| s.total_posts),
        ("Total Trips", |s| s.total_trips),
        ("Total Likes", |s| s.total_likes),
        ("Communities", |s| s.total_communities),
    ];

    view! {
        <div class="stats shadow w-full stats-vertical lg:stats-horizontal bg-base-100">
            {counters
                .into_iter()
                .map(|(title, pick)| {
                    view! {
                        <div class="stat">
                            <div class="stat-title">{title}</div>
                            <div class="stat-value text-primary">{move || stats.with(pick)}</div>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}
