use crate::auth::use_auth;
use crate::components::table::StateRow;
use crate::components::toast::use_toast;
use leptos::prelude::*;
use leptos::task::spawn_local;
use travel_admin::ListState;
use travel_admin_shared::date::{format_date, format_date_time};
use travel_admin_shared::text::truncate;
use travel_admin_shared::{FeedbackItem, FeedbackKind, FeedbackStatus};

fn status_badge(status: Option<&FeedbackStatus>) -> (&'static str, String) {
    match status {
        Some(FeedbackStatus::Resolved) => ("badge badge-success", "resolved".to_string()),
        Some(FeedbackStatus::Rejected) => ("badge badge-error", "rejected".to_string()),
        Some(other) => ("badge badge-ghost", other.as_str().to_string()),
        None => ("badge badge-ghost", "Pending".to_string()),
    }
}

/// 反馈与功能请求两个子列表共用一个视图
#[component]
pub fn FeedbackView() -> impl IntoView {
    let auth = use_auth();
    let toast = use_toast();
    let kind = RwSignal::new(FeedbackKind::Feedback);
    let state = RwSignal::new(ListState::<FeedbackItem>::Loading);
    let detail = RwSignal::new(Option::<FeedbackItem>::None);

    let load = move |next_kind: FeedbackKind| {
        kind.set(next_kind);
        state.set(ListState::Loading);
        let console = auth.console();
        spawn_local(async move {
            if let Some(next) = console.load_feedback(next_kind).await.ready() {
                // 加载期间切换了子列表，丢弃过期结果
                if kind.get_untracked() == next_kind {
                    state.set(next);
                }
            }
        });
    };
    load(FeedbackKind::Feedback);

    let toggle_status = move |id: i64, current: FeedbackStatus| {
        let console = auth.console();
        spawn_local(async move {
            let result = console
                .update_feedback_status(id, &current, || kind.get_untracked())
                .await;
            match result {
                Ok((reloaded, next)) => {
                    if kind.get_untracked() == reloaded {
                        state.set(next);
                    }
                }
                Err(e) => toast.show(e.into()),
            }
        });
    };

    let view_detail = move |id: i64| {
        let console = auth.console();
        spawn_local(async move {
            match console.view_feedback(id).await {
                Ok(item) => detail.set(Some(item)),
                Err(e) => toast.show(e.into()),
            }
        });
    };

    let tab_class = move |k: FeedbackKind| {
        if kind.get() == k { "tab tab-active" } else { "tab" }
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div role="tablist" class="tabs tabs-boxed m-4 w-fit">
                <a role="tab" class=move || tab_class(FeedbackKind::Feedback)
                    on:click=move |_| load(FeedbackKind::Feedback)>"Feedback"</a>
                <a role="tab" class=move || tab_class(FeedbackKind::FeatureRequest)
                    on:click=move |_| load(FeedbackKind::FeatureRequest)>"Feature Requests"</a>
            </div>
            <div class="overflow-x-auto w-full">
                <table class="table table-zebra w-full">
                    <thead>
                        <tr>
                            <th>"ID"</th>
                            <th>"User"</th>
                            <th>"Description"</th>
                            <th>"Created"</th>
                            <th>"Status"</th>
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <StateRow state=state colspan=6 />
                        <For
                            each=move || state.with(|s| s.rows().to_vec())
                            key=|item| (item.id, item.status.clone())
                            children=move |item| {
                                let id = item.id;
                                let current = item.current_status();
                                let action = current.action_label();
                                let (badge, label) = status_badge(item.status.as_ref());
                                view! {
                                    <tr>
                                        <td>{id}</td>
                                        <td>{format!("User #{}", item.user_id)}</td>
                                        <td>{truncate(item.description.as_deref(), 100)}</td>
                                        <td>{format_date(item.created_at.as_deref())}</td>
                                        <td><span class=badge>{label}</span></td>
                                        <td class="flex gap-2">
                                            <button class="btn btn-ghost btn-xs" on:click=move |_| view_detail(id)>
                                                "View"
                                            </button>
                                            <button class="btn btn-outline btn-xs" on:click=move |_| toggle_status(id, current.clone())>
                                                {action}
                                            </button>
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </div>
        </div>
        <FeedbackDetail detail=detail />
    }
}

/// 单条反馈详情
#[component]
fn FeedbackDetail(detail: RwSignal<Option<FeedbackItem>>) -> impl IntoView {
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if detail.with(|d| d.is_some()) {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| detail.set(None)>
            <div class="modal-box">
                {move || detail.get().map(|item| {
                    let kind = item.feedback_type.map(|k| k.query_value()).unwrap_or("N/A");
                    let status = item
                        .status
                        .as_ref()
                        .map(|s| s.as_str().to_string())
                        .unwrap_or_else(|| "N/A".to_string());
                    view! {
                        <h3 class="font-bold text-lg">{format!("Feedback #{}", item.id)}</h3>
                        <dl class="grid grid-cols-[auto_1fr] gap-x-4 gap-y-1 py-4 text-sm">
                            <dt class="font-semibold">"User ID"</dt><dd>{item.user_id}</dd>
                            <dt class="font-semibold">"Type"</dt><dd>{kind}</dd>
                            <dt class="font-semibold">"Status"</dt><dd>{status}</dd>
                            <dt class="font-semibold">"Created"</dt>
                            <dd>{format_date_time(item.created_at.as_deref())}</dd>
                        </dl>
                        <p class="whitespace-pre-wrap">{item.description.unwrap_or_default()}</p>
                    }
                })}
                <div class="modal-action">
                    <button class="btn" on:click=move |_| detail.set(None)>"Close"</button>
                </div>
            </div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>
    }
}
