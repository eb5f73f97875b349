//! 列表视图共用的表格片段

use leptos::prelude::*;
use travel_admin::ListState;

/// 非 Loaded 状态下占满整行的提示
#[component]
pub fn StateRow<T>(state: RwSignal<ListState<T>>, colspan: u8) -> impl IntoView
where
    T: Clone + Send + Sync + 'static,
{
    move || {
        state.with(|s| s.message().map(str::to_string)).map(|msg| {
            let loading = state.with(|s| s.is_loading());
            view! {
                <tr>
                    <td colspan=colspan.to_string() class="text-center py-8 text-base-content/50">
                        {loading.then(|| view! { <span class="loading loading-spinner loading-md"></span> " " })}
                        {msg}
                    </td>
                </tr>
            }
        })
    }
}

/// 静态占位视图（后端尚未提供数据的页面）
#[component]
pub fn PlaceholderTable(
    #[prop(into)] headers: Vec<&'static str>,
    message: &'static str,
) -> impl IntoView {
    let colspan = headers.len();
    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="overflow-x-auto w-full">
                <table class="table table-zebra w-full">
                    <thead>
                        <tr>{headers.into_iter().map(|h| view! { <th>{h}</th> }).collect_view()}</tr>
                    </thead>
                    <tbody>
                        <tr>
                            <td colspan=colspan.to_string() class="text-center py-8 text-base-content/50">{message}</td>
                        </tr>
                    </tbody>
                </table>
            </div>
        </div>
    }
}
