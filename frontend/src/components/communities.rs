use crate::auth::use_auth;
use crate::components::community_dialog::CommunityDialog;
use crate::components::table::StateRow;
use crate::components::toast::use_toast;
use leptos::prelude::*;
use leptos::task::spawn_local;
use travel_admin::ListState;
use travel_admin::actions::{DELETE_COMMUNITY_CONFIRM, delete_community, view_community};
use travel_admin_shared::Community;
use travel_admin_shared::date::format_date;
use travel_admin_shared::text::truncate;

#[component]
pub fn CommunitiesView() -> impl IntoView {
    let auth = use_auth();
    let toast = use_toast();
    let state = RwSignal::new(ListState::<Community>::Loading);

    let console = auth.console();
    spawn_local(async move {
        if let Some(next) = console.load_communities().await.ready() {
            state.set(next);
        }
    });

    let on_delete = move |id: i64| {
        let confirmed = window()
            .confirm_with_message(DELETE_COMMUNITY_CONFIRM)
            .unwrap_or(false);
        if confirmed {
            toast.show(delete_community(id));
        }
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="flex items-center justify-end p-4 pb-0">
                <CommunityDialog on_created={move |next: ListState<Community>| state.set(next)} />
            </div>
            <div class="overflow-x-auto w-full">
                <table class="table table-zebra w-full">
                    <thead>
                        <tr>
                            <th>"ID"</th>
                            <th>"Name"</th>
                            <th>"Description"</th>
                            <th>"Created By"</th>
                            <th>"Created"</th>
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <StateRow state=state colspan=6 />
                        <For
                            each=move || state.with(|s| s.rows().to_vec())
                            key=|c| c.id
                            children=move |community| {
                                let id = community.id;
                                view! {
                                    <tr>
                                        <td>{id}</td>
                                        <td>
                                            <span class="font-mono">{community.name}</span>
                                            {community.is_admin_created.then(|| view! {
                                                <span class="badge badge-primary badge-sm ml-2" title="Admin Verified">"✓"</span>
                                            })}
                                        </td>
                                        <td>{truncate(community.description.as_deref(), 80)}</td>
                                        <td>{if community.is_admin_created { "Admin" } else { "User" }}</td>
                                        <td>{format_date(community.created_at.as_deref())}</td>
                                        <td class="flex gap-2">
                                            <button class="btn btn-ghost btn-xs" on:click=move |_| view_community(id)>
                                                "View"
                                            </button>
                                            <button class="btn btn-outline btn-error btn-xs" on:click=move |_| on_delete(id)>
                                                "Delete"
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
    }
}
