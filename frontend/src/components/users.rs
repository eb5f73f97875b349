use crate::auth::use_auth;
use crate::components::table::StateRow;
use crate::components::toast::use_toast;
use leptos::prelude::*;
use leptos::task::spawn_local;
use travel_admin::ListState;
use travel_admin::actions::view_user;
use travel_admin_shared::User;

#[component]
pub fn UsersView() -> impl IntoView {
    let auth = use_auth();
    let toast = use_toast();
    let state = RwSignal::new(ListState::<User>::Loading);

    let console = auth.console();
    spawn_local(async move {
        if let Some(next) = console.load_users().await.ready() {
            state.set(next);
        }
    });

    let toggle = move |user_id: i64, make_active: bool| {
        let console = auth.console();
        spawn_local(async move {
            match console.toggle_user_status(user_id, make_active).await {
                Ok(next) => state.set(next),
                Err(e) => toast.show(e.into()),
            }
        });
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="overflow-x-auto w-full">
                <table class="table table-zebra w-full">
                    <thead>
                        <tr>
                            <th>"ID"</th>
                            <th>"Email"</th>
                            <th>"Username"</th>
                            <th>"Status"</th>
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <StateRow state=state colspan=5 />
                        <For
                            each=move || state.with(|s| s.rows().to_vec())
                            key=|u| (u.id, u.is_active)
                            children=move |user| {
                                let (id, active) = (user.id, user.is_active);
                                view! {
                                    <tr>
                                        <td>{id}</td>
                                        <td>{user.email}</td>
                                        <td>{user.username.unwrap_or_else(|| "N/A".to_string())}</td>
                                        <td>
                                            <span class=if active { "badge badge-success" } else { "badge badge-error" }>
                                                {if active { "Active" } else { "Inactive" }}
                                            </span>
                                        </td>
                                        <td class="flex gap-2">
                                            <button class="btn btn-ghost btn-xs" on:click=move |_| view_user(id)>
                                                "View"
                                            </button>
                                            <button class="btn btn-outline btn-xs" on:click=move |_| toggle(id, !active)>
                                                {if active { "Deactivate" } else { "Activate" }}
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
