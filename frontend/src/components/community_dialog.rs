mod form_state;

use crate::auth::use_auth;
use crate::components::toast::use_toast;
use crate::web::read_selected_file;
use form_state::FormState;
use leptos::prelude::*;
use leptos::task::spawn_local;
use travel_admin::ListState;
use travel_admin::actions::{COMMUNITY_CREATED, Notice};
use travel_admin_shared::Community;

/// 新建社区对话框
///
/// 成功后把重新加载的社区列表交给 `on_created`。
#[component]
pub fn CommunityDialog(#[prop(into)] on_created: Callback<ListState<Community>>) -> impl IntoView {
    let auth = use_auth();
    let toast = use_toast();
    let (open, set_open) = signal(false);
    let form = FormState::new();
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if open.get() {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        form.submitting.set(true);
        let (name, description) = (form.name.get_untracked(), form.description.get_untracked());
        let file_input = form.file_input.get_untracked();
        let console = auth.console();

        spawn_local(async move {
            let photo = match &file_input {
                Some(input) => read_selected_file(input).await,
                None => Ok(None),
            };
            let result = match photo {
                Ok(photo) => console
                    .create_community(&name, &description, photo)
                    .await
                    .map_err(Notice::from),
                Err(e) => Err(Notice::error(e.to_string())),
            };
            match result {
                Ok(next) => {
                    on_created.run(next);
                    form.reset();
                    set_open.set(false);
                    toast.show(Notice::info(COMMUNITY_CREATED));
                }
                Err(notice) => toast.show(notice),
            }
            form.submitting.set(false);
        });
    };

    view! {
        <button class="btn btn-primary btn-sm" on:click=move |_| set_open.set(true)>
            "Create Community"
        </button>

        <dialog class="modal" node_ref=dialog_ref on:close=move |_| set_open.set(false)>
            <div class="modal-box">
                <h3 class="font-bold text-lg">"Create Community"</h3>

                <form on:submit=on_submit class="space-y-4 pt-4">
                    <div class="form-control">
                        <label for="community_name" class="label">
                            <span class="label-text">"Name"</span>
                        </label>
                        <input id="community_name"
                            type="text"
                            placeholder="q/travel"
                            on:input=move |ev| form.name.set(event_target_value(&ev))
                            prop:value=form.name
                            class="input input-bordered w-full"
                        />
                    </div>

                    <div class="form-control">
                        <label for="community_description" class="label">
                            <span class="label-text">"Description"</span>
                        </label>
                        <textarea id="community_description"
                            rows="3"
                            on:input=move |ev| form.description.set(event_target_value(&ev))
                            prop:value=form.description
                            class="textarea textarea-bordered w-full"
                        ></textarea>
                        <label class="label">
                            <span class=move || if form.over_limit() {
                                "label-text-alt text-error"
                            } else {
                                "label-text-alt text-base-content/50"
                            }>
                                {move || form.counter_label()}
                            </span>
                        </label>
                    </div>

                    <div class="form-control">
                        <label for="community_photo" class="label">
                            <span class="label-text">"Photo (optional)"</span>
                        </label>
                        <input id="community_photo"
                            type="file"
                            accept="image/*"
                            node_ref=form.file_input
                            class="file-input file-input-bordered w-full"
                        />
                    </div>

                    <div class="modal-action">
                        <button type="button" class="btn btn-ghost" on:click=move |_| set_open.set(false)>"Cancel"</button>
                        <button type="submit" disabled=move || form.submitting.get() class="btn btn-primary">
                            {move || if form.submitting.get() {
                                view! { <span class="loading loading-spinner"></span> "Creating..." }.into_any()
                            } else {
                                "Create".into_any()
                            }}
                        </button>
                    </div>
                </form>
            </div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>
    }
}
