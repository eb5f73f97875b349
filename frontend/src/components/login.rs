use crate::auth::use_auth;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (api_origin, set_api_origin) = signal(auth.api_origin.get_untracked());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // 成功后不需要手动导航：会话信号变化会触发路由重定向
    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_error_msg.set(None);
        auth.set_api_origin(&api_origin.get_untracked());

        set_is_submitting.set(true);
        let (email, password) = (email.get_untracked(), password.get_untracked());
        spawn_local(async move {
            if let Err(e) = auth.login(email.trim(), &password).await {
                set_error_msg.set(Some(e.to_string()));
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"Admin Console"</h1>
                    <p class="text-base-content/70">"Sign in with your administrator account"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="admin@example.com"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="api_origin">
                                <span class="label-text">"API server"</span>
                            </label>
                            <input
                                id="api_origin"
                                type="url"
                                on:input=move |ev| set_api_origin.set(event_target_value(&ev))
                                prop:value=api_origin
                                class="input input-bordered input-sm font-mono"
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                } else {
                                    "Sign In".into_any()
                                }}
                            </button>
                        </div>
                        <BypassButton />
                    </form>
                </div>
            </div>
        </div>
    }
}

#[cfg(feature = "dev-bypass")]
#[component]
fn BypassButton() -> impl IntoView {
    let auth = use_auth();
    view! {
        <button type="button" class="btn btn-ghost btn-sm" on:click=move |_| auth.bypass()>
            "Skip sign-in (development)"
        </button>
    }
}

#[cfg(not(feature = "dev-bypass"))]
#[component]
fn BypassButton() -> impl IntoView {}
