use crate::services::use_app;
use leptos::prelude::*;
use leptos::task::spawn_local;
use vidshare::api::user::login_user;
use vidshare::route::REGISTER_PATH;
use vidshare_shared::user::LoginRequest;

#[component]
pub fn LoginPage() -> impl IntoView {
    let app = use_app();

    let (user_name, set_user_name) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if user_name.get().is_empty() || password.get().is_empty() {
            set_error_msg.set(Some("Please fill in all fields".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let request = LoginRequest {
            user_name: user_name.get(),
            password: password.get(),
            email: None,
        };
        let api = app.api();
        spawn_local(async move {
            match login_user(&api, &request).await {
                Ok(resp) if resp.token.is_some() => {
                    if let Err(e) = app.credentials().save_auth_response(&resp) {
                        log::error!("Failed to save auth data: {}", e);
                    }
                    app.navigation().navigate_after_login(None);
                }
                Ok(_) => {
                    set_error_msg.set(Some("Login failed: no token in response".to_string()));
                }
                Err(e) => {
                    log::warn!("Login failed: {}", e);
                    set_error_msg.set(Some(e.message().to_string()));
                }
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"Video Platform"</h1>
                    <p class="text-base-content/70">"Sign in to continue"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="user_name">
                                <span class="label-text">"Username"</span>
                            </label>
                            <input
                                id="user_name"
                                type="text"
                                on:input=move |ev| set_user_name.set(event_target_value(&ev))
                                prop:value=user_name
                                class="input input-bordered"
                                required
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
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                } else {
                                    "Login".into_any()
                                }}
                            </button>
                        </div>
                        <button
                            type="button"
                            class="btn btn-link"
                            on:click=move |_| { app.navigation().navigate_to(REGISTER_PATH, false); }
                        >
                            "No account? Register"
                        </button>
                    </form>
                </div>
            </div>
        </div>
    }
}
