use crate::services::use_app;
use leptos::prelude::*;
use leptos::task::spawn_local;
use vidshare::api::user::{create_user, send_code, verify_code};
use vidshare::route::LOGIN_PATH;
use vidshare_shared::user::CreateUserRequest;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let app = use_app();

    let (user_name, set_user_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (confirm, set_confirm) = signal(String::new());
    let (sex, set_sex) = signal("male".to_string());
    let (code, set_code) = signal(String::new());
    let (code_sent, set_code_sent) = signal(false);
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_send_code = move |_| {
        if email.get().is_empty() {
            set_error_msg.set(Some("Enter your email first".to_string()));
            return;
        }
        let api = app.api();
        let address = email.get();
        spawn_local(async move {
            match send_code(&api, &address).await {
                Ok(_) => set_code_sent.set(true),
                Err(e) => set_error_msg.set(Some(e.message().to_string())),
            }
        });
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if user_name.get().is_empty() || email.get().is_empty() || password.get().is_empty() {
            set_error_msg.set(Some("Please fill in all fields".to_string()));
            return;
        }
        if password.get() != confirm.get() {
            set_error_msg.set(Some("Passwords do not match".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let request = CreateUserRequest {
            user_name: user_name.get(),
            password: password.get(),
            email: email.get(),
            sex: sex.get(),
        };
        let verification = code.get();
        let api = app.api();
        spawn_local(async move {
            // 填写了验证码时先校验
            if !verification.is_empty() {
                if let Err(e) = verify_code(&api, &request.email, &verification).await {
                    set_error_msg.set(Some(e.message().to_string()));
                    set_is_submitting.set(false);
                    return;
                }
            }

            match create_user(&api, &request).await {
                Ok(resp) if resp.token.is_some() => {
                    if let Err(e) = app.credentials().save_auth_response(&resp) {
                        log::error!("Failed to save auth data: {}", e);
                    }
                    app.navigation().navigate_after_login(None);
                }
                Ok(_) => {
                    // 注册成功但没有返回令牌，回到登录页
                    app.navigation().navigate_to(LOGIN_PATH, true);
                }
                Err(e) => {
                    log::warn!("Registration failed: {}", e);
                    set_error_msg.set(Some(e.message().to_string()));
                }
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <h1 class="text-3xl font-bold mb-4">"Create account"</h1>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <input
                            type="text"
                            placeholder="Username"
                            on:input=move |ev| set_user_name.set(event_target_value(&ev))
                            prop:value=user_name
                            class="input input-bordered"
                        />
                        <div class="join w-full">
                            <input
                                type="email"
                                placeholder="Email"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered join-item flex-1"
                            />
                            <button type="button" class="btn join-item" on:click=on_send_code>
                                {move || if code_sent.get() { "Resend" } else { "Send code" }}
                            </button>
                        </div>
                        <Show when=move || code_sent.get()>
                            <input
                                type="text"
                                placeholder="Verification code"
                                on:input=move |ev| set_code.set(event_target_value(&ev))
                                prop:value=code
                                class="input input-bordered"
                            />
                        </Show>
                        <input
                            type="password"
                            placeholder="Password"
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            prop:value=password
                            class="input input-bordered"
                        />
                        <input
                            type="password"
                            placeholder="Confirm password"
                            on:input=move |ev| set_confirm.set(event_target_value(&ev))
                            prop:value=confirm
                            class="input input-bordered"
                        />
                        <select
                            class="select select-bordered"
                            on:change=move |ev| set_sex.set(event_target_value(&ev))
                            prop:value=sex
                        >
                            <option value="male">"Male"</option>
                            <option value="female">"Female"</option>
                            <option value="other">"Other"</option>
                        </select>

                        <button class="btn btn-primary mt-4" disabled=move || is_submitting.get()>
                            {move || if is_submitting.get() { "Registering..." } else { "Register" }}
                        </button>
                        <button
                            type="button"
                            class="btn btn-link"
                            on:click=move |_| { app.navigation().navigate_to(LOGIN_PATH, false); }
                        >
                            "Already have an account? Login"
                        </button>
                    </form>
                </div>
            </div>
        </div>
    }
}
