use crate::components::{NavBar, Notice, Toast, auto_dismiss, failure, success, text_field};
use crate::services::use_app;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::Value;
use vidshare::api::user::{get_user_info, update_user};
use vidshare_shared::user::UpdateUserRequest;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let app = use_app();
    let stored = app.navigation().user_info();

    let user_name = stored.as_ref().map(|u| u.user_name.clone()).unwrap_or_default();
    let email = stored.as_ref().map(|u| u.email.clone()).unwrap_or_default();
    // 本地记录里的用户 ID 字段名并不固定
    let user_id = stored
        .as_ref()
        .map(|u| text_field(&Value::Object(u.extra.clone()), &["id", "userId", "user_id"]))
        .unwrap_or_default();

    let (details, set_details) = signal(Option::<Value>::None);
    let (new_password, set_new_password) = signal(String::new());
    let (notification, set_notification) = signal(Notice::None);
    auto_dismiss(notification, set_notification);

    if !user_id.is_empty() {
        let api = app.api();
        let id = user_id.clone();
        spawn_local(async move {
            match get_user_info(&api, &id).await {
                Ok(info) => set_details.set(Some(info)),
                Err(e) => set_notification.set(failure("load user info", e.message())),
            }
        });
    }

    let on_update = {
        let user_name = user_name.clone();
        let user_id = user_id.clone();
        move |_| {
            let password = new_password.get();
            if password.is_empty() {
                return;
            }
            let request = UpdateUserRequest {
                user_name: user_name.clone(),
                user_id: user_id.clone(),
                password: Some(password),
                data: None,
                filesize: None,
            };
            let api = app.api();
            spawn_local(async move {
                match update_user(&api, &request).await {
                    Ok(_) => {
                        set_new_password.set(String::new());
                        set_notification.set(success("Password updated"));
                    }
                    Err(e) => set_notification.set(failure("update password", e.message())),
                }
            });
        }
    };

    let permissions = stored.map(|u| u.permissions.join(", ")).unwrap_or_default();

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-3xl mx-auto space-y-8">
                <Toast notification=notification />
                <NavBar />

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <h2 class="card-title">{user_name}</h2>
                        <p class="opacity-70">{email}</p>
                        <p class="text-sm opacity-50">"Permissions: " {permissions}</p>
                        <Show when=move || details.get().is_some()>
                            <pre class="bg-base-200 rounded p-4 text-xs overflow-x-auto">
                                {move || {
                                    details
                                        .get()
                                        .and_then(|d| serde_json::to_string_pretty(&d).ok())
                                        .unwrap_or_default()
                                }}
                            </pre>
                        </Show>
                    </div>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <h3 class="card-title">"Change password"</h3>
                        <div class="join">
                            <input
                                type="password"
                                placeholder="New password"
                                class="input input-bordered join-item flex-1"
                                on:input=move |ev| set_new_password.set(event_target_value(&ev))
                                prop:value=new_password
                            />
                            <button class="btn btn-primary join-item" on:click=on_update>"Update"</button>
                        </div>
                    </div>
                </div>

                <div class="flex gap-2">
                    <button class="btn" on:click=move |_| { app.navigation().go_back(); }>"Back"</button>
                    <button class="btn btn-error" on:click=move |_| { app.navigation().logout(); }>"Logout"</button>
                </div>
            </div>
        </div>
    }
}
