//! UI 组件层

pub mod dashboard;
pub mod login;
pub mod profile;
pub mod register;
pub mod token_test;
pub mod video;

use leptos::prelude::*;
use serde_json::Value;

use crate::services::use_app;

// =========================================================
// 载荷读取工具
// =========================================================

/// 后端列表接口的包裹层并不统一，这里依次尝试常见的字段
pub fn list_items(payload: &Value) -> Vec<Value> {
    if let Some(items) = payload.as_array() {
        return items.clone();
    }
    ["items", "list", "videos", "data", "records"]
        .iter()
        .find_map(|key| payload.get(key))
        .map(list_items)
        .unwrap_or_default()
}

/// 读取第一个存在的字段，数字转为字符串
pub fn text_field(item: &Value, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|key| match item.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .unwrap_or_default()
}

pub fn video_id(item: &Value) -> String {
    text_field(item, &["video_id", "videoId", "id", "uuid"])
}

// =========================================================
// 公共组件
// =========================================================

/// 顶部导航栏
#[component]
pub fn NavBar() -> impl IntoView {
    let app = use_app();
    let user_name = app.navigation().user_info().map(|u| u.user_name).unwrap_or_default();

    view! {
        <div class="navbar bg-base-100 rounded-box shadow-xl">
            <div class="flex-1 gap-2">
                <a class="btn btn-ghost text-xl" on:click=move |_| { app.navigation().go_to_dashboard(); }>
                    "Video Platform"
                </a>
                <button class="btn btn-ghost btn-sm" on:click=move |_| { app.navigation().go_to_video(None); }>
                    "Videos"
                </button>
            </div>
            <div class="flex-none gap-2">
                <button class="btn btn-ghost btn-sm" on:click=move |_| { app.navigation().go_to_profile(); }>
                    {user_name}
                </button>
                <button class="btn btn-outline btn-error btn-sm" on:click=move |_| { app.navigation().logout(); }>
                    "Logout"
                </button>
            </div>
        </div>
    }
}

// =========================================================
// 消息提示
// =========================================================

/// (消息内容, 是否出错)
pub type Notice = Option<(String, bool)>;

pub fn success(message: &str) -> Notice {
    Some((message.to_string(), false))
}

/// `action` 用动词短语，例如 "load videos"
pub fn failure(action: &str, reason: &str) -> Notice {
    Some((format!("Failed to {}: {}", action, reason), true))
}

#[component]
pub fn Toast(notification: ReadSignal<Notice>) -> impl IntoView {
    view! {
        <Show when=move || notification.get().is_some()>
            <div class="toast toast-top toast-end z-50">
                <div class=move || {
                    let is_err = notification.get().map(|(_, e)| e).unwrap_or(false);
                    if is_err { "alert alert-error shadow-lg" } else { "alert alert-success shadow-lg" }
                }>
                    <span>{move || notification.get().map(|(msg, _)| msg).unwrap_or_default()}</span>
                </div>
            </div>
        </Show>
    }
}

/// 3 秒后自动清除通知
pub fn auto_dismiss(notification: ReadSignal<Notice>, set_notification: WriteSignal<Notice>) {
    Effect::new(move |_| {
        if notification.get().is_some() {
            set_timeout(move || set_notification.set(None), std::time::Duration::from_secs(3));
        }
    });
}

/// 视频卡片列表，点击进入详情页
#[component]
pub fn VideoGrid(items: ReadSignal<Vec<Value>>) -> impl IntoView {
    let app = use_app();

    view! {
        <Show
            when=move || !items.get().is_empty()
            fallback=|| view! { <p class="text-base-content/50 py-6 text-center">"No videos yet."</p> }
        >
            <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                {move || {
                    items
                        .get()
                        .into_iter()
                        .map(|item| {
                            let id = video_id(&item);
                            let title = text_field(&item, &["title", "name"]);
                            let author = text_field(&item, &["user_name", "userName", "author", "username"]);
                            let cover = text_field(&item, &["cover_url", "coverUrl", "cover"]);
                            view! {
                                <div
                                    class="card bg-base-100 shadow hover:shadow-xl cursor-pointer"
                                    on:click=move |_| { app.navigation().go_to_video(Some(&id)); }
                                >
                                    {(!cover.is_empty()).then(|| view! { <figure><img src=cover alt="cover" /></figure> })}
                                    <div class="card-body p-4">
                                        <h3 class="card-title text-base">{title}</h3>
                                        <p class="text-sm opacity-60">{author}</p>
                                    </div>
                                </div>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_notices() {
        assert_eq!(success("Shared"), Some(("Shared".to_string(), false)));
        assert_eq!(
            failure("load videos", "[TRANSPORT_ERROR] timed out"),
            Some(("Failed to load videos: [TRANSPORT_ERROR] timed out".to_string(), true))
        );
    }

    #[test]
    fn test_list_items_unwraps_common_envelopes() {
        assert_eq!(list_items(&json!([1, 2])).len(), 2);
        assert_eq!(list_items(&json!({"items": [1]})).len(), 1);
        assert_eq!(list_items(&json!({"data": {"list": [1, 2, 3]}})).len(), 3);
        assert!(list_items(&json!({"total": 0})).is_empty());
        assert!(list_items(&Value::Null).is_empty());
    }

    #[test]
    fn test_text_field_reads_first_present_key() {
        let item = json!({"id": 7, "title": "clip"});
        assert_eq!(video_id(&item), "7");
        assert_eq!(text_field(&item, &["name", "title"]), "clip");
        assert_eq!(text_field(&item, &["missing"]), "");
    }
}
