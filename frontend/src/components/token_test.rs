//! 令牌调试页：查看当前会话并手动触发一次带令牌的请求

use crate::services::use_app;
use leptos::prelude::*;
use leptos::task::spawn_local;
use vidshare::api::Paging;
use vidshare::api::video::popular_videos;
use vidshare::route::LOGIN_PATH;

/// 只显示令牌首尾，避免整段出现在页面上
fn mask(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 12 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 6..].iter().collect();
    format!("{}...{}", head, tail)
}

#[component]
pub fn TokenTestPage() -> impl IntoView {
    let app = use_app();

    // 每次操作后递增，触发会话快照重新读取
    let (version, set_version) = signal(0u32);
    let (result, set_result) = signal(String::new());

    let session = move || {
        version.get();
        app.credentials().read()
    };

    let on_probe = move |_| {
        let api = app.api();
        set_result.set("Requesting...".to_string());
        spawn_local(async move {
            match popular_videos(&api, Paging { page_num: 1, page_size: 1 }).await {
                Ok(_) => set_result.set("OK: token accepted".to_string()),
                Err(e) => set_result.set(e.to_string()),
            }
            set_version.update(|v| *v += 1);
        });
    };

    let on_clear = move |_| {
        app.credentials().clear();
        set_version.update(|v| *v += 1);
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-3xl mx-auto space-y-4">
                <h1 class="text-2xl font-bold">"Token Test"</h1>
                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body font-mono text-sm space-y-1">
                        <p>"authenticated: " {move || session().is_authenticated().to_string()}</p>
                        <p>"token: " {move || session().access_token.map(|t| mask(&t)).unwrap_or_else(|| "-".into())}</p>
                        <p>"refreshToken: " {move || session().refresh_token.map(|t| mask(&t)).unwrap_or_else(|| "-".into())}</p>
                        <p>"user: " {move || {
                            session()
                                .user
                                .and_then(|u| serde_json::to_string(&u).ok())
                                .unwrap_or_else(|| "-".into())
                        }}</p>
                    </div>
                </div>
                <div class="flex gap-2">
                    <button class="btn btn-primary" on:click=on_probe>"Send authenticated request"</button>
                    <button class="btn btn-outline" on:click=on_clear>"Clear session"</button>
                    <button class="btn btn-ghost" on:click=move |_| { app.navigation().navigate_to(LOGIN_PATH, false); }>
                        "Go to login"
                    </button>
                </div>
                <Show when=move || !result.get().is_empty()>
                    <pre class="bg-base-100 rounded p-4 text-xs">{move || result.get()}</pre>
                </Show>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::mask;

    #[test]
    fn test_mask_hides_middle_of_token() {
        assert_eq!(mask("abc"), "***");
        assert_eq!(mask("abcdef0123456789"), "abcdef...456789");
    }
}
