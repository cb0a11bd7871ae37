use crate::components::{NavBar, Notice, Toast, VideoGrid, auto_dismiss, failure, list_items};
use crate::services::use_app;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::Value;
use vidshare::api::Paging;
use vidshare::api::video::{popular_videos, recommend_videos};

#[component]
pub fn DashboardPage() -> impl IntoView {
    let app = use_app();

    let (popular, set_popular) = signal(Vec::<Value>::new());
    let (recommended, set_recommended) = signal(Vec::<Value>::new());
    let (loading, set_loading) = signal(true);
    let (notification, set_notification) = signal(Notice::None);

    let load_videos = move || {
        let api = app.api();
        set_loading.set(true);
        spawn_local(async move {
            // 两个列表互不依赖，并发请求
            let (popular, recommended) = futures::join!(
                popular_videos(&api, Paging::default()),
                recommend_videos(&api, Paging::default())
            );
            match popular {
                Ok(data) => set_popular.set(list_items(&data)),
                Err(e) => set_notification.set(failure("load popular videos", e.message())),
            }
            match recommended {
                Ok(data) => set_recommended.set(list_items(&data)),
                Err(e) => set_notification.set(failure("load recommendations", e.message())),
            }
            set_loading.set(false);
        });
    };

    // 初始加载
    load_videos();
    auto_dismiss(notification, set_notification);

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto space-y-8">
                <Toast notification=notification />
                <NavBar />

                <div class="flex items-center justify-between">
                    <h2 class="text-2xl font-bold">"Popular"</h2>
                    <button on:click=move |_| load_videos() disabled=move || loading.get() class="btn btn-ghost btn-sm">
                        {move || if loading.get() { "Loading..." } else { "Refresh" }}
                    </button>
                </div>
                <VideoGrid items=popular />

                <h2 class="text-2xl font-bold">"Recommended for you"</h2>
                <VideoGrid items=recommended />
            </div>
        </div>
    }
}
