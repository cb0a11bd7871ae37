//! 视频页面：列表 / 搜索 / 上传，以及详情页中的收藏与分享

use crate::components::{NavBar, Notice, Toast, VideoGrid, auto_dismiss, failure, list_items, success, text_field};
use crate::services::use_app;
use leptos::html::Input;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::Value;
use vidshare::api::Paging;
use vidshare::api::favorite::{add_favorite_video, create_favorite, list_favorites};
use vidshare::api::share::share_video;
use vidshare::api::video::{DEFAULT_CHUNK_SIZE, NewVideo, feed, publish_video, search_videos, stream_video, visit_video};
use vidshare_shared::favorite::CreateFavoriteRequest;
use vidshare_shared::share::ShareVideoRequest;
use vidshare_shared::video::SearchVideosRequest;
use wasm_bindgen_futures::JsFuture;

/// 读取用户选择的文件内容
async fn read_file_bytes(file: &web_sys::File) -> Result<Vec<u8>, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("{:?}", e))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

// =========================================================
// 列表页
// =========================================================

#[component]
pub fn VideoPage() -> impl IntoView {
    let app = use_app();

    let (videos, set_videos) = signal(Vec::<Value>::new());
    let (keywords, set_keywords) = signal(String::new());
    let (notification, set_notification) = signal(Notice::None);
    auto_dismiss(notification, set_notification);

    let load_feed = move || {
        let api = app.api();
        spawn_local(async move {
            match feed(&api, None).await {
                Ok(data) => set_videos.set(list_items(&data)),
                Err(e) => set_notification.set(failure("load videos", e.message())),
            }
        });
    };
    load_feed();

    let on_search = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let words = keywords.get();
        if words.trim().is_empty() {
            load_feed();
            return;
        }
        let request = SearchVideosRequest {
            keywords: words,
            paging: Paging::default(),
            from_date: None,
            to_date: None,
            username: None,
        };
        let api = app.api();
        spawn_local(async move {
            match search_videos(&api, &request).await {
                Ok(data) => set_videos.set(list_items(&data)),
                Err(e) => set_notification.set(failure("search videos", e.message())),
            }
        });
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto space-y-8">
                <Toast notification=notification />
                <NavBar />

                <form class="join w-full" on:submit=on_search>
                    <input
                        type="text"
                        placeholder="Search videos"
                        class="input input-bordered join-item flex-1"
                        on:input=move |ev| set_keywords.set(event_target_value(&ev))
                        prop:value=keywords
                    />
                    <button class="btn btn-primary join-item">"Search"</button>
                </form>

                <UploadCard on_done=move || load_feed() notify=set_notification />

                <VideoGrid items=videos />
            </div>
        </div>
    }
}

/// 分片上传表单
#[component]
fn UploadCard(on_done: impl Fn() + Copy + 'static, notify: WriteSignal<Notice>) -> impl IntoView {
    let app = use_app();
    let file_input = NodeRef::<Input>::new();

    let (title, set_title) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let (uploading, set_uploading) = signal(false);

    let on_upload = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(file) = file_input.get().and_then(|input| input.files()).and_then(|files| files.get(0)) else {
            notify.set(failure("upload", "no file selected"));
            return;
        };
        let meta = NewVideo {
            title: if title.get().is_empty() { file.name() } else { title.get() },
            description: description.get(),
        };

        set_uploading.set(true);
        let api = app.api();
        spawn_local(async move {
            let result = match read_file_bytes(&file).await {
                Ok(bytes) => publish_video(&api, &meta, &bytes, DEFAULT_CHUNK_SIZE)
                    .await
                    .map_err(|e| e.message().to_string()),
                Err(e) => Err(e),
            };
            match result {
                Ok(_) => {
                    notify.set(success("Upload complete"));
                    set_title.set(String::new());
                    set_description.set(String::new());
                    on_done();
                }
                Err(e) => notify.set(failure("upload", &e)),
            }
            set_uploading.set(false);
        });
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <form class="card-body gap-2" on:submit=on_upload>
                <h3 class="card-title">"Upload"</h3>
                <input
                    type="text"
                    placeholder="Title"
                    class="input input-bordered"
                    on:input=move |ev| set_title.set(event_target_value(&ev))
                    prop:value=title
                />
                <input
                    type="text"
                    placeholder="Description"
                    class="input input-bordered"
                    on:input=move |ev| set_description.set(event_target_value(&ev))
                    prop:value=description
                />
                <input type="file" accept="video/*" class="file-input file-input-bordered" node_ref=file_input />
                <button class="btn btn-primary" disabled=move || uploading.get()>
                    {move || if uploading.get() { "Uploading..." } else { "Publish" }}
                </button>
            </form>
        </div>
    }
}

// =========================================================
// 详情页
// =========================================================

#[component]
pub fn VideoDetailPage(id: String) -> impl IntoView {
    let app = use_app();

    let (detail, set_detail) = signal(Option::<Value>::None);
    let (stream_url, set_stream_url) = signal(String::new());
    let (favorites, set_favorites) = signal(Vec::<Value>::new());
    let (notification, set_notification) = signal(Notice::None);
    auto_dismiss(notification, set_notification);

    {
        let api = app.api();
        let id = id.clone();
        spawn_local(async move {
            match visit_video(&api, &id).await {
                Ok(data) => {
                    let url = text_field(&data, &["play_url", "playUrl", "url", "video_url"]);
                    set_stream_url.set(url);
                    set_detail.set(Some(data));
                }
                Err(e) => set_notification.set(failure("load video", e.message())),
            }
            // 详情里没有播放地址时单独请求
            if stream_url.get_untracked().is_empty() {
                if let Ok(data) = stream_video(&api, &id).await {
                    let url = data
                        .as_str()
                        .map(str::to_string)
                        .unwrap_or_else(|| text_field(&data, &["url", "play_url", "playUrl"]));
                    set_stream_url.set(url);
                }
            }
            if let Ok(data) = list_favorites(&api, Paging::default()).await {
                set_favorites.set(list_items(&data));
            }
        });
    }

    let title = move || {
        detail
            .get()
            .map(|d| text_field(&d, &["title", "name"]))
            .unwrap_or_else(|| "Loading...".to_string())
    };
    let description = move || detail.get().map(|d| text_field(&d, &["description"])).unwrap_or_default();

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-5xl mx-auto space-y-8">
                <Toast notification=notification />
                <NavBar />

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <h2 class="card-title">{title}</h2>
                        <Show when=move || !stream_url.get().is_empty()>
                            <video class="w-full rounded" controls=true src=move || stream_url.get()></video>
                        </Show>
                        <p class="opacity-70">{description}</p>
                    </div>
                </div>

                <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                    <FavoriteCard video_id=id.clone() favorites=favorites set_favorites=set_favorites notify=set_notification />
                    <ShareCard video_id=id notify=set_notification />
                </div>

                <button class="btn" on:click=move |_| { app.navigation().go_back(); }>"Back"</button>
            </div>
        </div>
    }
}

#[component]
fn FavoriteCard(
    video_id: String,
    favorites: ReadSignal<Vec<Value>>,
    set_favorites: WriteSignal<Vec<Value>>,
    notify: WriteSignal<Notice>,
) -> impl IntoView {
    let app = use_app();
    let (selected, set_selected) = signal(String::new());
    let (new_name, set_new_name) = signal(String::new());

    let on_add = move |_| {
        let favorite_id = selected.get();
        if favorite_id.is_empty() {
            notify.set(failure("add favorite", "no folder selected"));
            return;
        }
        let api = app.api();
        let video_id = video_id.clone();
        spawn_local(async move {
            match add_favorite_video(&api, &favorite_id, &video_id).await {
                Ok(_) => notify.set(success("Added to favorites")),
                Err(e) => notify.set(failure("add favorite", e.message())),
            }
        });
    };

    let on_create = move |_| {
        let name = new_name.get();
        if name.trim().is_empty() {
            return;
        }
        let api = app.api();
        spawn_local(async move {
            let request = CreateFavoriteRequest {
                name,
                description: None,
                cover_url: None,
            };
            match create_favorite(&api, &request).await {
                Ok(_) => {
                    set_new_name.set(String::new());
                    if let Ok(data) = list_favorites(&api, Paging::default()).await {
                        set_favorites.set(list_items(&data));
                    }
                }
                Err(e) => notify.set(failure("create folder", e.message())),
            }
        });
    };

    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body gap-2">
                <h3 class="card-title">"Favorite"</h3>
                <select class="select select-bordered" on:change=move |ev| set_selected.set(event_target_value(&ev))>
                    <option value="">"Choose a folder"</option>
                    {move || {
                        favorites
                            .get()
                            .into_iter()
                            .map(|f| {
                                let id = text_field(&f, &["favorite_id", "favoriteId", "id"]);
                                let name = text_field(&f, &["name", "title"]);
                                view! { <option value=id>{name}</option> }
                            })
                            .collect_view()
                    }}
                </select>
                <button class="btn btn-primary" on:click=on_add>"Add to favorite"</button>
                <div class="join">
                    <input
                        type="text"
                        placeholder="New folder"
                        class="input input-bordered join-item flex-1"
                        on:input=move |ev| set_new_name.set(event_target_value(&ev))
                        prop:value=new_name
                    />
                    <button class="btn join-item" on:click=on_create>"Create"</button>
                </div>
            </div>
        </div>
    }
}

#[component]
fn ShareCard(video_id: String, notify: WriteSignal<Notice>) -> impl IntoView {
    let app = use_app();
    let (to_user, set_to_user) = signal(String::new());
    let (message, set_message) = signal(String::new());

    let on_share = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if to_user.get().is_empty() {
            return;
        }
        let text = message.get();
        let request = ShareVideoRequest {
            video_id: video_id.clone(),
            to_user_id: to_user.get(),
            message: (!text.is_empty()).then_some(text),
        };
        let api = app.api();
        spawn_local(async move {
            match share_video(&api, &request).await {
                Ok(_) => {
                    set_message.set(String::new());
                    notify.set(success("Shared"));
                }
                Err(e) => notify.set(failure("share", e.message())),
            }
        });
    };

    view! {
        <div class="card bg-base-100 shadow">
            <form class="card-body gap-2" on:submit=on_share>
                <h3 class="card-title">"Share"</h3>
                <input
                    type="text"
                    placeholder="Recipient user ID"
                    class="input input-bordered"
                    on:input=move |ev| set_to_user.set(event_target_value(&ev))
                    prop:value=to_user
                />
                <input
                    type="text"
                    placeholder="Message (optional)"
                    class="input input-bordered"
                    on:input=move |ev| set_message.set(event_target_value(&ev))
                    prop:value=message
                />
                <button class="btn btn-secondary">"Share"</button>
            </form>
        </div>
    }
}
