//! vidshare 前端应用
//!
//! 采用 Context-Driven 架构：
//! - `web`: 浏览器适配（localStorage / fetch / History API）与路由服务
//! - `services`: 启动时组装的凭据存储、API 客户端与导航工具
//! - `components`: UI 组件层

mod components;
mod services;
pub(crate) mod web;

use crate::components::dashboard::DashboardPage;
use crate::components::login::LoginPage;
use crate::components::profile::ProfilePage;
use crate::components::register::RegisterPage;
use crate::components::token_test::TokenTestPage;
use crate::components::video::{VideoDetailPage, VideoPage};
use crate::services::{Services, provide_services};
use crate::web::router::{RouterOutlet, provide_router};

use leptos::prelude::*;
use vidshare::AppRoute;

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。根路径和未知路径在路由器里
/// 已经被重定向到登录页，这里兜底同样渲染登录页。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::Profile => view! { <ProfilePage /> }.into_any(),
        AppRoute::Video => view! { <VideoPage /> }.into_any(),
        AppRoute::VideoDetail { id } => view! { <VideoDetailPage id=id /> }.into_any(),
        AppRoute::TokenTest => view! { <TokenTestPage /> }.into_any(),
        AppRoute::Login | AppRoute::Root | AppRoute::NotFound => view! { <LoginPage /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 组装服务
    let (services, router) = Services::build();
    provide_services(services);

    // 2. 路由服务：首次导航同样经过守卫
    provide_router(router);

    view! { <RouterOutlet matcher=route_matcher /> }
}
