//! 路由服务模块
//!
//! 把核心库的 `Router` 接到 Leptos：路由变化写入信号驱动界面，
//! 浏览器后退 / 前进通过 popstate 交给 `Router::sync` 重新走一遍守卫。

use std::rc::Rc;

use leptos::prelude::*;
use vidshare::{AppRoute, HistoryMode, Router};
use wasm_bindgen::prelude::*;

use super::history::{BrowserHistory, current_location};

/// 路由器服务
///
/// 只持有当前路由的只读信号；导航操作统一走 `Navigation`。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
}

impl RouterService {
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }
}

/// 初始化浏览器后退/前进按钮监听
fn init_popstate_listener(router: Rc<Router<BrowserHistory>>) {
    let closure = Closure::<dyn Fn()>::new(move || {
        if let Err(e) = router.sync(&current_location()) {
            log::error!("[Router] popstate handling failed: {}", e);
        }
    });

    if let Some(window) = web_sys::window() {
        let _ = window.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
    }

    // 泄漏闭包以保持监听器存活
    closure.forget();
}

/// 提供路由服务到 Context，并按当前地址完成首次导航
pub fn provide_router(router: Rc<Router<BrowserHistory>>) -> RouterService {
    let (current_route, set_route) = signal(router.current().route);
    router.subscribe(move |resolved| set_route.set(resolved.route.clone()));

    init_popstate_listener(router.clone());

    let initial = current_location();
    if let Err(e) = router.navigate(&initial.full_path(), HistoryMode::Replace) {
        log::error!("[Router] Initial navigation to {} failed: {}", initial, e);
    }

    let service = RouterService { current_route };
    provide_context(service);
    service
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>().expect("RouterService not found in context. Ensure Router is provided.")
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}
