//! 路由引擎
//!
//! 实现"请求 -> 验证(Guard) -> 处理 -> 提交"的导航流程。
//! 对浏览器 History API 的操作通过 `Navigator` 注入，核心逻辑不依赖 DOM。

use std::cell::RefCell;
use std::rc::Rc;

use crate::guard::{GuardDecision, NavigationGuard};
use crate::route::{AppRoute, Location};

/// 单次导航允许的最大重定向次数
const MAX_REDIRECTS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    #[error("history update for `{path}` failed: {reason}")]
    History { path: String, reason: String },
    #[error("redirect loop detected while resolving `{0}`")]
    RedirectLoop(String),
}

/// History 的写入方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMode {
    Push,
    Replace,
    /// 浏览器已经更新了地址（后退 / 前进），只有发生重定向时才写入 History
    Pop,
}

/// 浏览器 History API 的抽象
pub trait Navigator {
    fn push(&self, location: &Location) -> Result<(), NavigationError>;
    fn replace(&self, location: &Location) -> Result<(), NavigationError>;
    fn back(&self) -> Result<(), NavigationError>;
    fn history_len(&self) -> usize;
    /// 整页跳转，不经过应用内路由
    fn hard_redirect(&self, path: &str);
}

/// 已经通过守卫的路由
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedRoute {
    pub route: AppRoute,
    pub location: Location,
}

type RouteListener = Rc<dyn Fn(&ResolvedRoute)>;

/// 路由器
///
/// 持有当前路由状态；每次切换都经过守卫，再提交到 History 并通知订阅者。
pub struct Router<N: Navigator> {
    navigator: N,
    guard: NavigationGuard,
    current: RefCell<Option<ResolvedRoute>>,
    listener: RefCell<Option<RouteListener>>,
}

impl<N: Navigator> Router<N> {
    pub fn new(navigator: N, guard: NavigationGuard) -> Self {
        Self {
            navigator,
            guard,
            current: RefCell::new(None),
            listener: RefCell::new(None),
        }
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn guard(&self) -> &NavigationGuard {
        &self.guard
    }

    /// 订阅路由变化（UI 层用它驱动界面更新）
    pub fn subscribe(&self, listener: impl Fn(&ResolvedRoute) + 'static) {
        *self.listener.borrow_mut() = Some(Rc::new(listener));
    }

    /// 当前路由；首次导航之前为默认的登录页
    pub fn current(&self) -> ResolvedRoute {
        self.current.borrow().clone().unwrap_or_default()
    }

    /// **核心方法：导航与守卫**
    pub fn navigate(&self, target: &str, mode: HistoryMode) -> Result<ResolvedRoute, NavigationError> {
        let from = self.current.borrow().as_ref().map(|r| r.location.clone());
        let mut location = Location::parse(target);
        let mut redirected = false;

        for _ in 0..MAX_REDIRECTS {
            let route = location.route();

            // --- Step 1: 路由表中的静态重定向 ---
            if let Some(to) = route.static_redirect() {
                log::debug!("[Router] {} redirects to {}", location.path, to);
                location = Location::parse(to);
                redirected = true;
                continue;
            }

            // --- Step 2: 守卫 ---
            match self.guard.check(from.as_ref(), &location) {
                GuardDecision::Allow => {
                    let resolved = ResolvedRoute { route, location };
                    self.commit(&resolved, mode, redirected)?;
                    return Ok(resolved);
                }
                GuardDecision::RedirectToLogin(to) | GuardDecision::RedirectToLanding(to) => {
                    location = to;
                    redirected = true;
                }
            }
        }

        log::error!("[Router] Redirect loop while navigating to {}", target);
        Err(NavigationError::RedirectLoop(target.to_string()))
    }

    /// 浏览器后退 / 前进后同步当前地址
    pub fn sync(&self, location: &Location) -> Result<ResolvedRoute, NavigationError> {
        self.navigate(&location.full_path(), HistoryMode::Pop)
    }

    pub fn back(&self) -> Result<(), NavigationError> {
        self.navigator.back()
    }

    // --- Step 3: 提交 (写 History 并更新状态) ---
    fn commit(&self, resolved: &ResolvedRoute, mode: HistoryMode, redirected: bool) -> Result<(), NavigationError> {
        match mode {
            HistoryMode::Push => self.navigator.push(&resolved.location)?,
            HistoryMode::Replace => self.navigator.replace(&resolved.location)?,
            HistoryMode::Pop if redirected => self.navigator.replace(&resolved.location)?,
            HistoryMode::Pop => {}
        }

        *self.current.borrow_mut() = Some(resolved.clone());

        let listener = self.listener.borrow().clone();
        if let Some(listener) = listener {
            listener(resolved);
        }
        Ok(())
    }
}

// =========================================================
// 测试工具: MockNavigator
// =========================================================

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::session::{CredentialStore, Session};
    use std::cell::Cell;

    /// 记录所有 History 操作的假导航器
    #[derive(Default)]
    pub struct MockNavigator {
        pub log: RefCell<Vec<String>>,
        /// 路径（不含查询串）包含该片段时 push / replace 失败
        pub fail_on: RefCell<Option<String>>,
        pub history: Cell<usize>,
    }

    impl MockNavigator {
        pub fn failing_on(fragment: &str) -> Self {
            let nav = Self::default();
            *nav.fail_on.borrow_mut() = Some(fragment.to_string());
            nav
        }

        fn check(&self, location: &Location) -> Result<(), NavigationError> {
            match self.fail_on.borrow().as_deref() {
                Some(fragment) if location.path.contains(fragment) => Err(NavigationError::History {
                    path: location.full_path(),
                    reason: "history unavailable".to_string(),
                }),
                _ => Ok(()),
            }
        }
    }

    impl Navigator for MockNavigator {
        fn push(&self, location: &Location) -> Result<(), NavigationError> {
            self.check(location)?;
            self.history.set(self.history.get() + 1);
            self.log.borrow_mut().push(format!("push {}", location.full_path()));
            Ok(())
        }

        fn replace(&self, location: &Location) -> Result<(), NavigationError> {
            self.check(location)?;
            self.log.borrow_mut().push(format!("replace {}", location.full_path()));
            Ok(())
        }

        fn back(&self) -> Result<(), NavigationError> {
            self.log.borrow_mut().push("back".to_string());
            Ok(())
        }

        fn history_len(&self) -> usize {
            self.history.get()
        }

        fn hard_redirect(&self, path: &str) {
            self.log.borrow_mut().push(format!("hard {}", path));
        }
    }

    pub fn router_with(store: &CredentialStore, navigator: MockNavigator) -> Router<MockNavigator> {
        Router::new(navigator, NavigationGuard::new(store.clone(), ClientConfig::default()))
    }

    #[test]
    fn test_unauthenticated_profile_redirects_to_login() {
        let store = CredentialStore::in_memory();
        let router = router_with(&store, MockNavigator::default());

        let resolved = router.navigate("/profile", HistoryMode::Push).unwrap();

        assert_eq!(resolved.route, AppRoute::Login);
        assert_eq!(resolved.location.full_path(), "/login?redirect=/profile");
        assert_eq!(*router.navigator().log.borrow(), vec!["push /login?redirect=/profile"]);
    }

    #[test]
    fn test_authenticated_login_redirects_to_landing() {
        let store = CredentialStore::in_memory();
        store.save(&Session::with_token("t")).unwrap();
        let router = router_with(&store, MockNavigator::default());

        let resolved = router.navigate("/login", HistoryMode::Push).unwrap();
        assert_eq!(resolved.route, AppRoute::Video);
        assert_eq!(router.current().location.path, "/video");
    }

    #[test]
    fn test_unknown_path_and_root_go_to_login() {
        let store = CredentialStore::in_memory();
        let router = router_with(&store, MockNavigator::default());

        assert_eq!(router.navigate("/does/not/exist", HistoryMode::Push).unwrap().route, AppRoute::Login);
        assert_eq!(router.navigate("/", HistoryMode::Replace).unwrap().location.full_path(), "/login");

        // 已登录时 /login 还会再被守卫重定向到落地页
        store.save(&Session::with_token("t")).unwrap();
        assert_eq!(router.navigate("/nope", HistoryMode::Push).unwrap().route, AppRoute::Video);
    }

    #[test]
    fn test_listener_sees_every_committed_route() {
        let store = CredentialStore::in_memory();
        store.save(&Session::with_token("t")).unwrap();
        let router = router_with(&store, MockNavigator::default());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        router.subscribe(move |r| sink.borrow_mut().push(r.route.clone()));

        router.navigate("/video/7", HistoryMode::Push).unwrap();
        router.navigate("/profile", HistoryMode::Push).unwrap();

        assert_eq!(
            *seen.borrow(),
            vec![AppRoute::VideoDetail { id: "7".into() }, AppRoute::Profile]
        );
    }

    #[test]
    fn test_history_failure_leaves_state_untouched() {
        let store = CredentialStore::in_memory();
        store.save(&Session::with_token("t")).unwrap();
        let router = router_with(&store, MockNavigator::failing_on("/profile"));
        router.navigate("/dashboard", HistoryMode::Push).unwrap();

        let err = router.navigate("/profile", HistoryMode::Push).unwrap_err();
        assert!(matches!(err, NavigationError::History { .. }));
        assert_eq!(router.current().route, AppRoute::Dashboard);
    }

    #[test]
    fn test_pop_only_writes_history_on_redirect() {
        let store = CredentialStore::in_memory();
        store.save(&Session::with_token("t")).unwrap();
        let router = router_with(&store, MockNavigator::default());

        router.sync(&Location::parse("/video/3")).unwrap();
        assert!(router.navigator().log.borrow().is_empty());

        // 令牌在别处被清除后，后退到受保护页面会被替换为登录页
        store.clear();
        let resolved = router.sync(&Location::parse("/dashboard")).unwrap();
        assert_eq!(resolved.route, AppRoute::Login);
        assert_eq!(
            *router.navigator().log.borrow(),
            vec!["replace /login?redirect=/dashboard"]
        );
    }

    #[test]
    fn test_redirect_loop_is_reported() {
        let store = CredentialStore::in_memory();
        store.save(&Session::with_token("t")).unwrap();
        let config = ClientConfig {
            landing_path: "/login".to_string(),
            ..Default::default()
        };
        let router = Router::new(MockNavigator::default(), NavigationGuard::new(store, config));

        let err = router.navigate("/register", HistoryMode::Push).unwrap_err();
        assert_eq!(err, NavigationError::RedirectLoop("/register".to_string()));
        assert!(router.navigator().log.borrow().is_empty());
    }
}
