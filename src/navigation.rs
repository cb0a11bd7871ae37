//! 导航工具
//!
//! 对路由器的便捷封装。所有操作都是尽力而为：失败时记录日志并返回 `false`，
//! 其中登出在应用内导航失败时会退化为整页跳转，保证用户一定回到登录页。

use std::rc::Rc;

use vidshare_shared::UserRecord;

use crate::route::{DASHBOARD_PATH, LOGIN_PATH, Location, PROFILE_PATH, REDIRECT_QUERY_KEY, VIDEO_PATH};
use crate::router::{HistoryMode, Navigator, Router};
use crate::session::CredentialStore;

pub struct Navigation<N: Navigator> {
    router: Rc<Router<N>>,
    credentials: CredentialStore,
}

impl<N: Navigator> Clone for Navigation<N> {
    fn clone(&self) -> Self {
        Self {
            router: self.router.clone(),
            credentials: self.credentials.clone(),
        }
    }
}

impl<N: Navigator> Navigation<N> {
    pub fn new(router: Rc<Router<N>>, credentials: CredentialStore) -> Self {
        Self { router, credentials }
    }

    pub fn router(&self) -> &Rc<Router<N>> {
        &self.router
    }

    /// 安全导航到指定路径
    pub fn navigate_to(&self, to: &str, replace: bool) -> bool {
        let mode = if replace {
            HistoryMode::Replace
        } else {
            HistoryMode::Push
        };
        match self.router.navigate(to, mode) {
            Ok(_) => true,
            Err(e) => {
                log::error!("Navigation failed: {}", e);
                false
            }
        }
    }

    /// 登录后跳转
    ///
    /// 优先使用当前地址中的 `redirect` 参数（仅限应用内路径），
    /// 否则使用 `fallback`，再否则使用配置的落地页。
    pub fn navigate_after_login(&self, fallback: Option<&str>) -> bool {
        let fallback = fallback
            .map(str::to_string)
            .unwrap_or_else(|| self.router.guard().landing_path().to_string());

        let current = self.router.current().location;
        let target = current
            .query_value(REDIRECT_QUERY_KEY)
            .filter(|r| Location::is_in_app_path(r))
            .map(str::to_string)
            .unwrap_or_else(|| fallback.clone());

        log::info!("Navigating after login to: {}", target);
        match self.router.navigate(&target, HistoryMode::Push) {
            Ok(_) => true,
            Err(e) => {
                log::error!("Post-login navigation failed: {}", e);
                match self.router.navigate(&fallback, HistoryMode::Push) {
                    Ok(_) => true,
                    Err(e) => {
                        log::error!("Fallback navigation failed: {}", e);
                        false
                    }
                }
            }
        }
    }

    /// 登出并跳转到登录页
    pub fn logout(&self) -> bool {
        self.credentials.clear();

        match self.router.navigate(LOGIN_PATH, HistoryMode::Replace) {
            Ok(_) => true,
            Err(e) => {
                log::error!("Logout navigation failed: {}", e);
                // 强制整页跳转
                self.router.navigator().hard_redirect(LOGIN_PATH);
                false
            }
        }
    }

    /// 检查当前路由是否需要认证
    pub fn requires_auth(&self) -> bool {
        self.router.current().route.requires_auth()
    }

    pub fn current_route_name(&self) -> &'static str {
        self.router.current().route.name()
    }

    pub fn current_path(&self) -> String {
        self.router.current().location.path
    }

    /// 返回上一页；没有历史记录时跳转到面板
    pub fn go_back(&self) -> bool {
        if self.router.navigator().history_len() > 1 {
            match self.router.back() {
                Ok(()) => true,
                Err(e) => {
                    log::error!("Navigation failed: {}", e);
                    false
                }
            }
        } else {
            self.navigate_to(DASHBOARD_PATH, false)
        }
    }

    pub fn go_to_video(&self, video_id: Option<&str>) -> bool {
        match video_id {
            Some(id) if !id.is_empty() => self.navigate_to(&format!("{}/{}", VIDEO_PATH, id), false),
            _ => self.navigate_to(VIDEO_PATH, false),
        }
    }

    pub fn go_to_profile(&self) -> bool {
        self.navigate_to(PROFILE_PATH, false)
    }

    pub fn go_to_dashboard(&self) -> bool {
        self.navigate_to(DASHBOARD_PATH, false)
    }

    // --- 守卫相关的查询 ---

    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_authenticated()
    }

    pub fn user_info(&self) -> Option<UserRecord> {
        self.credentials.user()
    }

    /// 检查用户权限
    pub fn has_permission(&self, permission: &str) -> bool {
        self.user_info()
            .is_some_and(|user| user.has_permission(permission))
    }
}
