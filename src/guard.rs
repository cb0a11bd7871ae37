//! 导航守卫
//!
//! 每次路由切换前执行一次，结果只可能是放行、重定向到登录页、重定向到落地页三者之一。

use std::rc::Rc;

use crate::config::ClientConfig;
use crate::route::{AppRoute, LOGIN_PATH, Location, REDIRECT_QUERY_KEY};
use crate::session::CredentialStore;

/// 守卫的判定结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// 目标需要认证但未登录；携带原始地址作为 `redirect` 参数
    RedirectToLogin(Location),
    /// 已登录却访问登录 / 注册页
    RedirectToLanding(Location),
}

impl GuardDecision {
    pub fn redirect_target(&self) -> Option<&Location> {
        match self {
            GuardDecision::Allow => None,
            GuardDecision::RedirectToLogin(to) | GuardDecision::RedirectToLanding(to) => Some(to),
        }
    }
}

/// **核心守卫逻辑**：纯函数，只依赖目标和认证状态
pub fn decide(to: &Location, route: &AppRoute, authenticated: bool, landing_path: &str) -> GuardDecision {
    if route.requires_auth() && !authenticated {
        return GuardDecision::RedirectToLogin(
            Location::new(LOGIN_PATH).with_query(REDIRECT_QUERY_KEY, &to.full_path()),
        );
    }

    if route.should_redirect_when_authenticated() && authenticated {
        return GuardDecision::RedirectToLanding(Location::parse(landing_path));
    }

    GuardDecision::Allow
}

/// 设置页面标题的回调
pub type TitleSink = Rc<dyn Fn(&str)>;

/// 绑定了凭据存储的守卫
#[derive(Clone)]
pub struct NavigationGuard {
    credentials: CredentialStore,
    config: ClientConfig,
    title_sink: Option<TitleSink>,
}

impl NavigationGuard {
    pub fn new(credentials: CredentialStore, config: ClientConfig) -> Self {
        Self {
            credentials,
            config,
            title_sink: None,
        }
    }

    pub fn with_title_sink(mut self, sink: impl Fn(&str) + 'static) -> Self {
        self.title_sink = Some(Rc::new(sink));
        self
    }

    pub fn landing_path(&self) -> &str {
        &self.config.landing_path
    }

    /// 评估一次导航意图 `from -> to`
    pub fn check(&self, from: Option<&Location>, to: &Location) -> GuardDecision {
        let route = to.route();
        let authenticated = self.credentials.is_authenticated();

        log::debug!(
            "[Guard] {} -> {} (authenticated: {}, requires_auth: {})",
            from.map(|l| l.path.as_str()).unwrap_or("-"),
            to.path,
            authenticated,
            route.requires_auth()
        );

        if let (Some(title), Some(sink)) = (route.title(), &self.title_sink) {
            sink(&self.config.document_title(title));
        }

        let decision = decide(to, &route, authenticated, &self.config.landing_path);
        match &decision {
            GuardDecision::Allow => {}
            GuardDecision::RedirectToLogin(_) => {
                log::info!("[Guard] Access Denied. Redirecting to Login.")
            }
            GuardDecision::RedirectToLanding(target) => {
                log::info!("[Guard] Already authenticated. Redirecting to {}.", target.path)
            }
        }
        decision
    }
}
