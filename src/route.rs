//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由及其属性，路由表在启动时确定，运行期间不会增删。

use std::fmt::{self, Display};

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

// =========================================================
// 路由表 (Static Route Table)
// =========================================================

/// 路由描述
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDescriptor {
    /// 路径模式，`:id` 表示一个动态段
    pub path: &'static str,
    pub name: &'static str,
    pub requires_auth: bool,
    pub title: Option<&'static str>,
}

pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const PROFILE_PATH: &str = "/profile";
pub const VIDEO_PATH: &str = "/video";

/// 登录后回跳地址所在的查询参数
pub const REDIRECT_QUERY_KEY: &str = "redirect";

pub static ROUTES: &[RouteDescriptor] = &[
    RouteDescriptor {
        path: "/login",
        name: "Login",
        requires_auth: false,
        title: Some("Login"),
    },
    RouteDescriptor {
        path: "/register",
        name: "Register",
        requires_auth: false,
        title: Some("Register"),
    },
    RouteDescriptor {
        path: "/dashboard",
        name: "Dashboard",
        requires_auth: true,
        title: Some("Dashboard"),
    },
    RouteDescriptor {
        path: "/profile",
        name: "Profile",
        requires_auth: true,
        title: Some("Profile"),
    },
    RouteDescriptor {
        path: "/video",
        name: "VideoPage",
        requires_auth: true,
        title: Some("Video Player"),
    },
    RouteDescriptor {
        path: "/video/:id",
        name: "VideoDetail",
        requires_auth: true,
        title: Some("Video Player"),
    },
    RouteDescriptor {
        path: "/token-test",
        name: "TokenTest",
        requires_auth: false,
        title: Some("Token Test"),
    },
];

const ROOT: RouteDescriptor = RouteDescriptor {
    path: "/",
    name: "Root",
    requires_auth: false,
    title: None,
};

const NOT_FOUND: RouteDescriptor = RouteDescriptor {
    path: "/:pathMatch(.*)*",
    name: "NotFound",
    requires_auth: false,
    title: None,
};

// =========================================================
// 应用路由
// =========================================================

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// `/`，重定向到登录页
    Root,
    /// 登录页面 (默认路由)
    #[default]
    Login,
    Register,
    /// 控制面板 (需要认证)
    Dashboard,
    Profile,
    /// 视频列表 (需要认证)
    Video,
    /// 单个视频 (需要认证)
    VideoDetail { id: String },
    /// 令牌调试页
    TokenTest,
    /// 页面未找到，重定向到登录页
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举（忽略查询串）
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() {
            return if path.starts_with('/') {
                Self::Root
            } else {
                Self::NotFound
            };
        }

        let segments: Vec<&str> = trimmed.split('/').skip(1).collect();
        let is = |a: &str, b: &str| a.eq_ignore_ascii_case(b);
        match segments.as_slice() {
            [s] if is(*s, "login") => Self::Login,
            [s] if is(*s, "register") => Self::Register,
            [s] if is(*s, "dashboard") => Self::Dashboard,
            [s] if is(*s, "profile") => Self::Profile,
            [s] if is(*s, "video") => Self::Video,
            [s, id] if is(*s, "video") && !id.is_empty() => Self::VideoDetail { id: id.to_string() },
            [s] if is(*s, "token-test") => Self::TokenTest,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Root => "/".to_string(),
            Self::VideoDetail { id } => format!("{}/{}", VIDEO_PATH, id),
            Self::NotFound => "/404".to_string(),
            other => other.descriptor().path.to_string(),
        }
    }

    pub fn descriptor(&self) -> &'static RouteDescriptor {
        let name = match self {
            Self::Root => return &ROOT,
            Self::NotFound => return &NOT_FOUND,
            Self::Login => "Login",
            Self::Register => "Register",
            Self::Dashboard => "Dashboard",
            Self::Profile => "Profile",
            Self::Video => "VideoPage",
            Self::VideoDetail { .. } => "VideoDetail",
            Self::TokenTest => "TokenTest",
        };
        ROUTES
            .iter()
            .find(|r| r.name == name)
            .unwrap_or(&NOT_FOUND)
    }

    pub fn name(&self) -> &'static str {
        self.descriptor().name
    }

    pub fn title(&self) -> Option<&'static str> {
        self.descriptor().title
    }

    /// **核心守卫属性：该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        self.descriptor().requires_auth
    }

    /// 定义已认证用户是否应该离开此路由（登录页、注册页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }

    /// 路由表中的静态重定向
    pub fn static_redirect(&self) -> Option<&'static str> {
        match self {
            Self::Root | Self::NotFound => Some(LOGIN_PATH),
            _ => None,
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

// =========================================================
// 位置 (Location)
// =========================================================

/// 一次导航的目标：路径 + 已解码的查询参数
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl Location {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    /// 解析 `path?query#hash` 形式的地址，hash 部分被丢弃
    pub fn parse(full: &str) -> Self {
        let without_hash = full.split('#').next().unwrap_or_default();
        let (path, query) = match without_hash.split_once('?') {
            Some((path, query)) => (path, query),
            None => (without_hash, ""),
        };
        Self {
            path: path.to_string(),
            query: url::form_urlencoded::parse(query.as_bytes())
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect(),
        }
    }

    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.retain(|(k, _)| k != key);
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn route(&self) -> AppRoute {
        AppRoute::from_path(&self.path)
    }

    /// 路径 + 编码后的查询串
    pub fn full_path(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query: Vec<String> = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", encode_query_component(k), encode_query_component(v)))
            .collect();
        format!("{}?{}", self.path, query.join("&"))
    }

    /// 是否为应用内的绝对路径（拒绝 `//host` 和完整 URL）
    pub fn is_in_app_path(target: &str) -> bool {
        target.starts_with('/') && !target.starts_with("//") && !target.contains("://")
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_path())
    }
}

impl From<&AppRoute> for Location {
    fn from(route: &AppRoute) -> Self {
        Location::new(route.to_path())
    }
}

/// 查询参数编码：保留路径中常见的可读字符（`/`、`:` 等），与浏览器地址栏一致
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/')
    .remove(b':')
    .remove(b'@')
    .remove(b'!')
    .remove(b'$')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b',')
    .remove(b';')
    .remove(b'?');

fn encode_query_component(raw: &str) -> String {
    utf8_percent_encode(raw, QUERY_COMPONENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Root);
        assert_eq!(AppRoute::from_path("/login"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/login/"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/Login"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/register"), AppRoute::Register);
        assert_eq!(AppRoute::from_path("/video"), AppRoute::Video);
        assert_eq!(
            AppRoute::from_path("/video/7?t=3"),
            AppRoute::VideoDetail { id: "7".into() }
        );
        assert_eq!(AppRoute::from_path("/video/7/extra"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path(""), AppRoute::NotFound);
    }

    #[test]
    fn test_route_table_flags() {
        let protected: Vec<&str> = ROUTES
            .iter()
            .filter(|r| r.requires_auth)
            .map(|r| r.path)
            .collect();
        assert_eq!(protected, vec!["/dashboard", "/profile", "/video", "/video/:id"]);

        assert!(!AppRoute::Login.requires_auth());
        assert!(!AppRoute::Register.requires_auth());
        assert!(AppRoute::VideoDetail { id: "1".into() }.requires_auth());
        assert_eq!(AppRoute::VideoDetail { id: "1".into() }.name(), "VideoDetail");
        assert_eq!(AppRoute::Video.title(), Some("Video Player"));
        assert_eq!(AppRoute::NotFound.title(), None);
    }

    #[test]
    fn test_every_table_entry_round_trips() {
        for descriptor in ROUTES {
            let path = descriptor.path.replace(":id", "9");
            let route = AppRoute::from_path(&path);
            assert_eq!(route.descriptor(), descriptor);
            assert_eq!(route.to_path(), path);
        }
    }

    #[test]
    fn test_static_redirects() {
        assert_eq!(AppRoute::Root.static_redirect(), Some("/login"));
        assert_eq!(AppRoute::NotFound.static_redirect(), Some("/login"));
        assert_eq!(AppRoute::Profile.static_redirect(), None);
    }

    #[test]
    fn test_location_query_encoding() {
        let loc = Location::new("/login").with_query(REDIRECT_QUERY_KEY, "/profile");
        assert_eq!(loc.full_path(), "/login?redirect=/profile");

        let nested = Location::new("/login").with_query(REDIRECT_QUERY_KEY, "/video?q=a b&x=1");
        assert_eq!(nested.full_path(), "/login?redirect=/video?q%3Da%20b%26x%3D1");

        let parsed = Location::parse(&nested.full_path());
        assert_eq!(parsed, nested);
        assert_eq!(parsed.query_value(REDIRECT_QUERY_KEY), Some("/video?q=a b&x=1"));
    }

    #[test]
    fn test_location_parse_drops_hash() {
        let loc = Location::parse("/video/7?autoplay=1#comments");
        assert_eq!(loc.path, "/video/7");
        assert_eq!(loc.query_value("autoplay"), Some("1"));
        assert_eq!(loc.full_path(), "/video/7?autoplay=1");
    }

    #[test]
    fn test_in_app_path() {
        assert!(Location::is_in_app_path("/video/7"));
        assert!(!Location::is_in_app_path("//evil.example"));
        assert!(!Location::is_in_app_path("https://evil.example/"));
        assert!(!Location::is_in_app_path("video"));
    }

    #[test]
    fn test_query_encoding_escapes_reserved_and_utf8() {
        assert_eq!(encode_query_component("/video/7?t=1"), "/video/7?t%3D1");
        assert_eq!(encode_query_component("a+b#c&d"), "a%2Bb%23c%26d");
        assert_eq!(encode_query_component("视频"), "%E8%A7%86%E9%A2%91");
    }
}
