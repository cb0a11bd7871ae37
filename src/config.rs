//! 客户端运行时配置
//!
//! 默认值集中在常量里；部署方可以通过 `from_lookup` 注入的变量覆盖它们
//! （前端在构建时从环境变量读取）。

use std::time::Duration;

use vidshare_shared::API_PREFIX;

use crate::route::AppRoute;

/// 这些是默认值，如果注入的变量中没有定义，则使用这些值
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_LANDING_PATH: &str = "/video";
pub const DEFAULT_TITLE_SUFFIX: &str = "Video Platform";

pub const VAR_API_BASE: &str = "VIDSHARE_API_BASE";
pub const VAR_TIMEOUT_MS: &str = "VIDSHARE_TIMEOUT_MS";
pub const VAR_LANDING_PATH: &str = "VIDSHARE_LANDING_PATH";
pub const VAR_TITLE_SUFFIX: &str = "VIDSHARE_TITLE_SUFFIX";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// 所有 API 请求的前缀，例如 `/api` 或 `https://example.com/api`
    pub api_base: String,
    /// 单次请求的超时时间
    pub timeout: Duration,
    /// 已登录用户的默认落地页
    pub landing_path: String,
    /// 页面标题后缀: `<title> - <suffix>`
    pub title_suffix: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: API_PREFIX.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            landing_path: DEFAULT_LANDING_PATH.to_string(),
            title_suffix: DEFAULT_TITLE_SUFFIX.to_string(),
        }
    }
}

impl ClientConfig {
    /// 通过变量查找函数构建配置，读不到或非法时使用默认值
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_base = non_empty(VAR_API_BASE)
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base);

        let timeout = match non_empty(VAR_TIMEOUT_MS) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => Duration::from_millis(ms),
                _ => {
                    log::warn!("[Config] Invalid {}={:?}, using default.", VAR_TIMEOUT_MS, raw);
                    defaults.timeout
                }
            },
            None => defaults.timeout,
        };

        let landing_path = match non_empty(VAR_LANDING_PATH) {
            Some(path) if is_valid_landing(&path) => path,
            Some(path) => {
                log::warn!("[Config] Invalid landing path {:?}, using default.", path);
                defaults.landing_path
            }
            None => defaults.landing_path,
        };

        Self {
            api_base,
            timeout,
            landing_path,
            title_suffix: non_empty(VAR_TITLE_SUFFIX).unwrap_or(defaults.title_suffix),
        }
    }

    pub fn document_title(&self, title: &str) -> String {
        format!("{} - {}", title, self.title_suffix)
    }
}

/// 落地页必须是已登录用户能停留的页面，否则登录 / 注册页的重定向会循环
fn is_valid_landing(path: &str) -> bool {
    path.starts_with('/')
        && !matches!(
            AppRoute::from_path(path),
            AppRoute::Login | AppRoute::Register | AppRoute::Root | AppRoute::NotFound
        )
}
