//! History API 封装模块
//!
//! 所有对 `window.history` / `window.location` 的操作都集中在此模块。

use vidshare::{Location, NavigationError, Navigator};
use wasm_bindgen::JsValue;

fn history(path: &str) -> Result<web_sys::History, NavigationError> {
    web_sys::window()
        .ok_or_else(|| history_error(path, "window is not available".to_string()))?
        .history()
        .map_err(|e| history_error(path, format!("{:?}", e)))
}

fn history_error(path: &str, reason: String) -> NavigationError {
    NavigationError::History {
        path: path.to_string(),
        reason,
    }
}

/// 当前浏览器地址（路径 + 查询串）
pub fn current_location() -> Location {
    let Some(location) = web_sys::window().map(|w| w.location()) else {
        return Location::new("/");
    };
    let path = location.pathname().unwrap_or_else(|_| "/".to_string());
    let search = location.search().unwrap_or_default();
    Location::parse(&format!("{}{}", path, search))
}

/// 设置文档标题
pub fn set_document_title(title: &str) {
    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        document.set_title(title);
    }
}

/// 基于 `window.history` 的 `Navigator`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserHistory;

impl Navigator for BrowserHistory {
    fn push(&self, location: &Location) -> Result<(), NavigationError> {
        let path = location.full_path();
        history(&path)?
            .push_state_with_url(&JsValue::NULL, "", Some(&path))
            .map_err(|e| history_error(&path, format!("{:?}", e)))
    }

    fn replace(&self, location: &Location) -> Result<(), NavigationError> {
        let path = location.full_path();
        history(&path)?
            .replace_state_with_url(&JsValue::NULL, "", Some(&path))
            .map_err(|e| history_error(&path, format!("{:?}", e)))
    }

    fn back(&self) -> Result<(), NavigationError> {
        history("..")?
            .back()
            .map_err(|e| history_error("..", format!("{:?}", e)))
    }

    fn history_len(&self) -> usize {
        history("")
            .ok()
            .and_then(|h| h.length().ok())
            .unwrap_or(0) as usize
    }

    fn hard_redirect(&self, path: &str) {
        log::warn!("[Router] Forcing full page navigation to {}", path);
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(path);
        }
    }
}
