//! vidshare 客户端核心
//!
//! 与 DOM 无关的部分：凭据存储、API 客户端、路由表、导航守卫与导航工具。
//! 浏览器适配（localStorage / fetch / History API）在 `frontend` 中实现。

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod guard;
pub mod navigation;
pub mod request;
pub mod route;
pub mod router;
pub mod session;

// =========================================================
// 常用类型导出
// =========================================================

pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{ApiError, ApiErrorStatus, ApiResult};
pub use guard::{GuardDecision, NavigationGuard};
pub use navigation::Navigation;
pub use request::{HttpClient, HttpMethod, HttpRequest, HttpResponse, TransportError};
pub use route::{AppRoute, Location};
pub use router::{HistoryMode, NavigationError, Navigator, ResolvedRoute, Router};
pub use session::{CredentialStore, KeyValueStorage, MemoryStorage, Session, StorageError};

pub use vidshare_shared as shared;
