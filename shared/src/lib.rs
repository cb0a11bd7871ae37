//! vidshare 前后端共享的线路契约 (Wire Contract)
//!
//! - `protocol`: `ApiRequest` 抽象与端点表
//! - `user` / `video` / `favorite` / `share`: 各资源的请求体定义
//!
//! 字段命名以后端实际接收的形状为准，各资源之间并不统一，
//! 调用方必须使用这里定义的结构，而不是假设某种统一的命名约定。

pub mod favorite;
pub mod protocol;
pub mod share;
pub mod user;
pub mod video;

pub use protocol::{ApiRequest, Endpoint, HttpMethod, Payload, endpoints};
pub use user::{AuthResponse, UserRecord};

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 所有远端调用共享的路径前缀（开发环境下由代理剥离）
pub const API_PREFIX: &str = "/api";

/// 本地持久化存储的键名
pub const TOKEN_KEY: &str = "token";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const USER_KEY: &str = "user";

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";

// =========================================================
// 分页参数 (Paging)
// =========================================================

/// 列表类接口共用的分页参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Paging {
    pub page_num: u32,
    pub page_size: u32,
}

impl Default for Paging {
    fn default() -> Self {
        Self {
            page_num: 1,
            page_size: 10,
        }
    }
}
