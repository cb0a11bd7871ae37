//! 浏览器 API 适配层
//!
//! 核心库里的抽象（存储、传输、History）在这里落到 `web_sys` / `gloo-net` 上。

pub mod history;
mod http;
pub mod router;
mod storage;

pub use history::BrowserHistory;
pub use http::FetchClient;
pub use storage::BrowserStorage;
