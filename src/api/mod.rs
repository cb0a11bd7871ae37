//! 领域 API
//!
//! 每个函数对应一次远端调用：把参数交给 `ApiClient`，错误原样返回，
//! 只在追踪栈上追加操作名。请求体的线路形状由 `vidshare_shared` 中的结构决定。

pub mod favorite;
pub mod share;
pub mod user;
pub mod video;

pub use vidshare_shared::Paging;
