//! 凭据存储模块
//!
//! 访问令牌、刷新令牌、用户信息分别存放在三个独立的键下。
//! 没有跨键事务：写入中途失败时，已经写入的键不会回滚。
//! 多个标签页同时写入时以最后一次写入为准。

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use vidshare_shared::{AuthResponse, REFRESH_TOKEN_KEY, TOKEN_KEY, USER_KEY, UserRecord};

// =========================================================
// 存储抽象 (Storage Abstraction)
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("storage is not available")]
    Unavailable,
    #[error("failed to write `{key}`: {reason}")]
    WriteFailed { key: String, reason: String },
    #[error("failed to encode `{key}`: {reason}")]
    Encode { key: String, reason: String },
}

/// 同步的键值存储，浏览器中对应 `window.localStorage`
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str);
}

/// 进程内存储，用于测试和非浏览器环境
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

// =========================================================
// 会话模型
// =========================================================

/// 当前会话的快照
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub user: Option<UserRecord>,
}

impl Session {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            access_token: Some(token.into()),
            ..Default::default()
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

// =========================================================
// 凭据存储 (Credential Store)
// =========================================================

/// 会话存储的唯一入口
///
/// 克隆开销很小，所有克隆共享同一个底层存储。
#[derive(Clone)]
pub struct CredentialStore {
    storage: Rc<dyn KeyValueStorage>,
}

impl CredentialStore {
    pub fn new(storage: impl KeyValueStorage + 'static) -> Self {
        Self {
            storage: Rc::new(storage),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }

    /// 写入会话中存在的字段，缺省字段保持不变
    pub fn save(&self, session: &Session) -> Result<(), StorageError> {
        if let Some(token) = session.access_token.as_deref().filter(|t| !t.is_empty()) {
            self.storage.set(TOKEN_KEY, token)?;
            log::debug!("Token saved successfully");
        }
        if let Some(refresh) = session.refresh_token.as_deref().filter(|t| !t.is_empty()) {
            self.storage.set(REFRESH_TOKEN_KEY, refresh)?;
            log::debug!("Refresh token saved successfully");
        }
        if let Some(user) = &session.user {
            self.save_user(user)?;
        }
        Ok(())
    }

    pub fn save_user(&self, user: &UserRecord) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(user).map_err(|e| StorageError::Encode {
            key: USER_KEY.to_string(),
            reason: e.to_string(),
        })?;
        self.storage.set(USER_KEY, &encoded)?;
        log::debug!("User info saved successfully");
        Ok(())
    }

    /// 登录 / 注册成功后保存认证信息
    ///
    /// 响应中没有用户对象但带有用户名时，生成一个只含用户名和邮箱的基本记录。
    pub fn save_auth_response(&self, resp: &AuthResponse) -> Result<(), StorageError> {
        let user = resp.user.clone().or_else(|| {
            resp.user_name.as_ref().map(|name| {
                UserRecord::new(name.clone(), resp.email.clone().unwrap_or_default())
            })
        });
        let session = Session {
            access_token: resp.token.clone(),
            refresh_token: resp.refresh_token.clone(),
            user,
        };
        self.save(&session)?;
        log::info!(
            "Auth data saved: token={} refresh_token={} user={}",
            session.access_token.is_some(),
            session.refresh_token.is_some(),
            session.user.is_some()
        );
        Ok(())
    }

    pub fn read(&self) -> Session {
        Session {
            access_token: self.access_token(),
            refresh_token: self.refresh_token(),
            user: self.user(),
        }
    }

    pub fn access_token(&self) -> Option<String> {
        self.storage.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.storage.get(REFRESH_TOKEN_KEY).filter(|t| !t.is_empty())
    }

    /// 读取用户信息；存储内容损坏时记录日志并返回 None
    pub fn user(&self) -> Option<UserRecord> {
        let raw = self.storage.get(USER_KEY)?;
        match serde_json::from_str::<UserRecord>(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                log::error!("Failed to parse user info: {}", e);
                None
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }

    /// 清除所有认证信息（幂等）
    pub fn clear(&self) {
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(REFRESH_TOKEN_KEY);
        self.storage.remove(USER_KEY);
        log::debug!("All auth data cleared");
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
