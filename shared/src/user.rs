use crate::protocol::{ApiRequest, HttpMethod, Payload};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 本地持久化的用户信息
///
/// 后端返回的额外字段原样保留在 `extra` 中。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "userName", alias = "user_name", default, deserialize_with = "null_as_default")]
    pub user_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// 后端会把未填写的字段写成 `null`，按缺省值处理
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl UserRecord {
    pub fn new(user_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            email: email.into(),
            ..Default::default()
        }
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }
}

/// 登录 / 注册成功后的响应载荷
///
/// 不同版本的后端把字段放在不同的位置，所以全部是可选的。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default, alias = "access_token", alias = "accessToken")]
    pub token: Option<String>,
    #[serde(rename = "refreshToken", alias = "refresh_token", default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub user: Option<UserRecord>,
    #[serde(rename = "userName", alias = "user_name", default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// =========================================================
// Request Definitions
// =========================================================

/// 注册
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub user_name: String,
    pub password: String,
    pub email: String,
    pub sex: String,
}

impl ApiRequest for CreateUserRequest {
    type Response = AuthResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const PATH: &'static str = "/v1/user/create";
    const PAYLOAD: Payload = Payload::Json;
}

/// 登录
///
/// 后端的登录接口使用首字母大写的 `Password` / `Email`。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub user_name: String,
    #[serde(rename = "Password")]
    pub password: String,
    #[serde(rename = "Email", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ApiRequest for LoginRequest {
    type Response = AuthResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const PATH: &'static str = "/v1/user/login";
    const PAYLOAD: Payload = Payload::Json;
}

/// 获取用户信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetUserInfoRequest {
    #[serde(skip)]
    pub user_id: String,
}

impl ApiRequest for GetUserInfoRequest {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Get;
    const PATH: &'static str = "/user/info/{user_id}";
    const PAYLOAD: Payload = Payload::Empty;

    fn path_params(&self) -> Vec<(&'static str, String)> {
        vec![("user_id", self.user_id.clone())]
    }
}

/// 更新用户
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub user_name: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filesize: Option<u64>,
}

impl ApiRequest for UpdateUserRequest {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Put;
    const PATH: &'static str = "/user/update";
    const PAYLOAD: Payload = Payload::Json;
}

/// 删除用户
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteUserRequest {
    #[serde(skip)]
    pub user_id: String,
}

impl ApiRequest for DeleteUserRequest {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Delete;
    const PATH: &'static str = "/user/delete/{user_id}";
    const PAYLOAD: Payload = Payload::Empty;

    fn path_params(&self) -> Vec<(&'static str, String)> {
        vec![("user_id", self.user_id.clone())]
    }
}

/// 查询用户，参数原样透传为查询字符串
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryUserRequest(pub BTreeMap<String, String>);

impl ApiRequest for QueryUserRequest {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Get;
    const PATH: &'static str = "/user/query";
    const PAYLOAD: Payload = Payload::Query;
}

/// 发送验证码
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendCodeRequest {
    pub email: String,
}

impl ApiRequest for SendCodeRequest {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Post;
    const PATH: &'static str = "/user/send-code";
    const PAYLOAD: Payload = Payload::Json;
}

/// 校验验证码
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyCodeRequest {
    pub email: String,
    pub code: String,
}

impl ApiRequest for VerifyCodeRequest {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Post;
    const PATH: &'static str = "/user/verify-code";
    const PAYLOAD: Payload = Payload::Json;
}

/// 检查用户名 / 邮箱是否已被占用
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckUserExistsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ApiRequest for CheckUserExistsRequest {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Get;
    const PATH: &'static str = "/v1/user/exists";
    const PAYLOAD: Payload = Payload::Query;
}
