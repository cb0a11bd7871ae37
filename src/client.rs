//! API 客户端
//!
//! 所有后端调用的唯一出口。负责：
//! - 请求拦截：拼接前缀、统一 JSON 头、超时、附加 `Authorization: Bearer <token>`
//! - 响应拦截：成功时解包载荷；401 时清空凭据并通知上层；其它错误原样交给调用方
//!
//! 不做重试，也不做令牌刷新。

use std::rc::Rc;
use std::time::Duration;

use serde_json::Value;
use vidshare_shared::{ApiRequest, CONTENT_TYPE_JSON, HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE, Payload};

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::request::{HttpClient, HttpRequest, HttpResponse};
use crate::session::CredentialStore;

type UnauthorizedHook = Rc<dyn Fn()>;

#[derive(Clone)]
pub struct ApiClient<C: HttpClient> {
    http: C,
    credentials: CredentialStore,
    base_url: String,
    timeout: Duration,
    on_unauthorized: Option<UnauthorizedHook>,
}

impl<C: HttpClient> ApiClient<C> {
    pub fn new(http: C, credentials: CredentialStore, config: &ClientConfig) -> Self {
        Self {
            http,
            credentials,
            base_url: config.api_base.clone(),
            timeout: config.timeout,
            on_unauthorized: None,
        }
    }

    /// 注册 401 回调（浏览器中用于跳转到登录页）
    pub fn on_unauthorized(mut self, hook: impl Fn() + 'static) -> Self {
        self.on_unauthorized = Some(Rc::new(hook));
        self
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// 发送一个 API 请求并解码响应载荷
    pub async fn send<R: ApiRequest>(&self, request: &R) -> ApiResult<R::Response> {
        let path = request.path();
        let req = self
            .build_request(request, &path)
            .map_err(|e| e.in_op_with("api.send", &path))?;

        log::debug!("[Api] {} {}", R::METHOD.as_str(), req.url);

        let resp = self
            .http
            .send(req)
            .await
            .map_err(|e| ApiError::from(e).in_op_with("api.send", &path))?;

        self.handle_response::<R::Response>(resp)
            .map_err(|e| e.in_op_with("api.send", &path))
    }

    // --- 请求拦截 ---
    fn build_request<R: ApiRequest>(&self, request: &R, path: &str) -> ApiResult<HttpRequest> {
        let mut url = self.url(path);
        let mut body = None;

        match R::PAYLOAD {
            Payload::Empty => {}
            Payload::Query => {
                let value = serde_json::to_value(request)
                    .map_err(|e| ApiError::encode(e.to_string()).with_source(e))?;
                let query = encode_query(&value)?;
                if !query.is_empty() {
                    url.push('?');
                    url.push_str(&query);
                }
            }
            Payload::Json => {
                let value = serde_json::to_value(request)
                    .map_err(|e| ApiError::encode(e.to_string()).with_source(e))?;
                body = Some(value);
            }
        }

        let mut req = HttpRequest::new(&url, R::METHOD)
            .with_header(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON)
            .with_timeout(self.timeout);
        if let Some(body) = body {
            req = req.with_body(body);
        }
        if let Some(token) = self.credentials.access_token() {
            req = req.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token));
        }
        Ok(req)
    }

    // --- 响应拦截 ---
    fn handle_response<T: serde::de::DeserializeOwned>(&self, resp: HttpResponse) -> ApiResult<T> {
        let payload = parse_body(&resp.body);

        if resp.is_success() {
            return serde_json::from_value(payload)
                .map_err(|e| ApiError::decode(e.to_string()).with_source(e).with_http_status(resp.status));
        }

        if resp.status == 401 {
            log::warn!("[Api] Token expired or invalid, clearing credentials.");
            self.credentials.clear();
            if let Some(hook) = &self.on_unauthorized {
                hook();
            }
            return Err(ApiError::unauthorized(error_message(&payload, resp.status)).with_body(payload));
        }

        log::warn!("[Api] Request rejected with HTTP {}", resp.status);
        Err(ApiError::rejected(resp.status, error_message(&payload, resp.status)).with_body(payload))
    }
}

/// 空响应体视为 null；非 JSON 响应体原样作为字符串
fn parse_body(body: &str) -> Value {
    if body.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}

/// 后端错误载荷里常见的消息字段
fn error_message(payload: &Value, status: u16) -> String {
    ["message", "msg", "error"]
        .iter()
        .find_map(|k| payload.get(k).and_then(Value::as_str))
        .or_else(|| payload.as_str().filter(|s| !s.is_empty()))
        .map(str::to_string)
        .unwrap_or_else(|| format!("request failed with status {}", status))
}

/// 把序列化后的对象编码为查询串。null 字段被跳过，数组重复同一个键。
fn encode_query(value: &Value) -> ApiResult<String> {
    let Value::Object(fields) = value else {
        return Err(ApiError::encode("query parameters must serialize to an object"));
    };

    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, field) in fields {
        match field {
            Value::Null => {}
            Value::Array(items) => {
                for item in items.iter().filter(|v| !v.is_null()) {
                    serializer.append_pair(key, &scalar(item));
                }
            }
            other => {
                serializer.append_pair(key, &scalar(other));
            }
        }
    }
    Ok(serializer.finish())
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
