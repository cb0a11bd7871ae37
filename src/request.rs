use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;

pub use vidshare_shared::HttpMethod;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

/// 传输层错误：请求没有拿到任何 HTTP 响应
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request could not be built: {0}")]
    InvalidRequest(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
}

/// 通用 HTTP 请求结构
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
    /// 由传输实现负责执行的超时
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            body: None,
            timeout: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body.to_string());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// HTTP 客户端特性 (Trait)
/// 使用 async_trait 以支持异步调用，(?Send) 是因为浏览器环境下 fetch 的 Future 不是 Send 的
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[async_trait::async_trait(?Send)]
impl<T: HttpClient + ?Sized> HttpClient for std::rc::Rc<T> {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(req).await
    }
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    enum Mocked {
        Respond(u16, String),
        Fail(fn() -> TransportError),
    }

    pub struct MockHttpClient {
        // (Method + URL 去掉查询串) -> 依次返回的响应队列，最后一个会被重复使用
        responses: RefCell<HashMap<String, VecDeque<Mocked>>>,
        /// 记录发出的请求
        pub requests: RefCell<Vec<HttpRequest>>,
    }

    impl MockHttpClient {
        pub fn new() -> Self {
            Self {
                responses: RefCell::new(HashMap::new()),
                requests: RefCell::new(Vec::new()),
            }
        }

        fn key(method: HttpMethod, url: &str) -> String {
            let base = url.split('?').next().unwrap_or(url);
            format!("{} {}", method.as_str(), base)
        }

        pub fn mock_response(&self, method: HttpMethod, url: &str, status: u16, body: serde_json::Value) {
            self.mock_raw(method, url, status, &body.to_string());
        }

        pub fn mock_raw(&self, method: HttpMethod, url: &str, status: u16, body: &str) {
            self.responses
                .borrow_mut()
                .entry(Self::key(method, url))
                .or_default()
                .push_back(Mocked::Respond(status, body.to_string()));
        }

        pub fn mock_failure(&self, method: HttpMethod, url: &str, error: fn() -> TransportError) {
            self.responses
                .borrow_mut()
                .entry(Self::key(method, url))
                .or_default()
                .push_back(Mocked::Fail(error));
        }

        pub fn last_request(&self) -> HttpRequest {
            self.requests.borrow().last().cloned().expect("no request sent")
        }

        pub fn sent_paths(&self) -> Vec<String> {
            self.requests
                .borrow()
                .iter()
                .map(|r| format!("{} {}", r.method.as_str(), r.url))
                .collect()
        }
    }

    #[async_trait::async_trait(?Send)]
    impl HttpClient for MockHttpClient {
        async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
            let key = Self::key(req.method, &req.url);
            self.requests.borrow_mut().push(req);

            let mut responses = self.responses.borrow_mut();
            let Some(queue) = responses.get_mut(&key) else {
                return Ok(HttpResponse {
                    status: 404,
                    body: "Not Found".to_string(),
                });
            };
            let mocked = if queue.len() > 1 {
                queue.pop_front()
            } else {
                None
            };
            let current = mocked.as_ref().or(queue.front());
            match current {
                Some(Mocked::Respond(status, body)) => Ok(HttpResponse {
                    status: *status,
                    body: body.clone(),
                }),
                Some(Mocked::Fail(error)) => Err(error()),
                None => Ok(HttpResponse {
                    status: 404,
                    body: "Not Found".to_string(),
                }),
            }
        }
    }

    #[test]
    fn test_response_helpers() {
        let ok = HttpResponse {
            status: 204,
            body: String::new(),
        };
        assert!(ok.is_success());
        let err = HttpResponse {
            status: 401,
            body: "{\"msg\":\"expired\"}".to_string(),
        };
        assert!(!err.is_success());
        let value: serde_json::Value = err.json().unwrap();
        assert_eq!(value["msg"], "expired");
    }

    #[test]
    fn test_timeout_message() {
        let err = TransportError::Timeout(Duration::from_millis(10_000));
        assert_eq!(err.to_string(), "request timed out after 10000ms");
    }
}
