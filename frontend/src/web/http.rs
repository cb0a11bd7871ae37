//! HTTP 传输模块
//!
//! 基于 `gloo-net` 的 fetch 实现核心库的 `HttpClient`。
//! 超时由 `gloo-timers` 计时，超时后通过 `AbortController` 取消请求。

use std::time::Duration;

use futures::future::{Either, select};
use gloo_net::http::{Request, RequestBuilder};
use gloo_timers::future::TimeoutFuture;
use vidshare::{HttpClient, HttpMethod, HttpRequest, HttpResponse, TransportError};

/// 浏览器 fetch 客户端
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchClient;

impl FetchClient {
    fn builder(req: &HttpRequest) -> RequestBuilder {
        let builder = match req.method {
            HttpMethod::Get => Request::get(&req.url),
            HttpMethod::Post => Request::post(&req.url),
            HttpMethod::Put => Request::put(&req.url),
            HttpMethod::Delete => Request::delete(&req.url),
        };
        req.headers
            .iter()
            .fold(builder, |builder, (key, value)| builder.header(key, value))
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let controller = web_sys::AbortController::new().ok();
        let signal = controller.as_ref().map(|c| c.signal());
        let builder = Self::builder(&req).abort_signal(signal.as_ref());

        let request = match req.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;

        let fetch = async move {
            let resp = request.send().await?;
            let status = resp.status();
            let body = resp.text().await?;
            Ok::<_, gloo_net::Error>(HttpResponse { status, body })
        };

        let Some(timeout) = req.timeout else {
            return fetch.await.map_err(|e| TransportError::Network(e.to_string()));
        };

        let timer = TimeoutFuture::new(millis(timeout));
        match select(Box::pin(fetch), Box::pin(timer)).await {
            Either::Left((result, _)) => result.map_err(|e| TransportError::Network(e.to_string())),
            Either::Right(_) => {
                if let Some(controller) = &controller {
                    controller.abort();
                }
                log::warn!("[Http] {} timed out", req.url);
                Err(TransportError::Timeout(timeout))
            }
        }
    }
}

fn millis(timeout: Duration) -> u32 {
    u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX)
}
