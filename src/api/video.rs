use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;
use vidshare_shared::Paging;
use vidshare_shared::video::{
    DeleteVideoRequest, FeedRequest, ListVideosRequest, PopularVideosRequest, PublishCancelRequest,
    PublishChunkRequest, PublishCompleteRequest, PublishStartRequest, PublishStartResponse,
    RecommendVideosRequest, SearchVideosRequest, StreamVideoRequest, VisitVideoRequest,
};

use crate::client::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::request::HttpClient;

/// 分片上传的默认分片大小 (1 MiB)
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;

// =========================================================
// 浏览
// =========================================================

pub async fn feed<C: HttpClient>(client: &ApiClient<C>, latest_time: Option<i64>) -> ApiResult<Value> {
    client
        .send(&FeedRequest { latest_time })
        .await
        .map_err(|e| e.in_op("video.feed"))
}

pub async fn list_videos<C: HttpClient>(client: &ApiClient<C>, user_id: &str, paging: Paging) -> ApiResult<Value> {
    let request = ListVideosRequest {
        user_id: user_id.to_string(),
        paging,
    };
    client.send(&request).await.map_err(|e| e.in_op("video.list"))
}

pub async fn popular_videos<C: HttpClient>(client: &ApiClient<C>, paging: Paging) -> ApiResult<Value> {
    client
        .send(&PopularVideosRequest { paging })
        .await
        .map_err(|e| e.in_op("video.popular"))
}

pub async fn recommend_videos<C: HttpClient>(client: &ApiClient<C>, paging: Paging) -> ApiResult<Value> {
    client
        .send(&RecommendVideosRequest { paging })
        .await
        .map_err(|e| e.in_op("video.recommend"))
}

pub async fn search_videos<C: HttpClient>(client: &ApiClient<C>, request: &SearchVideosRequest) -> ApiResult<Value> {
    client.send(request).await.map_err(|e| e.in_op("video.search"))
}

pub async fn visit_video<C: HttpClient>(client: &ApiClient<C>, video_id: &str) -> ApiResult<Value> {
    let request = VisitVideoRequest {
        video_id: video_id.to_string(),
    };
    client
        .send(&request)
        .await
        .map_err(|e| e.in_op_with("video.visit", video_id))
}

pub async fn stream_video<C: HttpClient>(client: &ApiClient<C>, video_id: &str) -> ApiResult<Value> {
    let request = StreamVideoRequest {
        video_id: video_id.to_string(),
    };
    client
        .send(&request)
        .await
        .map_err(|e| e.in_op_with("video.stream", video_id))
}

pub async fn delete_video<C: HttpClient>(client: &ApiClient<C>, video_id: &str) -> ApiResult<Value> {
    let request = DeleteVideoRequest {
        video_id: video_id.to_string(),
    };
    client
        .send(&request)
        .await
        .map_err(|e| e.in_op_with("video.delete", video_id))
}

// =========================================================
// 分片发布
// =========================================================

pub async fn publish_start<C: HttpClient>(
    client: &ApiClient<C>,
    request: &PublishStartRequest,
) -> ApiResult<PublishStartResponse> {
    client.send(request).await.map_err(|e| e.in_op("video.publish_start"))
}

pub async fn publish_chunk<C: HttpClient>(client: &ApiClient<C>, request: &PublishChunkRequest) -> ApiResult<Value> {
    client
        .send(request)
        .await
        .map_err(|e| e.in_op_with("video.publish_chunk", request.chunk_number.to_string()))
}

pub async fn publish_complete<C: HttpClient>(client: &ApiClient<C>, upload_id: &str) -> ApiResult<Value> {
    let request = PublishCompleteRequest {
        upload_id: upload_id.to_string(),
    };
    client
        .send(&request)
        .await
        .map_err(|e| e.in_op("video.publish_complete"))
}

pub async fn publish_cancel<C: HttpClient>(client: &ApiClient<C>, upload_id: &str) -> ApiResult<Value> {
    let request = PublishCancelRequest {
        upload_id: upload_id.to_string(),
    };
    client
        .send(&request)
        .await
        .map_err(|e| e.in_op("video.publish_cancel"))
}

/// 待发布视频的元数据
#[derive(Debug, Clone, Default)]
pub struct NewVideo {
    pub title: String,
    pub description: String,
}

/// 完整的发布流程：start -> uploading x N -> complete
///
/// 任一分片失败时发出一次 cancel（结果忽略），并返回该分片的错误。
/// 不重试。
pub async fn publish_video<C: HttpClient>(
    client: &ApiClient<C>,
    meta: &NewVideo,
    bytes: &[u8],
    chunk_size: usize,
) -> ApiResult<Value> {
    if bytes.is_empty() {
        return Err(ApiError::encode("cannot publish an empty file").in_op("video.publish"));
    }
    let chunk_size = if chunk_size == 0 { DEFAULT_CHUNK_SIZE } else { chunk_size };
    let chunk_total = bytes.len().div_ceil(chunk_size);

    let start = PublishStartRequest {
        title: meta.title.clone(),
        description: meta.description.clone(),
        chunk_total: chunk_total as u32,
        file_size: bytes.len() as u64,
    };
    let upload_id = publish_start(client, &start)
        .await
        .map_err(|e| e.in_op("video.publish"))?
        .upload_id;

    log::info!("[Upload] {} started, {} chunk(s)", upload_id, chunk_total);

    for (index, chunk) in bytes.chunks(chunk_size).enumerate() {
        let request = PublishChunkRequest {
            upload_id: upload_id.clone(),
            chunk_number: index as u32 + 1,
            data: STANDARD.encode(chunk),
        };
        if let Err(e) = publish_chunk(client, &request).await {
            log::warn!("[Upload] chunk {} of {} failed, cancelling", index + 1, upload_id);
            if let Err(cancel_err) = publish_cancel(client, &upload_id).await {
                log::warn!("[Upload] cancel failed: {}", cancel_err);
            }
            return Err(e.in_op("video.publish"));
        }
    }

    publish_complete(client, &upload_id)
        .await
        .map_err(|e| e.in_op("video.publish"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::request::HttpMethod;
    use crate::request::tests::MockHttpClient;
    use crate::session::CredentialStore;
    use serde_json::json;
    use std::rc::Rc;

    fn setup() -> ApiClient<Rc<MockHttpClient>> {
        ApiClient::new(
            Rc::new(MockHttpClient::new()),
            CredentialStore::in_memory(),
            &ClientConfig::default(),
        )
    }

    fn bodies(client: &ApiClient<Rc<MockHttpClient>>, url: &str) -> Vec<Value> {
        client
            .http()
            .requests
            .borrow()
            .iter()
            .filter(|r| r.url == url)
            .map(|r| serde_json::from_str(r.body.as_deref().unwrap_or("null")).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_browse_endpoints() {
        let client = setup();
        client.http().mock_response(HttpMethod::Get, "/api/v1/video/feed", 200, json!([]));

        feed(&client, Some(1700000000000)).await.unwrap();
        feed(&client, None).await.unwrap();
        let _ = list_videos(&client, "7", Paging::default()).await;
        let _ = visit_video(&client, "3").await;
        let _ = stream_video(&client, "3").await;
        let _ = delete_video(&client, "3").await;

        assert_eq!(
            client.http().sent_paths(),
            vec![
                "GET /api/v1/video/feed?latest_time=1700000000000",
                "GET /api/v1/video/feed",
                "GET /api/v1/video/list?page_num=1&page_size=10&user_id=7",
                "GET /api/v1/video/visit/3",
                "GET /api/v1/video/stream/3",
                "DELETE /api/v1/video/delete/3",
            ]
        );
    }

    #[tokio::test]
    async fn test_search_sends_json_body() {
        let client = setup();
        client.http().mock_response(HttpMethod::Post, "/api/v1/video/search", 200, json!({"items": []}));

        let request = SearchVideosRequest {
            keywords: "cats".into(),
            paging: Paging { page_num: 1, page_size: 20 },
            from_date: None,
            to_date: None,
            username: Some("bob".into()),
        };
        search_videos(&client, &request).await.unwrap();

        assert_eq!(
            bodies(&client, "/api/v1/video/search"),
            vec![json!({"keywords": "cats", "page_num": 1, "page_size": 20, "username": "bob"})]
        );
    }

    #[tokio::test]
    async fn test_publish_video_uploads_every_chunk() {
        let client = setup();
        client
            .http()
            .mock_response(HttpMethod::Post, "/api/v1/video/publish/start", 200, json!({"uuid": "up-1"}));
        client
            .http()
            .mock_response(HttpMethod::Post, "/api/v1/video/publish/uploading", 200, json!({}));
        client
            .http()
            .mock_response(HttpMethod::Post, "/api/v1/video/publish/complete", 200, json!({"video_id": "v9"}));

        let meta = NewVideo {
            title: "clip".into(),
            description: "d".into(),
        };
        let done = publish_video(&client, &meta, b"hello world", 4).await.unwrap();
        assert_eq!(done["video_id"], "v9");

        let start = &bodies(&client, "/api/v1/video/publish/start")[0];
        assert_eq!(start["chunk_total"], 3);
        assert_eq!(start["file_size"], 11);

        let chunks = bodies(&client, "/api/v1/video/publish/uploading");
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0], json!({"upload_id": "up-1", "chunk_number": 1, "data": "aGVsbA=="}));
        assert_eq!(chunks[2]["chunk_number"], 3);
        assert_eq!(chunks[2]["data"], "cmxk");

        assert_eq!(
            bodies(&client, "/api/v1/video/publish/complete"),
            vec![json!({"upload_id": "up-1"})]
        );
    }

    #[tokio::test]
    async fn test_publish_video_cancels_once_on_chunk_failure() {
        let client = setup();
        client
            .http()
            .mock_response(HttpMethod::Post, "/api/v1/video/publish/start", 200, json!({"upload_id": "up-2"}));
        client
            .http()
            .mock_response(HttpMethod::Post, "/api/v1/video/publish/uploading", 200, json!({}));
        client
            .http()
            .mock_response(HttpMethod::Post, "/api/v1/video/publish/uploading", 500, json!({"msg": "disk full"}));
        client
            .http()
            .mock_response(HttpMethod::Post, "/api/v1/video/publish/cancel", 200, json!({}));

        let err = publish_video(&client, &NewVideo::default(), &[0u8; 10], 4)
            .await
            .unwrap_err();

        assert_eq!(err.http_status(), Some(500));
        assert_eq!(err.message(), "disk full");
        assert_eq!(bodies(&client, "/api/v1/video/publish/uploading").len(), 2);
        assert_eq!(
            bodies(&client, "/api/v1/video/publish/cancel"),
            vec![json!({"upload_id": "up-2"})]
        );
        assert!(bodies(&client, "/api/v1/video/publish/complete").is_empty());
    }

    #[tokio::test]
    async fn test_publish_empty_file_sends_nothing() {
        let client = setup();
        let err = publish_video(&client, &NewVideo::default(), &[], 0).await.unwrap_err();
        assert_eq!(err.error_code(), crate::error::ApiErrorStatus::Encode.error_code());
        assert!(client.http().requests.borrow().is_empty());
    }
}
