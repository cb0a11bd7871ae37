use crate::Paging;
use crate::protocol::{ApiRequest, HttpMethod, Payload};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 视频流（按时间倒序）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedRequest {
    /// 毫秒时间戳，只返回早于该时间的视频
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_time: Option<i64>,
}

impl ApiRequest for FeedRequest {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Get;
    const PATH: &'static str = "/v1/video/feed";
    const PAYLOAD: Payload = Payload::Query;
}

/// 某个用户发布的视频
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListVideosRequest {
    pub user_id: String,
    #[serde(flatten)]
    pub paging: Paging,
}

impl ApiRequest for ListVideosRequest {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Get;
    const PATH: &'static str = "/v1/video/list";
    const PAYLOAD: Payload = Payload::Query;
}

/// 热门视频
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PopularVideosRequest {
    #[serde(flatten)]
    pub paging: Paging,
}

impl ApiRequest for PopularVideosRequest {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Get;
    const PATH: &'static str = "/v1/video/popular";
    const PAYLOAD: Payload = Payload::Query;
}

/// 搜索
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchVideosRequest {
    pub keywords: String,
    #[serde(flatten)]
    pub paging: Paging,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_date: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_date: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl ApiRequest for SearchVideosRequest {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Post;
    const PATH: &'static str = "/v1/video/search";
    const PAYLOAD: Payload = Payload::Json;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteVideoRequest {
    #[serde(skip)]
    pub video_id: String,
}

impl ApiRequest for DeleteVideoRequest {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Delete;
    const PATH: &'static str = "/v1/video/delete/{video_id}";
    const PAYLOAD: Payload = Payload::Empty;

    fn path_params(&self) -> Vec<(&'static str, String)> {
        vec![("video_id", self.video_id.clone())]
    }
}

/// 记录一次观看并返回视频详情
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitVideoRequest {
    #[serde(skip)]
    pub video_id: String,
}

impl ApiRequest for VisitVideoRequest {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Get;
    const PATH: &'static str = "/v1/video/visit/{video_id}";
    const PAYLOAD: Payload = Payload::Empty;

    fn path_params(&self) -> Vec<(&'static str, String)> {
        vec![("video_id", self.video_id.clone())]
    }
}

// =========================================================
// 分片上传 (Chunked Publish)
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishStartRequest {
    pub title: String,
    pub description: String,
    pub chunk_total: u32,
    pub file_size: u64,
}

impl ApiRequest for PublishStartRequest {
    type Response = PublishStartResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const PATH: &'static str = "/v1/video/publish/start";
    const PAYLOAD: Payload = Payload::Json;
}

/// 上传会话的标识
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishStartResponse {
    #[serde(alias = "uuid", alias = "uploadId")]
    pub upload_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishChunkRequest {
    pub upload_id: String,
    /// 从 1 开始计数
    pub chunk_number: u32,
    /// base64 编码的分片内容
    pub data: String,
}

impl ApiRequest for PublishChunkRequest {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Post;
    const PATH: &'static str = "/v1/video/publish/uploading";
    const PAYLOAD: Payload = Payload::Json;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishCompleteRequest {
    pub upload_id: String,
}

impl ApiRequest for PublishCompleteRequest {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Post;
    const PATH: &'static str = "/v1/video/publish/complete";
    const PAYLOAD: Payload = Payload::Json;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishCancelRequest {
    pub upload_id: String,
}

impl ApiRequest for PublishCancelRequest {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Post;
    const PATH: &'static str = "/v1/video/publish/cancel";
    const PAYLOAD: Payload = Payload::Json;
}

/// 推荐
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendVideosRequest {
    #[serde(flatten)]
    pub paging: Paging,
}

impl ApiRequest for RecommendVideosRequest {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Get;
    const PATH: &'static str = "/v1/video/recommend";
    const PAYLOAD: Payload = Payload::Query;
}

/// 获取播放地址
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamVideoRequest {
    #[serde(skip)]
    pub video_id: String,
}

impl ApiRequest for StreamVideoRequest {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Get;
    const PATH: &'static str = "/v1/video/stream/{video_id}";
    const PAYLOAD: Payload = Payload::Empty;

    fn path_params(&self) -> Vec<(&'static str, String)> {
        vec![("video_id", self.video_id.clone())]
    }
}
