use crate::protocol::{ApiRequest, HttpMethod, Payload};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 把视频分享给另一个用户
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareVideoRequest {
    pub video_id: String,
    pub to_user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiRequest for ShareVideoRequest {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Post;
    const PATH: &'static str = "/v1/share/video";
    const PAYLOAD: Payload = Payload::Json;
}
