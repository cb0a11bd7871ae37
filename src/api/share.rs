use serde_json::Value;
use vidshare_shared::share::ShareVideoRequest;

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::request::HttpClient;

pub async fn share_video<C: HttpClient>(client: &ApiClient<C>, request: &ShareVideoRequest) -> ApiResult<Value> {
    client
        .send(request)
        .await
        .map_err(|e| e.in_op_with("share.video", &request.video_id))
}
