use crate::Paging;
use crate::protocol::{ApiRequest, HttpMethod, Payload};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFavoriteRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
}

impl ApiRequest for CreateFavoriteRequest {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Post;
    const PATH: &'static str = "/v1/favorite/create";
    const PAYLOAD: Payload = Payload::Json;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListFavoritesRequest {
    #[serde(flatten)]
    pub paging: Paging,
}

impl ApiRequest for ListFavoritesRequest {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Get;
    const PATH: &'static str = "/v1/favorite/list";
    const PAYLOAD: Payload = Payload::Query;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListFavoriteVideosRequest {
    pub favorite_id: String,
    #[serde(flatten)]
    pub paging: Paging,
}

impl ApiRequest for ListFavoriteVideosRequest {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Get;
    const PATH: &'static str = "/v1/favorite/video/list";
    const PAYLOAD: Payload = Payload::Query;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetFavoriteVideoRequest {
    pub favorite_id: String,
    pub video_id: String,
}

impl ApiRequest for GetFavoriteVideoRequest {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Get;
    const PATH: &'static str = "/v1/favorite/video/get";
    const PAYLOAD: Payload = Payload::Query;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddFavoriteVideoRequest {
    pub favorite_id: String,
    pub video_id: String,
}

impl ApiRequest for AddFavoriteVideoRequest {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Post;
    const PATH: &'static str = "/v1/favorite/video/add";
    const PAYLOAD: Payload = Payload::Json;
}

/// DELETE 请求同样带 JSON 请求体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteFavoriteRequest {
    pub favorite_id: String,
}

impl ApiRequest for DeleteFavoriteRequest {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Delete;
    const PATH: &'static str = "/v1/favorite/delete";
    const PAYLOAD: Payload = Payload::Json;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveFavoriteVideoRequest {
    pub favorite_id: String,
    pub video_id: String,
}

impl ApiRequest for RemoveFavoriteVideoRequest {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Delete;
    const PATH: &'static str = "/v1/favorite/video/delete";
    const PAYLOAD: Payload = Payload::Json;
}
