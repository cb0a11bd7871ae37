use serde_json::Value;
use vidshare_shared::Paging;
use vidshare_shared::favorite::{
    AddFavoriteVideoRequest, CreateFavoriteRequest, DeleteFavoriteRequest, GetFavoriteVideoRequest,
    ListFavoriteVideosRequest, ListFavoritesRequest, RemoveFavoriteVideoRequest,
};

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::request::HttpClient;

pub async fn create_favorite<C: HttpClient>(client: &ApiClient<C>, request: &CreateFavoriteRequest) -> ApiResult<Value> {
    client.send(request).await.map_err(|e| e.in_op("favorite.create"))
}

pub async fn list_favorites<C: HttpClient>(client: &ApiClient<C>, paging: Paging) -> ApiResult<Value> {
    client
        .send(&ListFavoritesRequest { paging })
        .await
        .map_err(|e| e.in_op("favorite.list"))
}

pub async fn delete_favorite<C: HttpClient>(client: &ApiClient<C>, favorite_id: &str) -> ApiResult<Value> {
    let request = DeleteFavoriteRequest {
        favorite_id: favorite_id.to_string(),
    };
    client
        .send(&request)
        .await
        .map_err(|e| e.in_op_with("favorite.delete", favorite_id))
}

// --- 收藏夹中的视频 ---

pub async fn list_favorite_videos<C: HttpClient>(
    client: &ApiClient<C>,
    favorite_id: &str,
    paging: Paging,
) -> ApiResult<Value> {
    let request = ListFavoriteVideosRequest {
        favorite_id: favorite_id.to_string(),
        paging,
    };
    client
        .send(&request)
        .await
        .map_err(|e| e.in_op_with("favorite.video_list", favorite_id))
}

pub async fn get_favorite_video<C: HttpClient>(client: &ApiClient<C>, favorite_id: &str, video_id: &str) -> ApiResult<Value> {
    let request = GetFavoriteVideoRequest {
        favorite_id: favorite_id.to_string(),
        video_id: video_id.to_string(),
    };
    client.send(&request).await.map_err(|e| e.in_op("favorite.video_get"))
}

pub async fn add_favorite_video<C: HttpClient>(client: &ApiClient<C>, favorite_id: &str, video_id: &str) -> ApiResult<Value> {
    let request = AddFavoriteVideoRequest {
        favorite_id: favorite_id.to_string(),
        video_id: video_id.to_string(),
    };
    client.send(&request).await.map_err(|e| e.in_op("favorite.video_add"))
}

pub async fn remove_favorite_video<C: HttpClient>(
    client: &ApiClient<C>,
    favorite_id: &str,
    video_id: &str,
) -> ApiResult<Value> {
    let request = RemoveFavoriteVideoRequest {
        favorite_id: favorite_id.to_string(),
        video_id: video_id.to_string(),
    };
    client.send(&request).await.map_err(|e| e.in_op("favorite.video_remove"))
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

    #[tokio::test]
    async fn test_favorite_requests() {
        let client = setup();
        client
            .http()
            .mock_response(HttpMethod::Post, "/api/v1/favorite/create", 200, json!({"id": "f1"}));

        let created = create_favorite(
            &client,
            &CreateFavoriteRequest {
                name: "later".into(),
                description: None,
                cover_url: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(created["id"], "f1");

        let _ = list_favorites(&client, Paging::default()).await;
        let _ = list_favorite_videos(&client, "f1", Paging { page_num: 2, page_size: 10 }).await;
        let _ = get_favorite_video(&client, "f1", "v1").await;
        let _ = add_favorite_video(&client, "f1", "v1").await;
        let _ = remove_favorite_video(&client, "f1", "v1").await;
        let _ = delete_favorite(&client, "f1").await;

        assert_eq!(
            client.http().sent_paths(),
            vec![
                "POST /api/v1/favorite/create",
                "GET /api/v1/favorite/list?page_num=1&page_size=10",
                "GET /api/v1/favorite/video/list?favorite_id=f1&page_num=2&page_size=10",
                "GET /api/v1/favorite/video/get?favorite_id=f1&video_id=v1",
                "POST /api/v1/favorite/video/add",
                "DELETE /api/v1/favorite/video/delete",
                "DELETE /api/v1/favorite/delete",
            ]
        );
    }

    #[tokio::test]
    async fn test_delete_carries_json_body() {
        let client = setup();
        let _ = remove_favorite_video(&client, "f1", "v2").await;
        let body: Value = serde_json::from_str(client.http().last_request().body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"favorite_id": "f1", "video_id": "v2"}));
    }
}
