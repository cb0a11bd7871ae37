use std::collections::BTreeMap;

use serde_json::Value;
use vidshare_shared::AuthResponse;
use vidshare_shared::user::{
    CheckUserExistsRequest, CreateUserRequest, DeleteUserRequest, GetUserInfoRequest,
    LoginRequest, QueryUserRequest, SendCodeRequest, UpdateUserRequest, VerifyCodeRequest,
};

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::request::HttpClient;

// =========================================================
// 注册 / 登录
// =========================================================

pub async fn create_user<C: HttpClient>(client: &ApiClient<C>, request: &CreateUserRequest) -> ApiResult<AuthResponse> {
    client.send(request).await.map_err(|e| e.in_op("user.create"))
}

pub async fn login_user<C: HttpClient>(client: &ApiClient<C>, request: &LoginRequest) -> ApiResult<AuthResponse> {
    client.send(request).await.map_err(|e| e.in_op("user.login"))
}

// =========================================================
// 用户资料
// =========================================================

pub async fn get_user_info<C: HttpClient>(client: &ApiClient<C>, user_id: &str) -> ApiResult<Value> {
    let request = GetUserInfoRequest {
        user_id: user_id.to_string(),
    };
    client
        .send(&request)
        .await
        .map_err(|e| e.in_op_with("user.get", user_id))
}

pub async fn update_user<C: HttpClient>(client: &ApiClient<C>, request: &UpdateUserRequest) -> ApiResult<Value> {
    client.send(request).await.map_err(|e| e.in_op("user.update"))
}

pub async fn delete_user<C: HttpClient>(client: &ApiClient<C>, user_id: &str) -> ApiResult<Value> {
    let request = DeleteUserRequest {
        user_id: user_id.to_string(),
    };
    client
        .send(&request)
        .await
        .map_err(|e| e.in_op_with("user.delete", user_id))
}

/// 查询参数原样放进查询串
pub async fn query_user<C: HttpClient>(client: &ApiClient<C>, params: BTreeMap<String, String>) -> ApiResult<Value> {
    client
        .send(&QueryUserRequest(params))
        .await
        .map_err(|e| e.in_op("user.query"))
}

// =========================================================
// 邮箱验证码
// =========================================================

pub async fn send_code<C: HttpClient>(client: &ApiClient<C>, email: &str) -> ApiResult<Value> {
    let request = SendCodeRequest {
        email: email.to_string(),
    };
    client.send(&request).await.map_err(|e| e.in_op("user.send_code"))
}

pub async fn verify_code<C: HttpClient>(client: &ApiClient<C>, email: &str, code: &str) -> ApiResult<Value> {
    let request = VerifyCodeRequest {
        email: email.to_string(),
        code: code.to_string(),
    };
    client.send(&request).await.map_err(|e| e.in_op("user.verify_code"))
}

pub async fn check_user_exists<C: HttpClient>(
    client: &ApiClient<C>,
    user_name: Option<&str>,
    email: Option<&str>,
) -> ApiResult<Value> {
    let request = CheckUserExistsRequest {
        user_name: user_name.map(str::to_string),
        email: email.map(str::to_string),
    };
    client.send(&request).await.map_err(|e| e.in_op("user.exists"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::request::HttpMethod;
    use crate::request::tests::MockHttpClient;
    use crate::session::{CredentialStore, Session};
    use serde_json::json;
    use std::rc::Rc;

    fn setup() -> (CredentialStore, ApiClient<Rc<MockHttpClient>>) {
        let store = CredentialStore::in_memory();
        let client = ApiClient::new(Rc::new(MockHttpClient::new()), store.clone(), &ClientConfig::default());
        (store, client)
    }

    fn sent_body(client: &ApiClient<Rc<MockHttpClient>>) -> Value {
        let body = client.http().last_request().body.unwrap_or_default();
        serde_json::from_str(&body).unwrap()
    }

    #[tokio::test]
    async fn test_get_user_info_path() {
        let (store, client) = setup();
        store.save(&Session::with_token("t")).unwrap();
        client
            .http()
            .mock_response(HttpMethod::Get, "/api/user/info/42", 200, json!({"userName": "alice"}));

        let info = get_user_info(&client, "42").await.unwrap();

        assert_eq!(info["userName"], "alice");
        let req = client.http().last_request();
        assert_eq!(req.url, "/api/user/info/42");
        assert_eq!(req.header("Authorization"), Some("Bearer t"));
    }

    #[tokio::test]
    async fn test_update_user_field_names() {
        let (_store, client) = setup();
        client.http().mock_response(HttpMethod::Put, "/api/user/update", 200, json!({}));

        let request = UpdateUserRequest {
            user_name: "alice".into(),
            user_id: "42".into(),
            password: Some("pw".into()),
            data: None,
            filesize: None,
        };
        update_user(&client, &request).await.unwrap();

        assert_eq!(
            sent_body(&client),
            json!({"user_name": "alice", "userId": "42", "password": "pw"})
        );
    }

    #[tokio::test]
    async fn test_login_returns_auth_response() {
        let (_store, client) = setup();
        client.http().mock_response(
            HttpMethod::Post,
            "/api/v1/user/login",
            200,
            json!({"token": "t1", "refreshToken": "r1", "userName": "bob"}),
        );

        let request = LoginRequest {
            user_name: "bob".into(),
            password: "secret".into(),
            email: None,
        };
        let resp = login_user(&client, &request).await.unwrap();

        assert_eq!(resp.token.as_deref(), Some("t1"));
        assert_eq!(resp.refresh_token.as_deref(), Some("r1"));
        assert_eq!(sent_body(&client), json!({"user_name": "bob", "Password": "secret"}));
        assert_eq!(client.http().last_request().header("Authorization"), None);
    }

    #[tokio::test]
    async fn test_create_user_rejection_is_passed_through() {
        let (_store, client) = setup();
        client
            .http()
            .mock_response(HttpMethod::Post, "/api/v1/user/create", 409, json!({"message": "exists"}));

        let request = CreateUserRequest {
            user_name: "bob".into(),
            password: "pw".into(),
            email: "b@example.com".into(),
            sex: "male".into(),
        };
        let err = create_user(&client, &request).await.unwrap_err();

        assert_eq!(err.http_status(), Some(409));
        assert_eq!(err.body(), Some(&json!({"message": "exists"})));
        assert_eq!(
            err.to_string(),
            "[REQUEST_REJECTED] exists (HTTP 409) | trace: api.send(/v1/user/create) -> user.create"
        );
    }

    #[tokio::test]
    async fn test_delete_and_query() {
        let (_store, client) = setup();
        client
            .http()
            .mock_response(HttpMethod::Delete, "/api/user/delete/9", 200, json!(true));

        assert_eq!(delete_user(&client, "9").await.unwrap(), json!(true));
        assert_eq!(client.http().last_request().body, None);

        let mut params = BTreeMap::new();
        params.insert("email".to_string(), "a@b.c".to_string());
        let _ = query_user(&client, params).await;
        assert_eq!(client.http().last_request().url, "/api/user/query?email=a%40b.c");
    }

    #[tokio::test]
    async fn test_email_code_flow_and_exists() {
        let (_store, client) = setup();
        client.http().mock_response(HttpMethod::Post, "/api/user/send-code", 200, json!({}));
        client.http().mock_response(HttpMethod::Post, "/api/user/verify-code", 200, json!({"ok": true}));
        client.http().mock_response(HttpMethod::Get, "/api/v1/user/exists", 200, json!(false));

        send_code(&client, "a@b.c").await.unwrap();
        assert_eq!(sent_body(&client), json!({"email": "a@b.c"}));

        let verified = verify_code(&client, "a@b.c", "1234").await.unwrap();
        assert_eq!(verified["ok"], true);
        assert_eq!(sent_body(&client), json!({"email": "a@b.c", "code": "1234"}));

        let exists = check_user_exists(&client, Some("bob"), None).await.unwrap();
        assert_eq!(exists, json!(false));
        assert_eq!(client.http().last_request().url, "/api/v1/user/exists?user_name=bob");
    }
}
