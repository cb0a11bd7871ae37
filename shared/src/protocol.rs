use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// 请求参数的承载位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    /// 不携带参数（参数全部在路径中）
    Empty,
    /// 序列化为 URL 查询字符串
    Query,
    /// 序列化为 JSON 请求体
    Json,
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
///
/// 本地调用参数到线路形状的映射全部集中在实现类型上：
/// serde 属性决定字段名，`PATH` 决定路径模板，`PAYLOAD` 决定参数位置。
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// The URL path template, relative to the API prefix. `{name}` placeholders
    /// are filled from `path_params`.
    const PATH: &'static str;
    /// Where the serialized request goes.
    const PAYLOAD: Payload;

    /// 路径占位符的取值
    fn path_params(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// 渲染后的请求路径
    fn path(&self) -> String {
        render_path(Self::PATH, &self.path_params())
    }
}

/// 用参数替换路径模板中的 `{name}` 占位符
pub fn render_path(template: &str, params: &[(&'static str, String)]) -> String {
    let mut path = template.to_string();
    for (name, value) in params {
        path = path.replace(&format!("{{{}}}", name), value);
    }
    path
}

/// 从路径模板中提取占位符名称
pub fn placeholders(template: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        names.push(&rest[start + 1..start + len]);
        rest = &rest[start + len + 1..];
    }
    names
}

// =========================================================
// 端点表 (Endpoint Schema Table)
// =========================================================

/// 单个端点的静态描述
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    /// `resource.operation` 形式的名称
    pub name: &'static str,
    pub method: HttpMethod,
    pub path: &'static str,
    pub payload: Payload,
}

impl Endpoint {
    pub fn of<R: ApiRequest>(name: &'static str) -> Self {
        Self {
            name,
            method: R::METHOD,
            path: R::PATH,
            payload: R::PAYLOAD,
        }
    }
}

/// 全部远端端点，按资源分组
pub fn endpoints() -> Vec<Endpoint> {
    use crate::{favorite::*, share::*, user::*, video::*};

    vec![
        // user
        Endpoint::of::<CreateUserRequest>("user.create"),
        Endpoint::of::<LoginRequest>("user.login"),
        Endpoint::of::<GetUserInfoRequest>("user.get"),
        Endpoint::of::<UpdateUserRequest>("user.update"),
        Endpoint::of::<DeleteUserRequest>("user.delete"),
        Endpoint::of::<QueryUserRequest>("user.query"),
        Endpoint::of::<SendCodeRequest>("user.send_code"),
        Endpoint::of::<VerifyCodeRequest>("user.verify_code"),
        Endpoint::of::<CheckUserExistsRequest>("user.check_existence"),
        // video
        Endpoint::of::<FeedRequest>("video.feed"),
        Endpoint::of::<ListVideosRequest>("video.list"),
        Endpoint::of::<PopularVideosRequest>("video.popular"),
        Endpoint::of::<SearchVideosRequest>("video.search"),
        Endpoint::of::<DeleteVideoRequest>("video.delete"),
        Endpoint::of::<VisitVideoRequest>("video.visit"),
        Endpoint::of::<PublishStartRequest>("video.publish_start"),
        Endpoint::of::<PublishChunkRequest>("video.publish_chunk"),
        Endpoint::of::<PublishCompleteRequest>("video.publish_complete"),
        Endpoint::of::<PublishCancelRequest>("video.publish_cancel"),
        Endpoint::of::<RecommendVideosRequest>("video.recommend"),
        Endpoint::of::<StreamVideoRequest>("video.stream"),
        // favorite
        Endpoint::of::<CreateFavoriteRequest>("favorite.create"),
        Endpoint::of::<ListFavoritesRequest>("favorite.list"),
        Endpoint::of::<ListFavoriteVideosRequest>("favorite.list_videos"),
        Endpoint::of::<GetFavoriteVideoRequest>("favorite.get_video"),
        Endpoint::of::<AddFavoriteVideoRequest>("favorite.add_video"),
        Endpoint::of::<DeleteFavoriteRequest>("favorite.delete"),
        Endpoint::of::<RemoveFavoriteVideoRequest>("favorite.remove_video"),
        // share
        Endpoint::of::<ShareVideoRequest>("share.video"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_endpoint_table_is_unique() {
        let table = endpoints();
        let mut seen = HashSet::new();
        for ep in &table {
            assert!(
                seen.insert((ep.method, ep.path)),
                "duplicate endpoint {} {}",
                ep.method.as_str(),
                ep.path
            );
        }
        let names: HashSet<_> = table.iter().map(|ep| ep.name).collect();
        assert_eq!(names.len(), table.len());
    }

    #[test]
    fn test_endpoint_paths_are_relative_to_prefix() {
        for ep in endpoints() {
            assert!(ep.path.starts_with('/'), "{} has no leading slash", ep.name);
            assert!(
                !ep.path.starts_with(crate::API_PREFIX),
                "{} repeats the api prefix",
                ep.name
            );
        }
    }

    #[test]
    fn test_get_and_delete_with_placeholders_carry_no_body() {
        for ep in endpoints() {
            if !placeholders(ep.path).is_empty() {
                assert_eq!(ep.payload, Payload::Empty, "{}", ep.name);
            }
            if ep.method == HttpMethod::Get {
                assert_ne!(ep.payload, Payload::Json, "{} sends a GET body", ep.name);
            }
        }
    }

    #[test]
    fn test_render_path() {
        let path = render_path("/user/info/{user_id}", &[("user_id", "42".to_string())]);
        assert_eq!(path, "/user/info/42");
        assert_eq!(placeholders("/a/{x}/b/{y}"), vec!["x", "y"]);
        assert!(placeholders("/v1/video/feed").is_empty());
    }
}
