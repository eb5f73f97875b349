use crate::config::ConsoleConfig;
use crate::error::ApiError;
use crate::request::{HttpClient, HttpRequest, HttpResponse, RequestBody};
use travel_admin_shared::ErrorBody;
use travel_admin_shared::protocol::ApiRequest;

/// 管理后台 REST 客户端
///
/// 只负责拼装请求与分类响应，不持有会话；token 由调用方传入。
pub struct AdminApi<C> {
    client: C,
    config: ConsoleConfig,
}

impl<C: HttpClient> AdminApi<C> {
    pub fn new(client: C, config: ConsoleConfig) -> Self {
        Self { client, config }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// 发送一个类型化请求
    ///
    /// 需要认证的请求在没有 token 时直接返回 `ApiError::MissingToken`，不会发出。
    pub async fn send<R: ApiRequest>(
        &self,
        req: &R,
        token: Option<&str>,
    ) -> Result<R::Response, ApiError> {
        if R::AUTHENTICATED && token.is_none() {
            log::warn!("{} {} skipped: no bearer token", R::METHOD.as_str(), req.path());
            return Err(ApiError::MissingToken);
        }
        self.dispatch(req, token).await
    }

    /// 没有 token 时照常发出，只是不带 `Authorization` 头
    ///
    /// 仅用于 bypass 会话的只读加载，由后端决定是否放行。
    pub async fn send_without_token_check<R: ApiRequest>(
        &self,
        req: &R,
        token: Option<&str>,
    ) -> Result<R::Response, ApiError> {
        self.dispatch(req, token).await
    }

    async fn dispatch<R: ApiRequest>(
        &self,
        req: &R,
        token: Option<&str>,
    ) -> Result<R::Response, ApiError> {
        let url = self.config.endpoint(&req.path());
        let body = req.body();

        let mut http = HttpRequest::new(&url, R::METHOD);
        // multipart 的 boundary 由浏览器生成，不能手动指定 Content-Type
        if !matches!(body, RequestBody::Multipart(_)) {
            http = http.with_header("Content-Type", "application/json");
        }
        if R::AUTHENTICATED {
            if let Some(token) = token {
                http = http.with_header("Authorization", &format!("Bearer {}", token));
            }
        }
        let http = http.with_body(body);

        log::debug!("{} {}", R::METHOD.as_str(), url);
        let resp = self.client.send(http).await.map_err(|e| {
            log::error!("{} {} failed: {}", R::METHOD.as_str(), url, e);
            ApiError::Network(e.0)
        })?;

        decode::<R>(resp)
    }
}

fn decode<R: ApiRequest>(resp: HttpResponse) -> Result<R::Response, ApiError> {
    if resp.ok() {
        return resp
            .json::<R::Response>()
            .map_err(|e| ApiError::Decode(e.to_string()));
    }

    let detail = ErrorBody::detail_from(&resp.body);
    match resp.status {
        401 | 403 => Err(ApiError::Unauthorized {
            status: resp.status,
            detail,
        }),
        status => {
            log::warn!("backend returned {}: {:?}", status, detail);
            Err(ApiError::Backend { status, detail })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::MockHttpClient;
    use serde_json::json;
    use travel_admin_shared::protocol::{DashboardStatsRequest, SetUserActiveRequest};
    use travel_admin_shared::LoginRequest;

    const BASE: &str = "http://localhost:8000/api/v1";

    fn api() -> AdminApi<MockHttpClient> {
        AdminApi::new(MockHttpClient::new(), ConsoleConfig::default())
    }

    #[tokio::test]
    async fn authenticated_request_carries_bearer_token() {
        let api = api();
        let url = format!("{}/admin/dashboard/stats", BASE);
        api.client()
            .mock_response(&url, 200, json!({ "total_users": 1 }));

        let stats = api
            .send(&DashboardStatsRequest, Some("tok-123"))
            .await
            .unwrap();
        assert_eq!(stats.total_users, 1);

        let sent = api.client().sent_to(&url);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].header("authorization"), Some("Bearer tok-123"));
        assert_eq!(sent[0].header("content-type"), Some("application/json"));
    }

    #[tokio::test]
    async fn missing_token_is_not_sent() {
        let api = api();
        let err = api.send(&DashboardStatsRequest, None).await.unwrap_err();
        assert_eq!(err, ApiError::MissingToken);
        assert!(err.is_unauthorized());
        assert!(api.client().requests.borrow().is_empty());
    }

    #[tokio::test]
    async fn unchecked_send_omits_authorization_header() {
        let api = api();
        let url = format!("{}/admin/dashboard/stats", BASE);
        api.client()
            .mock_response(&url, 200, json!({ "total_posts": 2 }));

        let stats = api
            .send_without_token_check(&DashboardStatsRequest, None)
            .await
            .unwrap();
        assert_eq!(stats.total_posts, 2);

        let sent = api.client().sent_to(&url);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].header("authorization"), None);
    }

    #[tokio::test]
    async fn login_is_sent_without_token() {
        let api = api();
        let url = format!("{}/admin/login", BASE);
        api.client()
            .mock_response(&url, 200, json!({ "access_token": "abc" }));

        let req = LoginRequest {
            email: "a@b.c".into(),
            password: "pw".into(),
        };
        let resp = api.send(&req, None).await.unwrap();
        assert_eq!(resp.access_token, "abc");

        let sent = api.client().sent_to(&url);
        assert_eq!(sent[0].header("authorization"), None);
    }

    #[tokio::test]
    async fn status_codes_are_classified() {
        let api = api();
        let url = format!("{}/admin/users/4/activate", BASE);
        let req = SetUserActiveRequest {
            user_id: 4,
            active: true,
        };

        api.client()
            .mock_response(&url, 403, json!({ "detail": "Not enough permissions" }));
        let err = api.send(&req, Some("t")).await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Unauthorized {
                status: 403,
                detail: Some("Not enough permissions".into())
            }
        );

        api.client()
            .mock_response(&url, 404, json!({ "detail": "User not found" }));
        let err = api.send(&req, Some("t")).await.unwrap_err();
        assert_eq!(err.detail(), Some("User not found"));
        assert!(!err.is_unauthorized());

        api.client().mock_network_failure(&url);
        let err = api.send(&req, Some("t")).await.unwrap_err();
        assert!(err.is_connectivity());
    }

    #[tokio::test]
    async fn empty_success_body_is_accepted_for_ignored_responses() {
        let api = api();
        let url = format!("{}/admin/users/4/deactivate", BASE);
        api.client().mock_raw(&url, 200, "");
        let req = SetUserActiveRequest {
            user_id: 4,
            active: false,
        };
        assert!(api.send(&req, Some("t")).await.is_ok());
    }

    #[tokio::test]
    async fn malformed_success_body_is_a_decode_error() {
        let api = api();
        let url = format!("{}/admin/dashboard/stats", BASE);
        api.client().mock_raw(&url, 200, "<html>");
        let err = api.send(&DashboardStatsRequest, Some("t")).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
