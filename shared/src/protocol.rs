use crate::{
    Community, DashboardStats, FeedbackItem, FeedbackKind, FeedbackStatus, LoginRequest,
    LoginResponse, PAGE_SIZE, StatusUpdate, User,
};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
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

/// A single part of a `multipart/form-data` body.
#[derive(Debug, Clone, PartialEq)]
pub enum FormPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

impl FormPart {
    pub fn name(&self) -> &str {
        match self {
            FormPart::Text { name, .. } | FormPart::File { name, .. } => name,
        }
    }
}

/// Request payload, independent of the transport that ends up sending it.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(serde_json::Value),
    Multipart(Vec<FormPart>),
}

/// A file picked in the browser, already read into memory.
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
///
/// Paths are relative to the `/api/v1` base.
pub trait ApiRequest {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Whether the bearer token must be attached.
    const AUTHENTICATED: bool = true;

    /// The URL path, including any query string.
    fn path(&self) -> String;

    fn body(&self) -> RequestBody {
        RequestBody::Empty
    }
}

// =========================================================
// Request Definitions
// =========================================================

impl ApiRequest for LoginRequest {
    type Response = LoginResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;

    fn path(&self) -> String {
        "/admin/login".to_string()
    }

    fn body(&self) -> RequestBody {
        RequestBody::Json(serde_json::json!({
            "email": self.email,
            "password": self.password,
        }))
    }
}

/// Aggregate counters for the dashboard
#[derive(Debug, Clone, Copy, Default)]
pub struct DashboardStatsRequest;

impl ApiRequest for DashboardStatsRequest {
    type Response = DashboardStats;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/admin/dashboard/stats".to_string()
    }
}

/// First page of users
#[derive(Debug, Clone, Copy)]
pub struct ListUsersRequest {
    pub skip: u32,
    pub limit: u32,
}

impl Default for ListUsersRequest {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: PAGE_SIZE,
        }
    }
}

impl ApiRequest for ListUsersRequest {
    type Response = Vec<User>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/admin/users?skip={}&limit={}", self.skip, self.limit)
    }
}

/// Activate or deactivate a user
#[derive(Debug, Clone, Copy)]
pub struct SetUserActiveRequest {
    pub user_id: i64,
    pub active: bool,
}

impl ApiRequest for SetUserActiveRequest {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        let action = if self.active { "activate" } else { "deactivate" };
        format!("/admin/users/{}/{}", self.user_id, action)
    }
}

/// All communities, admin view
#[derive(Debug, Clone, Copy)]
pub struct ListCommunitiesRequest {
    pub skip: u32,
    pub limit: u32,
}

impl Default for ListCommunitiesRequest {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: PAGE_SIZE,
        }
    }
}

impl ApiRequest for ListCommunitiesRequest {
    type Response = Vec<Community>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/communities/admin/all?skip={}&limit={}", self.skip, self.limit)
    }
}

/// Create a community (multipart, optional cover photo)
#[derive(Debug, Clone)]
pub struct CreateCommunityRequest {
    pub name: String,
    pub description: String,
    pub photo: Option<Upload>,
}

impl ApiRequest for CreateCommunityRequest {
    type Response = Community;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/communities/create".to_string()
    }

    fn body(&self) -> RequestBody {
        let mut parts = vec![
            FormPart::Text {
                name: "name".to_string(),
                value: self.name.clone(),
            },
            FormPart::Text {
                name: "description".to_string(),
                value: self.description.clone(),
            },
        ];
        if let Some(photo) = &self.photo {
            parts.push(FormPart::File {
                name: "file".to_string(),
                file_name: photo.file_name.clone(),
                content_type: photo.content_type.clone(),
                bytes: photo.bytes.clone(),
            });
        }
        RequestBody::Multipart(parts)
    }
}

/// Feedback or feature requests, depending on `kind`
#[derive(Debug, Clone, Copy)]
pub struct ListFeedbackRequest {
    pub kind: FeedbackKind,
    pub skip: u32,
    pub limit: u32,
}

impl ListFeedbackRequest {
    pub fn new(kind: FeedbackKind) -> Self {
        Self {
            kind,
            skip: 0,
            limit: PAGE_SIZE,
        }
    }
}

impl ApiRequest for ListFeedbackRequest {
    type Response = Vec<FeedbackItem>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!(
            "/admin/feedback?skip={}&limit={}&feedback_type={}",
            self.skip,
            self.limit,
            self.kind.query_value()
        )
    }
}

/// Full feedback record
#[derive(Debug, Clone, Copy)]
pub struct GetFeedbackRequest {
    pub id: i64,
}

impl ApiRequest for GetFeedbackRequest {
    type Response = FeedbackItem;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/admin/feedback/{}", self.id)
    }
}

/// Set the status of a feedback item
#[derive(Debug, Clone)]
pub struct UpdateFeedbackStatusRequest {
    pub id: i64,
    pub status: FeedbackStatus,
}

impl ApiRequest for UpdateFeedbackStatusRequest {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("/admin/feedback/{}/status", self.id)
    }

    fn body(&self) -> RequestBody {
        let update = StatusUpdate {
            status: self.status.clone(),
        };
        RequestBody::Json(serde_json::to_value(update).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn paths_carry_page_size() {
        assert_eq!(
            ListUsersRequest::default().path(),
            "/admin/users?skip=0&limit=100"
        );
        assert_eq!(
            ListCommunitiesRequest::default().path(),
            "/communities/admin/all?skip=0&limit=100"
        );
        assert_eq!(
            ListFeedbackRequest::new(FeedbackKind::FeatureRequest).path(),
            "/admin/feedback?skip=0&limit=100&feedback_type=feature_request"
        );
    }

    #[test]
    fn user_activation_path_follows_target_state() {
        let req = SetUserActiveRequest {
            user_id: 7,
            active: true,
        };
        assert_eq!(req.path(), "/admin/users/7/activate");
        let req = SetUserActiveRequest {
            user_id: 7,
            active: false,
        };
        assert_eq!(req.path(), "/admin/users/7/deactivate");
    }

    #[test]
    fn status_update_body() {
        let req = UpdateFeedbackStatusRequest {
            id: 3,
            status: FeedbackStatus::Pending,
        };
        assert_eq!(req.body(), RequestBody::Json(json!({ "status": "pending" })));
    }

    #[test]
    fn community_body_includes_file_only_when_present() {
        let mut req = CreateCommunityRequest {
            name: "q/travel".into(),
            description: "Trips and tips".into(),
            photo: None,
        };
        let RequestBody::Multipart(parts) = req.body() else {
            panic!("expected multipart body");
        };
        let names: Vec<_> = parts.iter().map(FormPart::name).collect();
        assert_eq!(names, ["name", "description"]);

        req.photo = Some(Upload {
            file_name: "cover.png".into(),
            content_type: "image/png".into(),
            bytes: vec![1, 2, 3],
        });
        let RequestBody::Multipart(parts) = req.body() else {
            panic!("expected multipart body");
        };
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[2].name(), "file");
    }
}
