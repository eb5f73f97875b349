use super::*;
use crate::config::ConsoleConfig;
use crate::request::{FormPart, HttpMethod, MockHttpClient, RequestBody};
use crate::session::MemoryStore;
use crate::error::ValidationError;
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;
use travel_admin_shared::{KEY_LOGGED_IN, KEY_TOKEN};

// =========================================================
// 辅助函数
// =========================================================

const BASE: &str = "http://localhost:8000/api/v1";

fn url(path: &str) -> String {
    format!("{}{}", BASE, path)
}

fn signed_in_console() -> AdminConsole<MockHttpClient, MemoryStore> {
    let store = MemoryStore::new();
    store.set(KEY_LOGGED_IN, "true");
    store.set(KEY_TOKEN, "tok");
    console_with(store)
}

fn console_with(store: MemoryStore) -> AdminConsole<MockHttpClient, MemoryStore> {
    let api = AdminApi::new(MockHttpClient::new(), ConsoleConfig::default());
    AdminConsole::new(api, SessionGate::new(store))
}

fn client(console: &AdminConsole<MockHttpClient, MemoryStore>) -> &MockHttpClient {
    console.api().client()
}

fn words(n: usize) -> String {
    vec!["go"; n].join(" ")
}

// =========================================================
// 会话门禁
// =========================================================

#[tokio::test]
async fn anonymous_visit_requires_login_before_any_load() {
    let console = console_with(MemoryStore::new());
    assert!(console.session().require_session().is_err());

    // 即使加载器被调用，也不会在没有 token 的情况下发出请求
    assert_eq!(console.load_users().await, LoadOutcome::SignedOut);
    assert!(client(&console).requests.borrow().is_empty());
}

#[tokio::test]
async fn successful_login_token_is_used_by_loaders() {
    let console = console_with(MemoryStore::new());
    client(&console).mock_response(
        &url("/admin/login"),
        200,
        json!({ "access_token": "fresh-token" }),
    );
    client(&console).mock_response(&url("/admin/users?skip=0&limit=100"), 200, json!([]));

    let session = console.login("ops@example.com", "pw").await.unwrap();
    assert_eq!(session.token.as_deref(), Some("fresh-token"));
    assert_eq!(
        console.session().store().get(KEY_TOKEN).as_deref(),
        Some("fresh-token")
    );

    console.load_users().await;
    let sent = client(&console).sent_to(&url("/admin/users?skip=0&limit=100"));
    assert_eq!(sent[0].header("Authorization"), Some("Bearer fresh-token"));
}

// =========================================================
// 强制登出
// =========================================================

#[tokio::test]
async fn unauthorized_from_any_loader_clears_session() {
    let endpoints = [
        "/admin/dashboard/stats",
        "/admin/users?skip=0&limit=100",
        "/communities/admin/all?skip=0&limit=100",
        "/admin/feedback?skip=0&limit=100&feedback_type=feedback",
    ];

    for (i, path) in endpoints.iter().enumerate() {
        for status in [401u16, 403] {
            let console = signed_in_console();
            let logged_out = Rc::new(RefCell::new(false));
            let flag = logged_out.clone();
            console.session().subscribe(move |s| *flag.borrow_mut() = s.is_none());

            client(&console).mock_response(&url(path), status, json!({ "detail": "nope" }));

            let signed_out = match i {
                0 => console.load_dashboard().await == LoadOutcome::SignedOut,
                1 => console.load_users().await == LoadOutcome::SignedOut,
                2 => console.load_communities().await == LoadOutcome::SignedOut,
                _ => console.load_feedback(FeedbackKind::Feedback).await == LoadOutcome::SignedOut,
            };

            assert!(signed_out, "{} {} should sign out", path, status);
            assert!(*logged_out.borrow());
            assert!(!console.session().is_authenticated());
            assert_eq!(console.session().store().get(KEY_TOKEN), None);
        }
    }
}

#[tokio::test]
async fn unauthorized_from_actions_clears_session() {
    let console = signed_in_console();
    client(&console).mock_response(&url("/admin/users/5/deactivate"), 401, json!({}));
    let err = console.toggle_user_status(5, false).await.unwrap_err();
    assert_eq!(err, ActionError::SessionExpired);
    assert!(!console.session().is_authenticated());

    let console = signed_in_console();
    client(&console).mock_response(&url("/admin/feedback/2/status"), 403, json!({}));
    let err = console
        .update_feedback_status(2, &FeedbackStatus::Pending, || FeedbackKind::Feedback)
        .await
        .unwrap_err();
    assert_eq!(err, ActionError::SessionExpired);
    assert!(!console.session().is_authenticated());
}

#[tokio::test]
async fn action_without_stored_token_is_not_authenticated() {
    let store = MemoryStore::new();
    store.set(KEY_LOGGED_IN, "true");
    let console = console_with(store);

    let err = console.toggle_user_status(5, true).await.unwrap_err();
    assert_eq!(err, ActionError::NotAuthenticated);
    assert_eq!(err.to_string(), "Not authenticated. Please login again.");
    assert!(!console.session().is_authenticated());
    assert!(client(&console).requests.borrow().is_empty());
}

#[cfg(feature = "dev-bypass")]
#[tokio::test]
async fn bypass_session_survives_unreachable_backend() {
    let console = console_with(MemoryStore::new());
    console.session().bypass();
    client(&console).mock_network_failure(&url("/admin/dashboard/stats"));
    client(&console).mock_response(&url("/admin/users?skip=0&limit=100"), 200, json!([]));

    assert_eq!(
        console.load_dashboard().await,
        LoadOutcome::Ready(DashboardStats::default())
    );
    assert!(matches!(
        console.load_users().await,
        LoadOutcome::Ready(ListState::Empty(_))
    ));
    assert!(console.session().is_authenticated());

    // 加载请求照常发出，但不带 Authorization 头
    let sent = client(&console).sent_to(&url("/admin/dashboard/stats"));
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].header("authorization"), None);
}

#[cfg(feature = "dev-bypass")]
#[tokio::test]
async fn bypass_session_is_cleared_by_actions_and_unauthorized_loads() {
    let console = console_with(MemoryStore::new());
    console.session().bypass();
    let err = console.toggle_user_status(5, true).await.unwrap_err();
    assert_eq!(err, ActionError::NotAuthenticated);
    assert!(!console.session().is_authenticated());

    let console = console_with(MemoryStore::new());
    console.session().bypass();
    client(&console).mock_response(&url("/admin/dashboard/stats"), 401, json!({}));
    assert_eq!(console.load_dashboard().await, LoadOutcome::SignedOut);
    assert!(!console.session().is_authenticated());
}

// =========================================================
// 加载器
// =========================================================

#[tokio::test]
async fn dashboard_missing_field_renders_zero() {
    let console = signed_in_console();
    client(&console).mock_response(
        &url("/admin/dashboard/stats"),
        200,
        json!({ "total_users": 10, "total_posts": 4, "total_trips": 2, "total_communities": 1 }),
    );

    let stats = console.load_dashboard().await.ready().unwrap();
    assert_eq!(stats.total_likes, 0);
    assert_eq!(stats.total_users, 10);
    assert_eq!(stats.total_communities, 1);
}

#[tokio::test]
async fn dashboard_failure_falls_back_to_zero_snapshot() {
    let console = signed_in_console();
    client(&console).mock_response(&url("/admin/dashboard/stats"), 500, json!({}));
    assert_eq!(
        console.load_dashboard().await,
        LoadOutcome::Ready(DashboardStats::default())
    );

    client(&console).mock_network_failure(&url("/admin/dashboard/stats"));
    assert_eq!(
        console.load_dashboard().await,
        LoadOutcome::Ready(DashboardStats::default())
    );
    assert!(console.session().is_authenticated());
}

#[tokio::test]
async fn list_loaders_render_inline_states() {
    let console = signed_in_console();
    let users_url = url("/admin/users?skip=0&limit=100");

    client(&console).mock_response(
        &users_url,
        200,
        json!([{ "id": 1, "email": "a@b.c", "username": null, "is_active": true }]),
    );
    let state = console.load_users().await.ready().unwrap();
    assert_eq!(state.rows().len(), 1);
    assert_eq!(state.rows()[0].username, None);

    client(&console).mock_response(&users_url, 500, json!({ "detail": "db down" }));
    assert_eq!(
        console.load_users().await,
        LoadOutcome::Ready(ListState::Failed("Failed to load users: db down".into()))
    );

    client(&console).mock_network_failure(&users_url);
    assert_eq!(
        console.load_users().await,
        LoadOutcome::Ready(ListState::Failed(
            "Error loading users. Please check your connection.".into()
        ))
    );
}

#[tokio::test]
async fn feedback_loader_is_keyed_by_kind() {
    let console = signed_in_console();
    let features_url = url("/admin/feedback?skip=0&limit=100&feedback_type=feature_request");
    client(&console).mock_response(&features_url, 200, json!([]));

    let state = console
        .load_feedback(FeedbackKind::FeatureRequest)
        .await
        .ready()
        .unwrap();
    assert_eq!(state, ListState::Empty("No feature requests found".into()));
    assert_eq!(client(&console).sent_to(&features_url).len(), 1);
}

// =========================================================
// 变更操作
// =========================================================

#[tokio::test]
async fn toggle_user_status_reloads_users() {
    let console = signed_in_console();
    client(&console).mock_response(&url("/admin/users/9/activate"), 200, json!({ "ok": true }));
    client(&console).mock_response(
        &url("/admin/users?skip=0&limit=100"),
        200,
        json!([{ "id": 9, "email": "x@y.z", "is_active": true }]),
    );

    let state = console.toggle_user_status(9, true).await.unwrap();
    assert!(state.rows()[0].is_active);

    let methods: Vec<_> = client(&console)
        .requests
        .borrow()
        .iter()
        .map(|r| (r.method, r.url.clone()))
        .collect();
    assert_eq!(
        methods,
        vec![
            (HttpMethod::Put, url("/admin/users/9/activate")),
            (HttpMethod::Get, url("/admin/users?skip=0&limit=100")),
        ]
    );
}

#[tokio::test]
async fn toggle_user_status_surfaces_backend_detail() {
    let console = signed_in_console();
    client(&console).mock_response(
        &url("/admin/users/9/deactivate"),
        400,
        json!({ "detail": "Cannot deactivate an admin" }),
    );
    let err = console.toggle_user_status(9, false).await.unwrap_err();
    assert_eq!(err.to_string(), "Cannot deactivate an admin");
    assert!(console.session().is_authenticated());
}

#[tokio::test]
async fn community_validation_sends_nothing() {
    let console = signed_in_console();

    let err = console
        .create_community("forum", "a fine place", None)
        .await
        .unwrap_err();
    assert_eq!(err, ActionError::Validation(ValidationError::CommunityNamePrefix));

    let err = console
        .create_community("q/travel", &words(36), None)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ActionError::Validation(ValidationError::DescriptionTooLong { words: 36 })
    );

    assert!(client(&console).requests.borrow().is_empty());
}

#[tokio::test]
async fn valid_community_issues_one_multipart_post() {
    let console = signed_in_console();
    let create_url = url("/communities/create");
    client(&console).mock_response(
        &create_url,
        200,
        json!({ "id": 3, "name": "q/travel", "description": "x", "is_admin_created": true }),
    );
    client(&console).mock_response(
        &url("/communities/admin/all?skip=0&limit=100"),
        200,
        json!([{ "id": 3, "name": "q/travel", "is_admin_created": true, "created_at": "2024-05-01T10:00:00" }]),
    );

    let state = console
        .create_community("q/travel", &words(35), None)
        .await
        .unwrap();
    assert_eq!(state.rows()[0].name, "q/travel");

    let posts = client(&console).sent_to(&create_url);
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].method, HttpMethod::Post);
    assert_eq!(posts[0].header("Content-Type"), None);
    assert_eq!(posts[0].header("Authorization"), Some("Bearer tok"));
    let RequestBody::Multipart(parts) = &posts[0].body else {
        panic!("expected multipart body");
    };
    assert_eq!(
        parts[0],
        FormPart::Text {
            name: "name".into(),
            value: "q/travel".into()
        }
    );
    assert_eq!(
        parts[1],
        FormPart::Text {
            name: "description".into(),
            value: words(35)
        }
    );
}

#[tokio::test]
async fn community_photo_is_attached_as_file_part() {
    let console = signed_in_console();
    let create_url = url("/communities/create");
    client(&console).mock_response(&create_url, 201, json!({ "id": 4, "name": "q/hikes" }));
    client(&console).mock_response(&url("/communities/admin/all?skip=0&limit=100"), 200, json!([]));

    let photo = Upload {
        file_name: "cover.jpg".into(),
        content_type: "image/jpeg".into(),
        bytes: vec![0xff, 0xd8],
    };
    let state = console
        .create_community("q/hikes", "mountain trails", Some(photo))
        .await
        .unwrap();
    assert_eq!(state, ListState::Empty("No communities found".into()));

    let posts = client(&console).sent_to(&create_url);
    let RequestBody::Multipart(parts) = &posts[0].body else {
        panic!("expected multipart body");
    };
    assert_eq!(parts.len(), 3);
    assert!(matches!(&parts[2], FormPart::File { name, file_name, .. } if name == "file" && file_name == "cover.jpg"));
}

#[tokio::test]
async fn community_field_errors_are_joined() {
    let console = signed_in_console();
    client(&console).mock_response(
        &url("/communities/create"),
        422,
        json!({ "detail": [
            { "loc": ["body", "name"], "msg": "name already taken" },
            "file too large"
        ] }),
    );

    let err = console
        .create_community("q/travel", "trips", None)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "name already taken, file too large");
}

#[tokio::test]
async fn feedback_toggle_puts_opposite_status() {
    let cases = [
        (FeedbackStatus::Resolved, "pending"),
        (FeedbackStatus::Pending, "resolved"),
    ];
    for (current, expected) in cases {
        let console = signed_in_console();
        let status_url = url("/admin/feedback/12/status");
        client(&console).mock_response(&status_url, 200, json!({}));
        client(&console).mock_response(
            &url("/admin/feedback?skip=0&limit=100&feedback_type=feature_request"),
            200,
            json!([]),
        );

        console
            .update_feedback_status(12, &current, || FeedbackKind::FeatureRequest)
            .await
            .unwrap();

        let puts = client(&console).sent_to(&status_url);
        assert_eq!(puts.len(), 1);
        assert_eq!(puts[0].method, HttpMethod::Put);
        assert_eq!(puts[0].body, RequestBody::Json(json!({ "status": expected })));
        // 重新加载的是当前可见的子列表
        assert_eq!(
            client(&console)
                .sent_to(&url("/admin/feedback?skip=0&limit=100&feedback_type=feature_request"))
                .len(),
            1
        );
    }
}

#[tokio::test]
async fn feedback_toggle_reloads_sublist_active_after_update() {
    let console = signed_in_console();
    let status_url = url("/admin/feedback/3/status");
    let features_url = url("/admin/feedback?skip=0&limit=100&feedback_type=feature_request");
    client(&console).mock_response(&status_url, 200, json!({}));
    client(&console).mock_response(
        &features_url,
        200,
        json!([{ "id": 8, "user_id": 1, "status": "pending" }]),
    );

    // 点击时可见的是 feedback，更新返回前切换到了功能请求
    let (kind, state) = console
        .update_feedback_status(3, &FeedbackStatus::Pending, || {
            assert_eq!(client(&console).sent_to(&status_url).len(), 1);
            FeedbackKind::FeatureRequest
        })
        .await
        .unwrap();

    assert_eq!(kind, FeedbackKind::FeatureRequest);
    assert_eq!(state.rows()[0].id, 8);
    assert_eq!(client(&console).sent_to(&features_url).len(), 1);
    assert!(client(&console)
        .sent_to(&url("/admin/feedback?skip=0&limit=100&feedback_type=feedback"))
        .is_empty());
}

#[tokio::test]
async fn view_feedback_returns_full_record() {
    let console = signed_in_console();
    client(&console).mock_response(
        &url("/admin/feedback/12"),
        200,
        json!({
            "id": 12,
            "user_id": 77,
            "description": "Dark mode please",
            "status": "pending",
            "feedback_type": "feature_request",
            "created_at": "2024-05-01T10:00:00Z"
        }),
    );
    let item = console.view_feedback(12).await.unwrap();
    assert_eq!(item.user_id, 77);
    assert_eq!(item.feedback_type, Some(FeedbackKind::FeatureRequest));

    client(&console).mock_network_failure(&url("/admin/feedback/12"));
    let err = console.view_feedback(12).await.unwrap_err();
    assert_eq!(err.to_string(), "Error loading feedback details");
}
