mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::read_json;
use http_helpers::{bearer_json_request, bearer_request, json_request, login_token, test_app};
use tower::ServiceExt;

#[tokio::test]
async fn public_registry_serves_full_catalog() {
    let app = test_app();

    let request = Request::builder()
        .uri("/api/registry")
        .body(Body::empty())
        .expect("request");
    let response = app.clone().oneshot(request).await.expect("registry");
    assert_eq!(response.status(), StatusCode::OK);

    let payload = read_json(response).await;
    assert_eq!(payload["platform"], "mfe-platform");
    let routes = payload["routes"].as_array().expect("routes");
    assert_eq!(routes.len(), 3);
    let ids: Vec<&str> = routes
        .iter()
        .map(|route| route["id"].as_str().expect("id"))
        .collect();
    assert_eq!(ids, ["remote-accounts", "remote-billing", "remote-analytics"]);

    let accounts = &routes[0];
    assert_eq!(accounts["title"], "Accounts");
    assert_eq!(accounts["path"], "/accounts");
    assert_eq!(
        accounts["requiredRoles"].as_array().expect("roles").len(),
        2
    );
    assert_eq!(accounts["remote"]["scope"], "remote_accounts");
    assert_eq!(accounts["remote"]["module"], "./App");
    assert_eq!(accounts["remote"]["stable"]["version"], "1.0.0-stable");
    assert_eq!(accounts["remote"]["canary"]["version"], "1.0.0-canary");
    assert_eq!(accounts["remote"]["rollout"]["canaryEnabled"], false);
    assert_eq!(accounts["remote"]["rollout"]["canaryPercentage"], 0);

    let analytics = &routes[2];
    assert_eq!(analytics["requiredRoles"], serde_json::json!(["ADMIN"]));
}

#[tokio::test]
async fn health_is_public() {
    let app = test_app();
    let request = Request::builder()
        .uri("/api/registry/health")
        .body(Body::empty())
        .expect("request");
    let response = app.clone().oneshot(request).await.expect("health");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json(response).await;
    assert_eq!(payload["status"], "UP");
}

#[tokio::test]
async fn login_assigns_roles_by_username() {
    let app = test_app();

    let admin = json_request(
        "POST",
        "/api/auth/login",
        serde_json::json!({ "username": "Admin", "password": "pw" }),
    );
    let response = app.clone().oneshot(admin).await.expect("admin login");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json(response).await;
    assert_eq!(payload["tokenType"], "Bearer");
    assert_eq!(payload["expiresInSeconds"], 3600);
    assert_eq!(payload["roles"], serde_json::json!(["ADMIN", "USER"]));
    assert!(payload["accessToken"].as_str().expect("token").contains('.'));

    let user = json_request(
        "POST",
        "/api/auth/login",
        serde_json::json!({ "username": "alice", "password": "pw" }),
    );
    let response = app.clone().oneshot(user).await.expect("user login");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json(response).await;
    assert_eq!(payload["roles"], serde_json::json!(["USER"]));
}

#[tokio::test]
async fn login_rejects_blank_username() {
    let app = test_app();
    for body in [
        serde_json::json!({ "password": "pw" }),
        serde_json::json!({ "username": "   ", "password": "pw" }),
    ] {
        let request = json_request("POST", "/api/auth/login", body);
        let response = app.clone().oneshot(request).await.expect("login");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let payload = read_json(response).await;
        assert_eq!(payload["code"], "validation_error");
        assert_eq!(payload["message"], "username is required");
    }
}

#[tokio::test]
async fn canary_flag_update_flows_into_registry() {
    let app = test_app();
    let token = login_token(&app, "admin").await;

    let update = bearer_json_request(
        "PUT",
        "/api/registry/admin/canary-flags/remote-billing",
        &token,
        serde_json::json!({ "enabled": true, "rolloutPercentage": 25 }),
    );
    let response = app.clone().oneshot(update).await.expect("update");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json(response).await;
    assert_eq!(payload["remoteId"], "remote-billing");
    assert_eq!(payload["enabled"], true);
    assert_eq!(payload["rolloutPercentage"], 25);

    let registry = Request::builder()
        .uri("/api/registry")
        .body(Body::empty())
        .expect("request");
    let response = app.clone().oneshot(registry).await.expect("registry");
    let payload = read_json(response).await;
    let routes = payload["routes"].as_array().expect("routes");
    assert_eq!(routes[1]["remote"]["rollout"]["canaryEnabled"], true);
    assert_eq!(routes[1]["remote"]["rollout"]["canaryPercentage"], 25);
    // Other remotes keep their defaults.
    assert_eq!(routes[0]["remote"]["rollout"]["canaryEnabled"], false);
    assert_eq!(routes[2]["remote"]["rollout"]["canaryEnabled"], false);

    let list = bearer_request("GET", "/api/registry/admin/canary-flags", &token);
    let response = app.clone().oneshot(list).await.expect("list");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json(response).await;
    let flags = payload.as_array().expect("flags");
    assert_eq!(flags.len(), 3);
    assert_eq!(flags[1]["remoteId"], "remote-billing");
    assert_eq!(flags[1]["rolloutPercentage"], 25);
}

#[tokio::test]
async fn canary_flag_update_validation() {
    let app = test_app();
    let token = login_token(&app, "admin").await;

    let missing_field = bearer_json_request(
        "PUT",
        "/api/registry/admin/canary-flags/remote-accounts",
        &token,
        serde_json::json!({ "enabled": true }),
    );
    let response = app.clone().oneshot(missing_field).await.expect("missing");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json(response).await;
    assert_eq!(payload["code"], "validation_error");
    assert_eq!(payload["message"], "enabled and rolloutPercentage are required");

    let out_of_range = bearer_json_request(
        "PUT",
        "/api/registry/admin/canary-flags/remote-accounts",
        &token,
        serde_json::json!({ "enabled": true, "rolloutPercentage": 101 }),
    );
    let response = app.clone().oneshot(out_of_range).await.expect("range");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json(response).await;
    assert_eq!(payload["code"], "validation_error");

    let negative = bearer_json_request(
        "PUT",
        "/api/registry/admin/canary-flags/remote-accounts",
        &token,
        serde_json::json!({ "enabled": false, "rolloutPercentage": -1 }),
    );
    let response = app.clone().oneshot(negative).await.expect("negative");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let unknown = bearer_json_request(
        "PUT",
        "/api/registry/admin/canary-flags/remote-missing",
        &token,
        serde_json::json!({ "enabled": true, "rolloutPercentage": 10 }),
    );
    let response = app.clone().oneshot(unknown).await.expect("unknown");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json(response).await;
    assert_eq!(payload["code"], "not_found");

    // Rejected updates leave the flag untouched.
    let registry = Request::builder()
        .uri("/api/registry")
        .body(Body::empty())
        .expect("request");
    let response = app.clone().oneshot(registry).await.expect("registry");
    let payload = read_json(response).await;
    assert_eq!(
        payload["routes"][0]["remote"]["rollout"]["canaryEnabled"],
        false
    );
}

#[tokio::test]
async fn admin_endpoints_require_admin_role() {
    let app = test_app();
    let user_token = login_token(&app, "alice").await;

    for (method, uri) in [
        ("GET", "/api/registry/admin/routes"),
        ("GET", "/api/registry/admin/canary-flags"),
        ("GET", "/api/admin/telemetry"),
    ] {
        let anonymous = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("request");
        let response = app.clone().oneshot(anonymous).await.expect("anonymous");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
        let payload = read_json(response).await;
        assert_eq!(payload["code"], "unauthorized");

        let user = bearer_request(method, uri, &user_token);
        let response = app.clone().oneshot(user).await.expect("user");
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{uri}");
        let payload = read_json(response).await;
        assert_eq!(payload["code"], "forbidden");
        assert_eq!(payload["message"], "ADMIN role required");
    }

    let update = bearer_json_request(
        "PUT",
        "/api/registry/admin/canary-flags/remote-accounts",
        &user_token,
        serde_json::json!({ "enabled": true, "rolloutPercentage": 10 }),
    );
    let response = app.clone().oneshot(update).await.expect("update");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_routes_match_public_registry() {
    let app = test_app();
    let token = login_token(&app, "admin").await;

    let admin = bearer_request("GET", "/api/registry/admin/routes", &token);
    let response = app.clone().oneshot(admin).await.expect("admin routes");
    assert_eq!(response.status(), StatusCode::OK);
    let admin_payload = read_json(response).await;

    let public = Request::builder()
        .uri("/api/registry")
        .body(Body::empty())
        .expect("request");
    let response = app.clone().oneshot(public).await.expect("registry");
    let public_payload = read_json(response).await;

    assert_eq!(admin_payload, public_payload);
}

#[tokio::test]
async fn correlation_id_is_echoed_or_generated() {
    let app = test_app();

    let with_header = Request::builder()
        .uri("/api/registry/health")
        .header("x-correlation-id", "corr-from-client")
        .body(Body::empty())
        .expect("request");
    let response = app.clone().oneshot(with_header).await.expect("health");
    assert_eq!(
        response
            .headers()
            .get("x-correlation-id")
            .and_then(|value| value.to_str().ok()),
        Some("corr-from-client")
    );

    let without_header = Request::builder()
        .uri("/api/registry/health")
        .body(Body::empty())
        .expect("request");
    let response = app.clone().oneshot(without_header).await.expect("health");
    let generated = response
        .headers()
        .get("x-correlation-id")
        .and_then(|value| value.to_str().ok())
        .expect("generated correlation id");
    assert!(generated.starts_with("corr-"));
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = test_app();
    let request = Request::builder()
        .uri("/api/openapi.json")
        .body(Body::empty())
        .expect("request");
    let response = app.clone().oneshot(request).await.expect("openapi");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json(response).await;
    assert!(payload["paths"]["/api/registry"].is_object());
    assert!(payload["paths"]["/api/auth/login"].is_object());
}
